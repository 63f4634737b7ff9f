use crate::carousel::{Animator, Carousel, Timing};
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::slide::SlidePayload;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the carousel and the animator. All events are handled here, one at a
/// time, so the active index has a single writer.
pub struct AppModel<A: Animator> {
    pub carousel: Carousel<SlidePayload>,
    pub animator: A,
    pub timing: Timing,
    pub config_path: Option<PathBuf>,
}

impl<A: Animator> AppModel<A> {
    pub fn new(config: &Config, animator: A, config_path: Option<PathBuf>) -> Self {
        Self {
            carousel: config.build_carousel(),
            animator,
            timing: config.timing,
            config_path,
        }
    }

    /// First paint: place every slide at its entrance pose, then send the
    /// settled targets so the renderer animates into them.
    pub fn start(&mut self) {
        let entrance = self.carousel.entrance_frame();
        let instant = Timing {
            duration_ms: 0,
            ..self.timing
        };
        self.animator.present(&entrance, &instant);
        self.present();
    }

    fn present(&mut self) {
        self.animator.present(self.carousel.transforms(), &self.timing);
    }

    pub fn update(&mut self, event: AppEvent) -> Flow {
        log::debug!("event: {:?}", event);

        let changed = match event {
            AppEvent::Next => self.carousel.next(),
            AppEvent::Previous => self.carousel.previous(),
            AppEvent::JumpTo(i) => self.carousel.jump_to(i),
            AppEvent::Select(key) => self.carousel.jump_to_key(&key),
            AppEvent::SetCompact(compact) => self.carousel.set_compact(compact),
            AppEvent::ToggleCompact => {
                let compact = !self.carousel.params().compact;
                self.carousel.set_compact(compact)
            }
            AppEvent::SetGap(gap) => self.carousel.set_gap(gap),
            AppEvent::Show => true,
            AppEvent::ConfigReload => self.reload(),
            AppEvent::Quit => return Flow::Quit,
        };

        if changed {
            self.present();
        }
        Flow::Continue
    }

    fn reload(&mut self) -> bool {
        let loaded = match &self.config_path {
            Some(path) => config::load_config_from(path.clone()),
            None => config::load_config(),
        };
        match loaded {
            Ok(new_config) => {
                new_config.apply_to(&mut self.carousel);
                self.timing = new_config.timing;
                log::info!("Configuration reloaded");
                true
            }
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                false
            }
        }
    }
}
