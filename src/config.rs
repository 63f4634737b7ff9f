use crate::carousel::{Appearance, Carousel, DEFAULT_GAP, LayoutParams, Profiles, Timing};
use crate::slide::{Slide, SlideKey, SlidePayload};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlideConfig {
    pub key: SlideKey,
    #[serde(flatten)]
    pub payload: SlidePayload,
}

impl SlideConfig {
    fn sample(n: usize) -> Self {
        Self {
            key: SlideKey::new(format!("slide-{n}")),
            payload: SlidePayload {
                title: format!("Slide {n}"),
                image: String::new(),
            },
        }
    }
}

impl From<&SlideConfig> for Slide {
    fn from(cfg: &SlideConfig) -> Self {
        Slide {
            key: cfg.key.clone(),
            payload: cfg.payload.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_gap")]
    pub gap: f64,
    #[serde(default)]
    pub compact: bool,
    pub initial_index: Option<isize>,
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub profiles: Profiles,
    #[serde(default)]
    pub slides: Vec<SlideConfig>,
}

fn default_gap() -> f64 {
    DEFAULT_GAP
}

fn default_socket_path() -> PathBuf {
    std::env::temp_dir().join("stagger.sock")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap: default_gap(),
            compact: false,
            initial_index: None,
            socket_path: default_socket_path(),
            appearance: Appearance::default(),
            timing: Timing::default(),
            profiles: Profiles::default(),
            slides: (1..=5).map(SlideConfig::sample).collect(),
        }
    }
}

impl Config {
    pub fn slides(&self) -> Vec<Slide> {
        self.slides.iter().map(Slide::from).collect()
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.gap, self.compact)
    }

    pub fn build_carousel(&self) -> Carousel<SlidePayload> {
        Carousel::with_style(
            self.slides(),
            self.initial_index,
            self.layout_params(),
            self.profiles,
            self.appearance,
        )
    }

    /// Pushes reloaded settings into a running carousel. Navigation state and
    /// the current compact flag are kept.
    /// Carousel for a one-off layout dump. The command line can force compact
    /// mode on but never off, so `compact = true` in the file survives a
    /// missing flag.
    pub fn preview_carousel(
        &self,
        active: Option<isize>,
        force_compact: bool,
        gap: Option<f64>,
    ) -> Carousel<SlidePayload> {
        let mut carousel = self.build_carousel();
        if let Some(i) = active {
            carousel.jump_to(i);
        }
        if force_compact {
            carousel.set_compact(true);
        }
        if let Some(gap) = gap {
            carousel.set_gap(gap);
        }
        carousel
    }

    pub fn apply_to(&self, carousel: &mut Carousel<SlidePayload>) {
        carousel.reconfigure(self.slides(), self.gap, self.profiles, self.appearance);
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "stagger", "stagger").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Layers the bundled defaults, the given file and `STAGGER_*` variables.
/// Keys missing from the file keep their bundled value, so a partial
/// `[profiles.compact]` table still inherits the compact defaults.
pub fn load_config_from(path: PathBuf) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("STAGGER")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(get_config_path()?)
}

pub fn load_or_default(path: Option<PathBuf>) -> Config {
    let loaded = match path {
        Some(p) => load_config_from(p),
        None => load_config(),
    };
    match loaded {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to built-in config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

/// Event paths from notify are absolute, so a relative `--config` has to be
/// resolved against the working directory before it can be compared.
fn watch_target(config_path: PathBuf) -> PathBuf {
    match std::path::absolute(&config_path) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Failed to resolve {}: {}", config_path.display(), e);
            config_path
        }
    }
}

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_path = watch_target(config_path);
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
