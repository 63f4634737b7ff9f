use super::TRANSITION_MS;
use super::geometry::{SlideTransform, TransformDescriptor};
use crate::slide::SlideKey;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::io::Write;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Easing curve name handed to the animator. The layout engine never
/// interpolates; evaluating the curve is the renderer's job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Easing {
    #[strum(to_string = "linear", serialize = "none")]
    Linear,
    #[strum(to_string = "ease-out-quad", serialize = "power2.out", serialize = "decelerate")]
    #[default]
    EaseOutQuad,
    #[strum(to_string = "ease-out-cubic", serialize = "power3.out")]
    EaseOutCubic,
    #[strum(to_string = "ease-in-out-quad", serialize = "power2.inout")]
    EaseInOutQuad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Timing {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration_ms: TRANSITION_MS,
            easing: Easing::default(),
        }
    }
}

/// Whatever owns the per-slide handles and does the tweening.
///
/// A new frame may arrive while the previous one is still animating; the
/// implementation must drop or retarget the old tweens.
pub trait Animator {
    fn cancel_all(&mut self);
    fn animate(&mut self, key: &SlideKey, target: &TransformDescriptor, timing: &Timing);

    /// Hands over a full frame: cancels running tweens, then retargets every slide.
    fn present(&mut self, frame: &[SlideTransform], timing: &Timing) {
        self.cancel_all();
        for t in frame {
            self.animate(&t.key, &t.target, timing);
        }
    }
}

/// Writes each target as one line. Used by the command-line driver.
pub struct LogAnimator<W: Write> {
    out: W,
}

impl LogAnimator<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LogAnimator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Animator for LogAnimator<W> {
    fn cancel_all(&mut self) {
        log::trace!("cancelling running tweens");
    }

    fn animate(&mut self, key: &SlideKey, target: &TransformDescriptor, timing: &Timing) {
        if let Err(e) = writeln!(
            self.out,
            "{key}: {target} ({}ms {})",
            timing.duration_ms, timing.easing
        ) {
            log::warn!("Failed to write transform for '{}': {}", key, e);
        }
    }
}
