use super::{ACTIVE_OPACITY, BASE_Z, DEFAULT_GAP, INACTIVE_OPACITY, INACTIVE_SCALE};
use serde::{Deserialize, Serialize};

/// One parameter set for the staggered arc. Offsets and steps are per unit of
/// relative position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutProfile {
    pub slide_width: f64,
    pub gap_divisor: f64,
    pub vertical_step: f64,
    pub rotation_step: f64,
    pub entrance_vertical_step: f64,
    pub entrance_rotation_step: f64,
}

impl LayoutProfile {
    pub const STANDARD: Self = Self {
        slide_width: 250.0,
        gap_divisor: 1.0,
        vertical_step: 80.0,
        rotation_step: 10.0,
        entrance_vertical_step: 20.0,
        entrance_rotation_step: 5.0,
    };

    pub const COMPACT: Self = Self {
        slide_width: 160.0,
        gap_divisor: 2.0,
        vertical_step: 40.0,
        rotation_step: 5.0,
        entrance_vertical_step: 10.0,
        entrance_rotation_step: 2.5,
    };

    pub fn effective_gap(&self, gap: f64) -> f64 {
        gap / self.gap_divisor.max(1.0)
    }

    /// Horizontal distance between two neighbouring slide centres.
    pub fn pitch(&self, gap: f64) -> f64 {
        self.slide_width + self.effective_gap(gap)
    }
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profiles {
    #[serde(default = "standard_profile")]
    pub standard: LayoutProfile,
    #[serde(default = "compact_profile")]
    pub compact: LayoutProfile,
}

fn standard_profile() -> LayoutProfile {
    LayoutProfile::STANDARD
}

fn compact_profile() -> LayoutProfile {
    LayoutProfile::COMPACT
}

impl Profiles {
    /// The compact flag comes from viewport measurement done elsewhere; this is
    /// the only place it is read.
    pub fn select(&self, compact: bool) -> &LayoutProfile {
        if compact {
            &self.compact
        } else {
            &self.standard
        }
    }
}

impl Default for Profiles {
    fn default() -> Self {
        Self {
            standard: LayoutProfile::STANDARD,
            compact: LayoutProfile::COMPACT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub gap: f64,
    pub compact: bool,
}

impl LayoutParams {
    pub fn new(gap: f64, compact: bool) -> Self {
        Self { gap, compact }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::new(DEFAULT_GAP, false)
    }
}

/// Scale, opacity and stacking policy. Each value depends only on whether a
/// slide is the active one, or on its distance from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub active_opacity: f64,
    pub inactive_opacity: f64,
    pub inactive_scale: f64,
    pub base_z: i32,
}

impl Appearance {
    pub fn opacity(&self, relative_position: isize) -> f64 {
        if relative_position == 0 {
            self.active_opacity
        } else {
            self.inactive_opacity
        }
    }

    pub fn scale(&self, relative_position: isize) -> f64 {
        if relative_position == 0 {
            1.0
        } else {
            self.inactive_scale
        }
    }

    pub fn stack_order(&self, relative_position: isize) -> i32 {
        let distance = i32::try_from(relative_position.unsigned_abs()).unwrap_or(i32::MAX);
        self.base_z.saturating_sub(distance)
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            active_opacity: ACTIVE_OPACITY,
            inactive_opacity: INACTIVE_OPACITY,
            inactive_scale: INACTIVE_SCALE,
            base_z: BASE_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_profile_is_tighter_than_standard() {
        let profiles = Profiles::default();
        let (standard, compact) = (profiles.select(false), profiles.select(true));

        for gap in [0.0, 20.0, 40.0] {
            assert!(compact.pitch(gap) < standard.pitch(gap));
        }
        assert!(compact.vertical_step < standard.vertical_step);
        assert!(compact.rotation_step < standard.rotation_step);
    }

    #[test]
    fn gap_divisor_below_one_is_ignored() {
        let profile = LayoutProfile {
            gap_divisor: 0.0,
            ..LayoutProfile::STANDARD
        };
        assert_eq!(profile.effective_gap(20.0), 20.0);
        assert_eq!(LayoutProfile::COMPACT.effective_gap(20.0), 10.0);
    }

    #[test]
    fn stack_order_drops_with_distance() {
        let appearance = Appearance::default();
        assert_eq!(appearance.stack_order(0), 10);
        assert_eq!(appearance.stack_order(-1), 9);
        assert_eq!(appearance.stack_order(3), 7);
    }

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: LayoutProfile = serde_json::from_str(r#"{"slide_width": 120.0}"#).unwrap();
        assert_eq!(profile.slide_width, 120.0);
        assert_eq!(profile.vertical_step, LayoutProfile::STANDARD.vertical_step);

        let profiles: Profiles =
            serde_json::from_str(r#"{"standard": {"gap_divisor": 4.0}}"#).unwrap();
        assert_eq!(profiles.standard.gap_divisor, 4.0);
        assert_eq!(profiles.compact, LayoutProfile::COMPACT);
    }
}
