use super::params::{Appearance, LayoutParams, LayoutProfile, Profiles};
use crate::slide::{Slide, SlideKey};
use std::fmt;

/// Signed shortest-arc distance from `index` to `active` on a ring of `count`.
///
/// Offsets past half the ring are folded back. An offset of exactly half the
/// ring (even counts only) is left as is, so
/// `relative_position(a, b, n) == -relative_position(b, a, n)` always holds.
pub fn relative_position(index: usize, active: usize, count: usize) -> isize {
    let count = count as isize;
    let raw = index as isize - active as isize;

    if 2 * raw > count {
        raw - count
    } else if 2 * raw < -count {
        raw + count
    } else {
        raw
    }
}

/// Target values for one slide. The animation side interpolates towards these;
/// nothing here is ever patched in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDescriptor {
    pub relative_position: isize,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees, clockwise positive.
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
    pub stack_order: i32,
}

impl TransformDescriptor {
    pub fn calculate(
        relative_position: isize,
        profile: &LayoutProfile,
        gap: f64,
        appearance: &Appearance,
    ) -> Self {
        let rel = relative_position as f64;

        Self {
            relative_position,
            translate_x: rel * profile.pitch(gap),
            translate_y: rel * profile.vertical_step,
            rotation: rel * profile.rotation_step,
            scale: appearance.scale(relative_position),
            opacity: appearance.opacity(relative_position),
            stack_order: appearance.stack_order(relative_position),
        }
    }

    /// Placement for the first paint, before any animation has run: a flatter
    /// arc and no shrinking.
    pub fn entrance(
        relative_position: isize,
        profile: &LayoutProfile,
        gap: f64,
        appearance: &Appearance,
    ) -> Self {
        let rel = relative_position as f64;

        Self {
            translate_y: rel * profile.entrance_vertical_step,
            rotation: rel * profile.entrance_rotation_step,
            scale: 1.0,
            ..Self::calculate(relative_position, profile, gap, appearance)
        }
    }

    pub fn is_active(&self) -> bool {
        self.relative_position == 0
    }
}

impl fmt::Display for TransformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos={:+} x={:.1} y={:.1} rot={:.1} scale={:.2} opacity={:.2} z={}",
            self.relative_position,
            self.translate_x,
            self.translate_y,
            self.rotation,
            self.scale,
            self.opacity,
            self.stack_order
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Settled,
    Entrance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideTransform {
    pub key: SlideKey,
    pub index: usize,
    pub target: TransformDescriptor,
}

/// Computes one full pass over `slides`. Empty input yields an empty frame.
pub fn compute_frame<P>(
    slides: &[Slide<P>],
    active: usize,
    params: &LayoutParams,
    profiles: &Profiles,
    appearance: &Appearance,
    pose: Pose,
) -> Vec<SlideTransform> {
    let count = slides.len();
    if count == 0 {
        return Vec::new();
    }

    let profile = profiles.select(params.compact);

    slides
        .iter()
        .enumerate()
        .map(|(index, slide)| {
            let rel = relative_position(index, active, count);
            let target = match pose {
                Pose::Settled => {
                    TransformDescriptor::calculate(rel, profile, params.gap, appearance)
                }
                Pose::Entrance => {
                    TransformDescriptor::entrance(rel, profile, params.gap, appearance)
                }
            };
            SlideTransform {
                key: slide.key.clone(),
                index,
                target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<Slide<()>> {
        (0..n).map(|i| Slide::new(format!("slide-{i}"), ())).collect()
    }

    fn frame(n: usize, active: usize, params: LayoutParams) -> Vec<SlideTransform> {
        compute_frame(
            &slides(n),
            active,
            &params,
            &Profiles::default(),
            &Appearance::default(),
            Pose::Settled,
        )
    }

    #[test]
    fn test_relative_positions_five_slides() {
        let positions: Vec<isize> = (0..5).map(|i| relative_position(i, 2, 5)).collect();
        assert_eq!(positions, vec![-2, -1, 0, 1, 2]);

        let positions: Vec<isize> = (0..5).map(|i| relative_position(i, 0, 5)).collect();
        assert_eq!(positions, vec![0, 1, 2, -2, -1]);

        let positions: Vec<isize> = (0..5).map(|i| relative_position(i, 4, 5)).collect();
        assert_eq!(positions, vec![1, 2, -2, -1, 0]);
    }

    #[test]
    fn test_even_count_tie_keeps_raw_offset() {
        assert_eq!(relative_position(2, 0, 4), 2);
        assert_eq!(relative_position(0, 2, 4), -2);
        assert_eq!(relative_position(3, 0, 4), -1);
        assert_eq!(relative_position(0, 3, 4), 1);
    }

    #[test]
    fn test_exactly_one_active_slide() {
        for n in 1..=9 {
            for active in 0..n {
                let zeros = (0..n)
                    .filter(|&i| relative_position(i, active, n) == 0)
                    .count();
                assert_eq!(zeros, 1, "n={n} active={active}");
            }
        }
    }

    #[test]
    fn test_relative_position_is_antisymmetric() {
        for n in 1..=8 {
            for a in 0..n {
                for b in 0..n {
                    assert_eq!(
                        relative_position(a, b, n),
                        -relative_position(b, a, n),
                        "n={n} a={a} b={b}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_relative_position_stays_within_half_ring() {
        for n in 1..=8usize {
            for a in 0..n {
                for b in 0..n {
                    let rel = relative_position(a, b, n);
                    assert!(2 * rel.unsigned_abs() <= n, "n={n} a={a} b={b} rel={rel}");
                }
            }
        }
    }

    #[test]
    fn test_descriptor_values() {
        let frame = frame(5, 2, LayoutParams::new(20.0, false));
        let left = frame[1].target;
        let active = frame[2].target;
        let far_right = frame[4].target;

        assert_eq!(left.translate_x, -270.0);
        assert_eq!(left.translate_y, -80.0);
        assert_eq!(left.rotation, -10.0);
        assert_eq!(left.scale, 0.9);
        assert_eq!(left.opacity, 0.7);
        assert_eq!(left.stack_order, 9);

        assert_eq!(active.translate_x, 0.0);
        assert_eq!(active.translate_y, 0.0);
        assert_eq!(active.rotation, 0.0);
        assert_eq!(active.scale, 1.0);
        assert_eq!(active.opacity, 1.0);
        assert_eq!(active.stack_order, 10);
        assert!(active.is_active());

        assert_eq!(far_right.translate_x, 540.0);
        assert_eq!(far_right.translate_y, 160.0);
        assert_eq!(far_right.rotation, 20.0);
        assert_eq!(far_right.stack_order, 8);
    }

    #[test]
    fn test_stacking_is_monotonic_in_distance() {
        for n in 1..=8 {
            for active in 0..n {
                let frame = frame(n, active, LayoutParams::default());
                for a in &frame {
                    for b in &frame {
                        let (da, db) = (
                            a.target.relative_position.unsigned_abs(),
                            b.target.relative_position.unsigned_abs(),
                        );
                        if da < db {
                            assert!(a.target.stack_order > b.target.stack_order);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_compact_shrinks_offsets_only() {
        let standard = frame(5, 2, LayoutParams::new(40.0, false));
        let compact = frame(5, 2, LayoutParams::new(40.0, true));

        for (s, c) in standard.iter().zip(&compact) {
            assert_eq!(s.key, c.key);
            assert_eq!(s.target.relative_position, c.target.relative_position);
            assert_eq!(s.target.stack_order, c.target.stack_order);
            assert_eq!(s.target.scale, c.target.scale);
            assert_eq!(s.target.opacity, c.target.opacity);

            if s.target.is_active() {
                assert_eq!(c.target.translate_x, 0.0);
                continue;
            }
            assert!(c.target.translate_x.abs() < s.target.translate_x.abs());
            assert!(c.target.translate_y.abs() < s.target.translate_y.abs());
            assert!(c.target.rotation.abs() < s.target.rotation.abs());
        }
    }

    #[test]
    fn test_entrance_pose_is_flatter() {
        let slides = slides(5);
        let params = LayoutParams::new(20.0, false);
        let entrance = compute_frame(
            &slides,
            2,
            &params,
            &Profiles::default(),
            &Appearance::default(),
            Pose::Entrance,
        );

        let first = entrance[0].target;
        assert_eq!(first.translate_x, -540.0);
        assert_eq!(first.translate_y, -40.0);
        assert_eq!(first.rotation, -10.0);
        assert_eq!(first.scale, 1.0);
        assert_eq!(first.opacity, 0.7);
        assert_eq!(first.stack_order, 8);
    }

    #[test]
    fn test_empty_frame() {
        assert!(frame(0, 0, LayoutParams::default()).is_empty());
    }

    #[test]
    fn test_display() {
        let d = TransformDescriptor::calculate(
            -1,
            &LayoutProfile::STANDARD,
            20.0,
            &Appearance::default(),
        );
        assert_eq!(
            d.to_string(),
            "pos=-1 x=-270.0 y=-80.0 rot=-10.0 scale=0.90 opacity=0.70 z=9"
        );
    }
}
