pub mod animate;
pub mod geometry;
pub mod model;
pub mod params;

pub use animate::{Animator, Easing, LogAnimator, Timing};
pub use geometry::{Pose, SlideTransform, TransformDescriptor, compute_frame, relative_position};
pub use model::{Carousel, IndexState, LayoutError, wrap_index};
pub use params::{Appearance, LayoutParams, LayoutProfile, Profiles};

pub const DEFAULT_GAP: f64 = 40.0;
pub const BASE_Z: i32 = 10;
pub const ACTIVE_OPACITY: f64 = 1.0;
pub const INACTIVE_OPACITY: f64 = 0.7; // non-active slides are slightly see-through
pub const INACTIVE_SCALE: f64 = 0.9;
pub const TRANSITION_MS: u64 = 600;
