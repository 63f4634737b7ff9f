use super::geometry::{self, Pose, SlideTransform};
use super::params::{Appearance, LayoutParams, Profiles};
use crate::slide::{Slide, SlideKey};
use thiserror::Error;

/// Guards that are resolved inside the engine. They are logged, never returned
/// to callers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("index {index} is outside 0..{count} after wrapping")]
    InvalidIndex { index: isize, count: usize },
    #[error("carousel has no slides")]
    EmptyCollection,
}

/// Wraps any signed index onto a ring of `count` slots.
pub fn wrap_index(index: isize, count: usize) -> Result<usize, LayoutError> {
    if count == 0 {
        return Err(LayoutError::EmptyCollection);
    }
    let wrapped = index.rem_euclid(count as isize);
    usize::try_from(wrapped)
        .ok()
        .filter(|&i| i < count)
        .ok_or(LayoutError::InvalidIndex { index, count })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexState {
    active: usize,
    count: usize,
}

impl IndexState {
    /// Starts at `initial` (wrapped), or the middle of the ring when `None`.
    pub fn new(initial: Option<isize>, count: usize) -> Self {
        let mut state = Self { active: 0, count };
        state.active = state.resolve(initial.unwrap_or(Self::middle(count)));
        state
    }

    fn middle(count: usize) -> isize {
        (count / 2) as isize
    }

    fn resolve(&self, index: isize) -> usize {
        match wrap_index(index, self.count) {
            Ok(i) => i,
            Err(LayoutError::EmptyCollection) => 0,
            Err(e) => {
                log::warn!("{}, resetting to 0", e);
                0
            }
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if the active index moved.
    pub fn jump_to(&mut self, index: isize) -> bool {
        if self.count <= 1 {
            return false;
        }
        let target = self.resolve(index);
        if target == self.active {
            return false;
        }
        log::debug!("active slide {} -> {}", self.active, target);
        self.active = target;
        true
    }

    pub fn next(&mut self) -> bool {
        self.jump_to(self.active as isize + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.jump_to(self.active as isize - 1)
    }

    /// Keeps the active index valid for a new slide count. Returns `true` if
    /// the active index or the count changed.
    pub fn resize(&mut self, count: usize) -> bool {
        if count == self.count {
            return false;
        }
        let was_empty = self.count == 0;
        self.count = count;
        self.active = if count == 0 {
            0
        } else if was_empty {
            self.resolve(Self::middle(count))
        } else {
            self.active.min(count - 1)
        };
        true
    }
}

/// Carousel state plus the frame computed from it.
///
/// Every mutator that changes something recomputes the whole frame before
/// returning; the return value tells the caller whether there is a new frame
/// to hand to the animator.
#[derive(Debug, Clone)]
pub struct Carousel<P> {
    slides: Vec<Slide<P>>,
    index: IndexState,
    params: LayoutParams,
    profiles: Profiles,
    appearance: Appearance,
    transforms: Vec<SlideTransform>,
    generation: u64,
}

impl<P> Carousel<P> {
    pub fn new(slides: Vec<Slide<P>>, initial: Option<isize>, params: LayoutParams) -> Self {
        Self::with_style(
            slides,
            initial,
            params,
            Profiles::default(),
            Appearance::default(),
        )
    }

    pub fn with_style(
        slides: Vec<Slide<P>>,
        initial: Option<isize>,
        params: LayoutParams,
        profiles: Profiles,
        appearance: Appearance,
    ) -> Self {
        let index = IndexState::new(initial, slides.len());
        let mut carousel = Self {
            slides,
            index,
            params,
            profiles,
            appearance,
            transforms: Vec::new(),
            generation: 0,
        };
        carousel.recalculate_transforms();
        carousel
    }

    pub fn slides(&self) -> &[Slide<P>] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.index.active()
    }

    pub fn active_slide(&self) -> Option<&Slide<P>> {
        self.slides.get(self.index.active())
    }

    pub fn params(&self) -> LayoutParams {
        self.params
    }

    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// The most recent full recomputation.
    pub fn transforms(&self) -> &[SlideTransform] {
        &self.transforms
    }

    /// Bumped once per recomputation pass.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next(&mut self) -> bool {
        let changed = self.index.next();
        self.recalculate_if(changed)
    }

    pub fn previous(&mut self) -> bool {
        let changed = self.index.previous();
        self.recalculate_if(changed)
    }

    pub fn jump_to(&mut self, index: isize) -> bool {
        let changed = self.index.jump_to(index);
        self.recalculate_if(changed)
    }

    pub fn jump_to_key(&mut self, key: &SlideKey) -> bool {
        match self.slides.iter().position(|s| &s.key == key) {
            Some(i) => self.jump_to(i as isize),
            None => {
                log::debug!("no slide with key '{}'", key);
                false
            }
        }
    }

    pub fn set_compact(&mut self, compact: bool) -> bool {
        let changed = self.params.compact != compact;
        self.params.compact = compact;
        self.recalculate_if(changed)
    }

    pub fn set_gap(&mut self, gap: f64) -> bool {
        let changed = self.params.gap != gap;
        self.params.gap = gap;
        self.recalculate_if(changed)
    }

    pub fn set_profiles(&mut self, profiles: Profiles, appearance: Appearance) -> bool {
        let changed = self.profiles != profiles || self.appearance != appearance;
        self.profiles = profiles;
        self.appearance = appearance;
        self.recalculate_if(changed)
    }

    /// Replaces the slide sequence. Always recomputes since keys or payloads
    /// may differ even when the count does not.
    pub fn set_slides(&mut self, slides: Vec<Slide<P>>) -> bool {
        self.index.resize(slides.len());
        self.slides = slides;
        self.recalculate_transforms();
        true
    }

    /// Swaps slides, gap and style together in one recomputation pass. The
    /// compact flag and the active index (clamped) are kept.
    pub fn reconfigure(
        &mut self,
        slides: Vec<Slide<P>>,
        gap: f64,
        profiles: Profiles,
        appearance: Appearance,
    ) {
        self.index.resize(slides.len());
        self.slides = slides;
        self.params.gap = gap;
        self.profiles = profiles;
        self.appearance = appearance;
        self.recalculate_transforms();
    }

    /// Placement used for the first paint, before any animation.
    pub fn entrance_frame(&self) -> Vec<SlideTransform> {
        self.frame(Pose::Entrance)
    }

    fn frame(&self, pose: Pose) -> Vec<SlideTransform> {
        geometry::compute_frame(
            &self.slides,
            self.index.active(),
            &self.params,
            &self.profiles,
            &self.appearance,
            pose,
        )
    }

    fn recalculate_if(&mut self, changed: bool) -> bool {
        if changed {
            self.recalculate_transforms();
        }
        changed
    }

    fn recalculate_transforms(&mut self) {
        self.transforms = self.frame(Pose::Settled);
        self.generation += 1;
        log::debug!(
            "recalculated {} transforms (active={}, compact={}, generation={})",
            self.transforms.len(),
            self.index.active(),
            self.params.compact,
            self.generation
        );
    }
}
