//! Layout engine for a staggered, rotating carousel.
//!
//! Slides sit on a ring around the active one. For every slide the engine
//! computes a target transform (offset, rotation, scale, opacity and stacking)
//! from its shortest-arc distance to the active slide. Tweening towards those
//! targets is left to an [`carousel::Animator`].

mod macros;

pub mod app;
pub mod carousel;
pub mod command;
pub mod config;
pub mod events;
pub mod slide;
pub mod sys;
