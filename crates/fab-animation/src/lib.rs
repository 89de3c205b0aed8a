//! Animation support for the floating action button
//!
//! Provides frame-clock driven tweens with easing curves. Only one
//! animation drives an [`Animatable`] at a time.

mod animation;

pub use animation::*;

pub mod prelude {
    pub use crate::animation::{Animatable, AnimationSpec, Easing, Lerp};
}
