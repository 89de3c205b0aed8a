//! Floating action button widget.
//!
//! A [`FloatingButton`] draws a shadowed circle with an optional centered
//! icon, notifies press listeners and, once attached to a
//! [`ScrollableRegion`](fab_foundation::ScrollableRegion), slides out of the
//! way while the list is dragged and settles visible or hidden when the
//! finger lifts.

mod config;
mod drag_follow;
mod floating_button;
mod icon;
mod view;

pub use config::{
    DisplayMetrics, FloatingButtonConfig, IconRatio, DEFAULT_SIZE, MINI_SIZE,
    SETTLE_DURATION_MILLIS,
};
pub use drag_follow::{DragFollow, DragSession, DragStep, SettleTarget, TravelBounds};
pub use floating_button::FloatingButton;
pub use icon::{decode_icon, load_resource_icon, scale_icon, IconError};
pub use view::View;

pub mod prelude {
    pub use crate::config::{DisplayMetrics, FloatingButtonConfig};
    pub use crate::floating_button::FloatingButton;
    pub use crate::view::View;
}
