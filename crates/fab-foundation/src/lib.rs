//! Pointer input and scrolling foundations for the floating action button.

pub mod input;
pub mod scroll;

pub use input::{PointerDispatcher, PointerEvent, PointerEventKind, PointerId};
pub use scroll::{PointerInterceptor, ScrollRegion, ScrollableRegion};

pub mod prelude {
    pub use crate::input::prelude::*;
    pub use crate::scroll::{PointerInterceptor, ScrollRegion, ScrollableRegion};
}
