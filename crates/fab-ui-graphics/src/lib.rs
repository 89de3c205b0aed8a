//! Pure math/data for drawing & units
//!
//! This crate contains geometry primitives, color definitions, shadows,
//! bitmaps and unit types shared by the floating action button crates.

mod bitmap;
mod color;
mod geometry;
mod shadow;
mod unit;

pub use bitmap::*;
pub use color::*;
pub use geometry::*;
pub use shadow::*;
pub use unit::*;

pub mod prelude {
    pub use crate::bitmap::{FilterQuality, ImageBitmap};
    pub use crate::color::Color;
    pub use crate::geometry::{DrawPrimitive, DrawScope, DrawScopeDefault, Point, Rect, Size};
    pub use crate::shadow::{LayerType, Shadow};
    pub use crate::unit::{Density, Dp, Px};
}
