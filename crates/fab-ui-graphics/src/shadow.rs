//! Drop shadow parameters attached to a filled shape.

use crate::color::Color;
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset: Point,
    pub blur_radius: f32,
}

impl Shadow {
    pub const fn new(color: Color, offset: Point, blur_radius: f32) -> Self {
        Self {
            color,
            offset,
            blur_radius,
        }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::new(Color::DARK_GRAY, Point::new(3.0, 3.0), 5.0)
    }
}

/// How a view's drawing is composited.
///
/// Shadow layers on filled shapes are only honored by the software path on
/// most mobile compositors, so views drawing shadows request `Software`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerType {
    #[default]
    None,
    Software,
}
