//! Geometric primitives and the recorded draw-command model

use crate::bitmap::{FilterQuality, ImageBitmap};
use crate::color::Color;
use crate::shadow::{LayerType, Shadow};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    Circle {
        center: Point,
        radius: f32,
        color: Color,
        shadow: Option<Shadow>,
        anti_alias: bool,
    },
    Image {
        rect: Rect,
        bitmap: ImageBitmap,
        filter: FilterQuality,
    },
}

/// Drawing surface handed to a view on invalidation.
pub trait DrawScope {
    fn size(&self) -> Size;
    fn set_layer_type(&mut self, layer_type: LayerType);
    fn layer_type(&self) -> LayerType;
    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        color: Color,
        shadow: Option<Shadow>,
        anti_alias: bool,
    );
    /// Draws `bitmap` unscaled with its top-left corner at `top_left`.
    fn draw_image(&mut self, bitmap: &ImageBitmap, top_left: Point, filter: FilterQuality);
}

/// Records draw calls as [`DrawPrimitive`]s for a host renderer (or a test)
/// to consume.
#[derive(Default)]
pub struct DrawScopeDefault {
    size: Size,
    layer_type: LayerType,
    primitives: Vec<DrawPrimitive>,
}

impl DrawScopeDefault {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            layer_type: LayerType::None,
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<DrawPrimitive> {
        self.primitives
    }
}

impl DrawScope for DrawScopeDefault {
    fn size(&self) -> Size {
        self.size
    }

    fn set_layer_type(&mut self, layer_type: LayerType) {
        self.layer_type = layer_type;
    }

    fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        color: Color,
        shadow: Option<Shadow>,
        anti_alias: bool,
    ) {
        self.primitives.push(DrawPrimitive::Circle {
            center,
            radius,
            color,
            shadow,
            anti_alias,
        });
    }

    fn draw_image(&mut self, bitmap: &ImageBitmap, top_left: Point, filter: FilterQuality) {
        if bitmap.is_recycled() {
            log::warn!("refusing to draw a recycled bitmap");
            return;
        }
        self.primitives.push(DrawPrimitive::Image {
            rect: Rect::from_origin_size(
                top_left,
                Size::new(bitmap.width() as f32, bitmap.height() as f32),
            ),
            bitmap: bitmap.clone(),
            filter,
        });
    }
}
