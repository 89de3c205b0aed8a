use std::io::Cursor;

use fab_core::{Runtime, RuntimeHandle};
use fab_foundation::{PointerEvent, PointerEventKind, ScrollRegion};
use fab_ui::{DisplayMetrics, FloatingButton, FloatingButtonConfig, View};
use fab_ui_graphics::{Color, DrawPrimitive, DrawScopeDefault, LayerType, Point, Rect, Size};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

pub const DEFAULT_SCREEN_HEIGHT: f32 = 1600.0;
pub const DEFAULT_RESTING_Y: f32 = 800.0;
pub const FRAME_INTERVAL_NANOS: u64 = 16_000_000;

const LIST_WIDTH: f32 = 400.0;
const LIST_ITEM_HEIGHT: f32 = 48.0;
const LIST_ITEM_COUNT: usize = 100;
const TOUCH_X: f32 = 200.0;

/// Headless harness for exercising a [`FloatingButton`] in tests.
///
/// `FabTestRule` plays the host: it owns the runtime, a scrollable list
/// filling the screen and the button, and exposes helpers for laying out,
/// dispatching gestures, stepping frames and capturing draw output without
/// a windowing backend.
pub struct FabTestRule {
    runtime: Runtime,
    region: ScrollRegion,
    button: FloatingButton,
    resting_y: f32,
    frame_time_nanos: u64,
    last_layer_type: LayerType,
}

impl FabTestRule {
    /// Density 1, a 1600px tall screen and a default button resting at 800.
    pub fn new() -> Self {
        Self::with_config(
            DisplayMetrics::new(1.0, DEFAULT_SCREEN_HEIGHT),
            FloatingButtonConfig::default(),
            DEFAULT_RESTING_Y,
        )
    }

    pub fn with_config(
        display: DisplayMetrics,
        config: FloatingButtonConfig,
        resting_y: f32,
    ) -> Self {
        let runtime = Runtime::default();
        let button = FloatingButton::new(runtime.handle(), display, config);
        let region = ScrollRegion::new(
            Rect::from_origin_size(
                Point::ZERO,
                Size::new(LIST_WIDTH, display.screen_height),
            ),
            LIST_ITEM_COUNT,
            LIST_ITEM_HEIGHT,
        );
        Self {
            runtime,
            region,
            button,
            resting_y,
            frame_time_nanos: 0,
            last_layer_type: LayerType::None,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn button(&self) -> &FloatingButton {
        &self.button
    }

    pub fn region(&self) -> &ScrollRegion {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut ScrollRegion {
        &mut self.region
    }

    /// Places the button, attaches it and completes one layout pass.
    pub fn layout(&mut self) {
        self.button.set_y(self.resting_y);
        self.button.on_attached();
        let ran = self.runtime.run_layout_pass();
        log::trace!("layout pass ran {ran} task(s)");
    }

    pub fn attach_to_list(&mut self) {
        self.button.attach_to_scrollable_region(&mut self.region);
    }

    /// Lays out and attaches in one step.
    pub fn set_up(&mut self) -> &FloatingButton {
        self.layout();
        self.attach_to_list();
        &self.button
    }

    pub fn detach(&mut self) {
        self.button.on_detached();
    }

    /// Dispatches a pointer event at `y` to the list and returns it so the
    /// caller can inspect consumption.
    pub fn touch_list(&mut self, kind: PointerEventKind, y: f32) -> PointerEvent {
        let event = PointerEvent::at_screen(kind, Point::new(TOUCH_X, y));
        self.region.dispatch(&event);
        event
    }

    /// Down at the first Y, a move through every Y, then up at the last.
    pub fn drag_list(&mut self, path: &[f32]) {
        let Some((&first, _)) = path.split_first() else {
            return;
        };
        self.touch_list(PointerEventKind::Down, first);
        for &y in path {
            self.touch_list(PointerEventKind::Move, y);
        }
        let last = path.last().copied().unwrap_or(first);
        self.touch_list(PointerEventKind::Up, last);
    }

    /// Presses and releases on the button itself.
    pub fn tap_button(&mut self) {
        let y = self.button.y() + self.button.diameter_px() / 2.0;
        for kind in [PointerEventKind::Down, PointerEventKind::Up] {
            let local = Point::new(self.button.diameter_px() / 2.0, self.button.diameter_px() / 2.0);
            let event = PointerEvent::new(kind, local, Point::new(TOUCH_X, y));
            self.button.on_pointer_event(&event);
        }
    }

    /// Drains one frame at the current time and steps the clock forward.
    pub fn advance_frame(&mut self) {
        self.runtime.handle().drain_frame_callbacks(self.frame_time_nanos);
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn advance_time_millis(&mut self, millis: u64) {
        let frames = (millis * 1_000_000).div_ceil(FRAME_INTERVAL_NANOS);
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Runs frames until no frame callbacks remain. Returns the number of
    /// frames it took.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            frames += 1;
            if frames > 1000 {
                panic!("run_until_idle looped too many times!");
            }
            self.advance_frame();
        }
        frames
    }

    /// Draws the button into a fresh recording scope.
    pub fn render(&mut self) -> Vec<DrawPrimitive> {
        let mut scope = DrawScopeDefault::new(self.button.measured_size());
        self.button.draw(&mut scope);
        self.last_layer_type = fab_ui_graphics::DrawScope::layer_type(&scope);
        scope.into_primitives()
    }

    /// Draws only when the button reports pending changes.
    pub fn render_if_invalidated(&mut self) -> Option<Vec<DrawPrimitive>> {
        self.button.is_invalidated().then(|| self.render())
    }

    pub fn last_layer_type(&self) -> LayerType {
        self.last_layer_type
    }
}

impl Default for FabTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need temporary access to a
/// laid out and attached `FabTestRule`.
pub fn run_fab_test<R>(f: impl FnOnce(&mut FabTestRule) -> R) -> R {
    let mut rule = FabTestRule::new();
    rule.set_up();
    f(&mut rule)
}

pub fn solid_image(width: u32, height: u32, color: Color) -> DynamicImage {
    let Color(r, g, b, a) = color;
    let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([to_u8(r), to_u8(g), to_u8(b), to_u8(a)]),
    ))
}

/// PNG-encoded solid image, for registering icon resources.
pub fn png_bytes(width: u32, height: u32, color: Color) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    if let Err(err) = solid_image(width, height, color).write_to(&mut bytes, ImageFormat::Png) {
        panic!("failed to encode test png: {err}");
    }
    bytes.into_inner()
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
