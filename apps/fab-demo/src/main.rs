use std::error::Error;
use std::io::Cursor;
use std::time::Duration;

use fab_assets::{AssetManager, ResourceId};
use fab_core::Runtime;
use fab_foundation::{PointerDispatcher, PointerEvent, PointerEventKind, ScrollRegion};
use fab_ui::{DisplayMetrics, FloatingButton, FloatingButtonConfig, View};
use fab_ui_graphics::{DrawPrimitive, DrawScope, DrawScopeDefault, Point, Rect, Size};
use image::{ImageFormat, Rgba, RgbaImage};
use web_time::Instant;

const ICON_ID: ResourceId = ResourceId(0x7f02_0000);
const DENSITY: f32 = 2.0;
const SCREEN_WIDTH: f32 = 1080.0;
const SCREEN_HEIGHT: f32 = 1920.0;
const ROW_HEIGHT: f32 = 96.0;
const ROW_COUNT: usize = 100;
const MARGIN_DP: f32 = 16.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Receiver of the gesture in progress, fixed at pointer down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Button,
    List,
}

/// Minimal host: owns the runtime, the list and the button, and plays the
/// part of the platform's layout, dispatch and frame loop.
struct DemoHost {
    runtime: Runtime,
    list: ScrollRegion,
    button: FloatingButton,
    input: PointerDispatcher,
    target: Option<Target>,
    started: Instant,
}

impl DemoHost {
    fn new(assets: &AssetManager) -> Self {
        let runtime = Runtime::default();
        let display = DisplayMetrics::new(DENSITY, SCREEN_HEIGHT);
        let button = FloatingButton::new(runtime.handle(), display, FloatingButtonConfig::default());
        button.set_center_icon_resource(assets, ICON_ID);
        button.add_press_listener(|| log::info!("Button pressed!"));

        let list = ScrollRegion::new(
            Rect::from_origin_size(Point::ZERO, Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            ROW_COUNT,
            ROW_HEIGHT,
        );

        Self {
            runtime,
            list,
            button,
            input: PointerDispatcher::new(),
            target: None,
            started: Instant::now(),
        }
    }

    /// Bottom-right placement with a 16dp margin.
    fn layout(&mut self) {
        let resting_y = SCREEN_HEIGHT - self.button.diameter_px() - MARGIN_DP * DENSITY;
        self.button.set_y(resting_y);
        self.button.on_attached();
        self.runtime.run_layout_pass();
        self.button.attach_to_scrollable_region(&mut self.list);
    }

    fn draw(&self) {
        if !self.button.is_invalidated() {
            return;
        }
        let mut scope = DrawScopeDefault::new(self.button.measured_size());
        self.button.draw(&mut scope);
        log::debug!("drew button ({:?} layer)", scope.layer_type());
        for primitive in scope.primitives() {
            match primitive {
                DrawPrimitive::Circle { center, radius, .. } => {
                    log::debug!("  circle at ({}, {}) r={radius}", center.x, center.y)
                }
                DrawPrimitive::Image { rect, .. } => {
                    log::debug!("  icon {}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y)
                }
            }
        }
    }

    fn button_bounds(&self) -> Rect {
        let diameter = self.button.diameter_px();
        Rect::from_origin_size(
            Point::new(SCREEN_WIDTH - diameter - MARGIN_DP * DENSITY, self.button.y()),
            Size::square(diameter),
        )
    }

    fn touch(&mut self, kind: PointerEventKind, x: f32, y: f32) {
        self.input.push(PointerEvent::at_screen(kind, Point::new(x, y)));
    }

    /// Routes queued events to whichever view took the gesture's down.
    fn pump_input(&mut self) {
        let mut input = std::mem::take(&mut self.input);
        input.drain(|_, event| {
            let bounds = self.button_bounds();
            let target = match (event.kind, self.target) {
                (PointerEventKind::Down, _) | (_, None) => {
                    let raw = event.raw_position;
                    let hit = if bounds.contains(raw.x, raw.y) {
                        Target::Button
                    } else {
                        Target::List
                    };
                    self.target = Some(hit);
                    hit
                }
                (_, Some(target)) => target,
            };
            match target {
                Target::Button => {
                    let raw = event.raw_position;
                    let local = Point::new(raw.x - bounds.x, raw.y - bounds.y);
                    self.button
                        .on_pointer_event(&event.copy_with_local_position(local));
                }
                Target::List => self.list.dispatch(&event),
            }
            if matches!(event.kind, PointerEventKind::Up | PointerEventKind::Cancel) {
                self.target = None;
            }
            self.draw();
        });
        self.input = input;
    }

    fn tap_button(&mut self) {
        let center = self.button_bounds().center();
        self.touch(PointerEventKind::Down, center.x, center.y);
        self.touch(PointerEventKind::Up, center.x, center.y);
        self.pump_input();
    }

    fn swipe(&mut self, from_y: f32, to_y: f32, steps: usize) {
        let x = SCREEN_WIDTH / 2.0;
        self.touch(PointerEventKind::Down, x, from_y);
        for step in 0..=steps {
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            self.touch(PointerEventKind::Move, x, y);
        }
        self.touch(PointerEventKind::Up, x, to_y);
        self.pump_input();
        log::info!(
            "swipe {from_y} -> {to_y}: list at row {}, button released at y={}",
            self.list.first_visible_item(),
            self.button.y()
        );
    }

    fn run_frames(&self) {
        let handle = self.runtime.handle();
        while handle.has_frame_callbacks() {
            let now = self.started.elapsed().as_nanos() as u64;
            handle.drain_frame_callbacks(now);
            self.draw();
            std::thread::sleep(FRAME_INTERVAL);
        }
        log::info!("button settled at y={}", self.button.y());
    }
}

fn icon_png() -> Result<Vec<u8>, Box<dyn Error>> {
    let icon = RgbaImage::from_fn(48, 48, |x, y| {
        let on_bar = (20..28).contains(&x) || (20..28).contains(&y);
        if on_bar {
            Rgba([33, 150, 243, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    icon.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(feature = "logging")]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging() {}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    println!("=== Floating action button demo ===");
    println!("Set RUST_LOG=debug to see drag sessions and draw output.");
    println!();

    let mut assets = AssetManager::new();
    assets.register(ICON_ID, icon_png()?);

    let mut host = DemoHost::new(&assets);
    host.layout();
    host.draw();
    log::info!(
        "button resting at y={:?}, hides at y={:?}",
        host.button.resting_y(),
        host.button.screen_max_y()
    );

    host.tap_button();

    // Finger moves up: list scrolls forward, button slides off screen.
    host.swipe(1400.0, 900.0, 10);
    host.run_frames();

    // Finger moves down: button comes back.
    host.swipe(700.0, 1100.0, 10);
    host.run_frames();

    host.tap_button();
    host.button.on_detached();
    Ok(())
}
