use super::*;
use crate::config::DisplayMetrics;
use fab_core::Runtime;
use fab_foundation::ScrollRegion;
use fab_ui_graphics::{Color, DrawPrimitive, DrawScopeDefault, Rect};
use image::{Rgba, RgbaImage};
use std::cell::Cell;

const FRAME_NANOS: u64 = 16_000_000;

fn button(runtime: &Runtime) -> FloatingButton {
    FloatingButton::new(
        runtime.handle(),
        DisplayMetrics::new(1.0, 1600.0),
        FloatingButtonConfig::default(),
    )
}

fn laid_out(runtime: &Runtime, y: f32) -> FloatingButton {
    let button = button(runtime);
    button.set_y(y);
    button.on_attached();
    runtime.run_layout_pass();
    button
}

fn region() -> ScrollRegion {
    ScrollRegion::new(
        Rect::from_origin_size(Point::ZERO, Size::new(400.0, 1600.0)),
        100,
        48.0,
    )
}

fn at(kind: PointerEventKind, y: f32) -> PointerEvent {
    PointerEvent::at_screen(kind, Point::new(200.0, y))
}

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
}

fn run_frames(runtime: &Runtime, frames: u64) {
    let handle = runtime.handle();
    for frame in 0..frames {
        handle.drain_frame_callbacks(frame * FRAME_NANOS);
    }
}

#[test]
fn diameter_and_icon_follow_density() {
    let runtime = Runtime::default();
    let button = FloatingButton::new(
        runtime.handle(),
        DisplayMetrics::new(2.0, 1600.0),
        FloatingButtonConfig::default(),
    );
    assert_eq!(button.diameter_px(), 112.0);
    assert_eq!(button.icon_px(), 40);
    assert_eq!(button.measured_size(), Size::square(112.0));
}

#[test]
fn geometry_is_measured_once_after_layout() {
    let runtime = Runtime::default();
    let button = button(&runtime);
    button.set_y(800.0);
    button.on_attached();
    assert_eq!(button.travel_bounds(), None);

    assert_eq!(runtime.run_layout_pass(), 1);
    assert_eq!(button.resting_y(), Some(800.0));
    assert_eq!(button.screen_max_y(), Some(1600.0));

    button.set_y(900.0);
    button.on_attached();
    assert_eq!(runtime.run_layout_pass(), 0);
    assert_eq!(button.resting_y(), Some(800.0));
}

#[test]
fn release_notifies_listeners_in_order() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let calls = Rc::new(RefCell::new(Vec::new()));
    for tag in ["a", "b", "a"] {
        let calls = Rc::clone(&calls);
        button.add_press_listener(move || calls.borrow_mut().push(tag));
    }

    let down = at(PointerEventKind::Down, 820.0);
    button.on_pointer_event(&down);
    assert!(calls.borrow().is_empty());
    assert!(down.is_consumed());

    button.on_pointer_event(&at(PointerEventKind::Up, 820.0));
    assert_eq!(*calls.borrow(), vec!["a", "b", "a"]);
}

#[test]
fn listener_added_during_press_runs_next_time() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let late_calls = Rc::new(Cell::new(0));
    {
        let handle = button.clone();
        let late_calls = Rc::clone(&late_calls);
        button.add_press_listener(move || {
            let late_calls = Rc::clone(&late_calls);
            handle.add_press_listener(move || late_calls.set(late_calls.get() + 1));
        });
    }

    button.on_pointer_event(&at(PointerEventKind::Up, 820.0));
    assert_eq!(late_calls.get(), 0);
    assert_eq!(button.press_listener_count(), 2);

    button.on_pointer_event(&at(PointerEventKind::Up, 820.0));
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn draw_records_circle_then_centered_icon() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    button.set_center_icon_bitmap(Some(solid(64, 32)));
    assert!(button.is_invalidated());

    let mut scope = DrawScopeDefault::new(button.measured_size());
    button.draw(&mut scope);
    assert!(!button.is_invalidated());
    assert_eq!(scope.layer_type(), LayerType::Software);

    let primitives = scope.into_primitives();
    assert_eq!(primitives.len(), 2);
    match &primitives[0] {
        DrawPrimitive::Circle {
            center,
            radius,
            color,
            shadow,
            anti_alias,
        } => {
            assert_eq!(*center, Point::new(28.0, 28.0));
            assert_eq!(*radius, 28.0);
            assert_eq!(*color, Color::WHITE);
            assert_eq!(shadow.map(|s| s.blur_radius), Some(5.0));
            assert!(*anti_alias);
        }
        other => panic!("expected circle, got {other:?}"),
    }
    match &primitives[1] {
        DrawPrimitive::Image { rect, filter, .. } => {
            assert_eq!(*rect, Rect::from_origin_size(Point::new(18.0, 18.0), Size::square(20.0)));
            assert_eq!(*filter, FilterQuality::None);
        }
        other => panic!("expected image, got {other:?}"),
    }
}

#[test]
fn draw_without_icon_skips_icon_layer() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut scope = DrawScopeDefault::new(button.measured_size());
    button.draw(&mut scope);
    assert_eq!(scope.primitives().len(), 1);
}

#[test]
fn missing_icon_keeps_previous_and_invalidates() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    button.set_center_icon_bitmap(Some(solid(8, 8)));
    let first = button.center_icon().expect("icon set");
    button.clear_invalidation();

    button.set_center_icon_bitmap(None);
    button.set_center_icon_resource(&AssetManager::new(), ResourceId(42));

    let kept = button.center_icon().expect("icon kept");
    assert!(kept.same_pixels(&first));
    assert!(!kept.is_recycled());
    assert!(button.is_invalidated());
}

#[test]
fn replacing_icon_releases_old_pixels() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    button.set_center_icon_bitmap(Some(solid(8, 8)));
    let first = button.center_icon().expect("icon set");

    button.set_center_icon_bitmap(Some(solid(16, 16)));
    assert!(first.is_recycled());
    assert!(!button.center_icon().expect("new icon").is_recycled());
}

#[test]
fn detach_recycles_icon_and_stops_settle() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    button.set_center_icon_bitmap(Some(solid(8, 8)));
    let icon = button.center_icon().expect("icon set");

    let mut list = region();
    button.attach_to_scrollable_region(&mut list);
    list.dispatch(&at(PointerEventKind::Move, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 450.0));
    list.dispatch(&at(PointerEventKind::Up, 400.0));
    assert!(button.is_settling());

    button.on_detached();
    assert!(icon.is_recycled());
    assert!(button.center_icon().is_none());
    assert!(!button.is_settling());

    let mut scope = DrawScopeDefault::new(button.measured_size());
    button.draw(&mut scope);
    assert!(scope
        .primitives()
        .iter()
        .all(|p| !matches!(p, DrawPrimitive::Image { .. })));
}

#[test]
fn drag_up_hides_button() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut list = region();
    button.attach_to_scrollable_region(&mut list);

    list.dispatch(&at(PointerEventKind::Down, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 500.0));
    assert!(matches!(button.drag_session(), DragSession::Tracking { .. }));
    list.dispatch(&at(PointerEventKind::Move, 450.0));
    assert_eq!(button.y(), 850.0);

    list.dispatch(&at(PointerEventKind::Up, 400.0));
    assert_eq!(button.drag_session(), DragSession::Idle);
    assert!(button.is_settling());

    run_frames(&runtime, 30);
    assert_eq!(button.y(), 1600.0);
    assert!(!button.is_settling());
    assert!(list.scroll_offset() > 0.0);
}

#[test]
fn drag_down_reveals_button() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut list = region();
    button.attach_to_scrollable_region(&mut list);

    list.dispatch(&at(PointerEventKind::Move, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 600.0));
    assert_eq!(button.y(), 800.0);
    list.dispatch(&at(PointerEventKind::Up, 650.0));

    run_frames(&runtime, 30);
    assert_eq!(button.y(), 800.0);
}

#[test]
fn events_before_layout_are_ignored() {
    let runtime = Runtime::default();
    let button = button(&runtime);
    button.set_y(800.0);
    let mut list = region();
    button.attach_to_scrollable_region(&mut list);

    list.dispatch(&at(PointerEventKind::Move, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 300.0));
    assert_eq!(button.y(), 800.0);
    assert_eq!(button.drag_session(), DragSession::Idle);
}

#[test]
fn dropped_button_leaves_inert_interceptor() {
    let runtime = Runtime::default();
    let mut list = region();
    {
        let button = laid_out(&runtime, 800.0);
        button.attach_to_scrollable_region(&mut list);
    }
    list.dispatch(&at(PointerEventKind::Down, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 400.0));
    assert_eq!(list.scroll_offset(), 100.0);
}

#[test]
fn reattaching_silences_previous_list() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut first = region();
    let mut second = region();
    button.attach_to_scrollable_region(&mut first);
    button.attach_to_scrollable_region(&mut second);

    first.dispatch(&at(PointerEventKind::Move, 500.0));
    first.dispatch(&at(PointerEventKind::Move, 300.0));
    first.dispatch(&at(PointerEventKind::Up, 300.0));
    assert_eq!(button.y(), 800.0);
    assert_eq!(button.drag_session(), DragSession::Idle);
    assert!(!button.is_settling());
    assert_eq!(first.scroll_offset(), 200.0);

    second.dispatch(&at(PointerEventKind::Move, 500.0));
    second.dispatch(&at(PointerEventKind::Move, 300.0));
    assert_eq!(button.y(), 1000.0);
}

#[test]
fn reattaching_mid_drag_drops_open_session() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut first = region();
    let mut second = region();
    button.attach_to_scrollable_region(&mut first);
    first.dispatch(&at(PointerEventKind::Move, 500.0));
    assert!(matches!(button.drag_session(), DragSession::Tracking { .. }));

    button.attach_to_scrollable_region(&mut second);
    assert_eq!(button.drag_session(), DragSession::Idle);
    second.dispatch(&at(PointerEventKind::Up, 300.0));
    assert!(!button.is_settling());
}

#[test]
fn detached_button_ignores_list_drags() {
    let runtime = Runtime::default();
    let button = laid_out(&runtime, 800.0);
    let mut list = region();
    button.attach_to_scrollable_region(&mut list);

    button.on_detached();
    list.dispatch(&at(PointerEventKind::Move, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 300.0));
    list.dispatch(&at(PointerEventKind::Up, 300.0));
    assert_eq!(button.y(), 800.0);
    assert_eq!(button.drag_session(), DragSession::Idle);
    assert!(!button.is_settling());
    assert!(!runtime.handle().has_frame_callbacks());
    assert_eq!(list.scroll_offset(), 200.0);

    button.attach_to_scrollable_region(&mut list);
    list.dispatch(&at(PointerEventKind::Move, 500.0));
    list.dispatch(&at(PointerEventKind::Move, 450.0));
    assert_eq!(button.y(), 850.0);
}
