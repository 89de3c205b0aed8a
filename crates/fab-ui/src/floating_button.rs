//! The floating action button widget.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fab_animation::Animatable;
use fab_assets::{AssetManager, ResourceId};
use fab_core::RuntimeHandle;
use fab_foundation::{PointerEvent, PointerEventKind, ScrollableRegion};
use fab_ui_graphics::{DrawScope, FilterQuality, ImageBitmap, LayerType, Point, Size};
use image::DynamicImage;
use smallvec::SmallVec;

use crate::config::{DisplayMetrics, FloatingButtonConfig};
use crate::drag_follow::{DragFollow, DragSession, DragStep, SettleTarget, TravelBounds};
use crate::icon::{self, IconError};
use crate::view::View;

type PressListener = Rc<RefCell<dyn FnMut()>>;

/// Circular action button that can ride along with a scrolling list.
///
/// `FloatingButton` is a cheap handle; clones refer to the same widget.
/// The host positions it with [`FloatingButton::set_y`], forwards the
/// [`View`] callbacks and drives the runtime's frames and layout passes.
#[derive(Clone)]
pub struct FloatingButton {
    inner: Rc<RefCell<FloatingButtonInner>>,
}

struct FloatingButtonInner {
    config: FloatingButtonConfig,
    display: DisplayMetrics,
    runtime: RuntimeHandle,
    diameter_px: f32,
    icon_px: u32,
    y: f32,
    bounds: Option<TravelBounds>,
    icon: Option<ImageBitmap>,
    listeners: SmallVec<[PressListener; 2]>,
    drag: DragFollow,
    settle: Animatable<f32>,
    // Bumped on every attach and on detach; interceptors holding an older
    // value ignore their region's events.
    attachment: u64,
    measure_posted: bool,
    invalidated: bool,
}

impl FloatingButton {
    pub fn new(
        runtime: RuntimeHandle,
        display: DisplayMetrics,
        config: FloatingButtonConfig,
    ) -> Self {
        let diameter_px = display.density.dp_to_px(config.size).0;
        let icon_px = config.icon_ratio.edge_px(diameter_px);
        let settle = Animatable::new(0.0f32, runtime.clone());

        let inner = Rc::new(RefCell::new(FloatingButtonInner {
            config,
            display,
            runtime,
            diameter_px,
            icon_px,
            y: 0.0,
            bounds: None,
            icon: None,
            listeners: SmallVec::new(),
            drag: DragFollow::new(),
            settle: settle.clone(),
            attachment: 0,
            measure_posted: false,
            invalidated: true,
        }));

        let weak = Rc::downgrade(&inner);
        settle.set_update_listener(move |y| {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                inner.y = y;
                inner.invalidated = true;
            }
        });

        Self { inner }
    }

    pub fn config(&self) -> FloatingButtonConfig {
        self.inner.borrow().config
    }

    pub fn diameter_px(&self) -> f32 {
        self.inner.borrow().diameter_px
    }

    pub fn icon_px(&self) -> u32 {
        self.inner.borrow().icon_px
    }

    /// Current top edge in screen coordinates.
    pub fn y(&self) -> f32 {
        self.inner.borrow().y
    }

    /// Places the button. Hosts call this while laying out.
    pub fn set_y(&self, y: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.y = y;
        inner.invalidated = true;
    }

    pub fn travel_bounds(&self) -> Option<TravelBounds> {
        self.inner.borrow().bounds
    }

    pub fn resting_y(&self) -> Option<f32> {
        self.travel_bounds().map(|bounds| bounds.resting_y)
    }

    pub fn screen_max_y(&self) -> Option<f32> {
        self.travel_bounds().map(|bounds| bounds.max_y)
    }

    pub fn drag_session(&self) -> DragSession {
        self.inner.borrow().drag.session()
    }

    pub fn is_settling(&self) -> bool {
        self.settle().is_running()
    }

    pub fn center_icon(&self) -> Option<ImageBitmap> {
        self.inner.borrow().icon.clone()
    }

    /// Replaces the icon with `image` scaled to the icon square. A missing
    /// image keeps the current icon.
    pub fn set_center_icon_bitmap(&self, image: Option<DynamicImage>) {
        let result = image.ok_or(IconError::Empty);
        self.apply_icon(result);
    }

    pub fn set_center_icon_resource(&self, assets: &AssetManager, id: ResourceId) {
        self.apply_icon(icon::load_resource_icon(assets, id));
    }

    fn apply_icon(&self, image: Result<DynamicImage, IconError>) {
        let edge = self.icon_px();
        let scaled = image.and_then(|image| icon::scale_icon(&image, edge));

        let mut inner = self.inner.borrow_mut();
        match scaled {
            Ok(bitmap) => {
                if let Some(previous) = inner.icon.replace(bitmap) {
                    previous.recycle();
                }
            }
            Err(err) => log::warn!("keeping previous icon: {err}"),
        }
        inner.invalidated = true;
    }

    /// Registers `listener` to run on every press. Listeners run in the
    /// order they were added; adding the same closure twice runs it twice.
    pub fn add_press_listener(&self, listener: impl FnMut() + 'static) {
        let listener: PressListener = Rc::new(RefCell::new(listener));
        self.inner.borrow_mut().listeners.push(listener);
    }

    pub fn press_listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Makes the button follow drags on `region`.
    ///
    /// The interceptor never consumes events, so the region keeps
    /// scrolling. It holds only a weak reference to the button. Only the
    /// most recent attachment drives the button; earlier regions keep an
    /// interceptor that does nothing, as does every region once the button
    /// is detached.
    pub fn attach_to_scrollable_region(&self, region: &mut dyn ScrollableRegion) {
        let attachment = {
            let mut inner = self.inner.borrow_mut();
            inner.attachment += 1;
            inner.drag = DragFollow::new();
            inner.attachment
        };
        let weak = Rc::downgrade(&self.inner);
        region.set_pointer_interceptor(Rc::new(move |event: &PointerEvent| {
            on_region_event(&weak, attachment, event);
        }));
    }

    fn settle(&self) -> Animatable<f32> {
        self.inner.borrow().settle.clone()
    }

    fn notify_press(&self) {
        let listeners = self.inner.borrow().listeners.clone();
        log::debug!("button pressed; notifying {} listener(s)", listeners.len());
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(),
                Err(_) => log::warn!("press listener re-entered; skipping"),
            }
        }
    }

    fn measure(weak: &Weak<RefCell<FloatingButtonInner>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        if inner.bounds.is_some() {
            return;
        }
        let bounds = TravelBounds::new(inner.y, inner.display.screen_height);
        log::debug!(
            "button geometry measured: resting {} max {}",
            bounds.resting_y,
            bounds.max_y
        );
        inner.bounds = Some(bounds);
    }
}

fn on_region_event(
    weak: &Weak<RefCell<FloatingButtonInner>>,
    attachment: u64,
    event: &PointerEvent,
) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (current, bounds) = {
        let inner = inner.borrow();
        (inner.attachment, inner.bounds)
    };
    if current != attachment {
        log::trace!("event from a stale region attachment; ignoring");
        return;
    }
    let Some(bounds) = bounds else {
        log::debug!("region event before button layout; ignoring");
        return;
    };
    let touch_y = event.raw_y();

    let settle_to = match event.kind {
        PointerEventKind::Down => None,
        PointerEventKind::Move => {
            let step = {
                let mut inner = inner.borrow_mut();
                let button_y = inner.y;
                inner.drag.on_move(touch_y, button_y, &bounds)
            };
            match step {
                DragStep::Started => {
                    let settle = inner.borrow().settle.clone();
                    settle.stop();
                    log::debug!("drag session started at {touch_y}");
                }
                DragStep::Moved(y) => {
                    let mut inner = inner.borrow_mut();
                    inner.y = y;
                    inner.invalidated = true;
                    log::trace!("button follows drag to {y}");
                }
            }
            None
        }
        PointerEventKind::Up => inner.borrow_mut().drag.on_release(touch_y),
        PointerEventKind::Cancel => inner.borrow_mut().drag.on_cancel(),
    };

    if let Some(target) = settle_to {
        start_settle(&inner, target, &bounds);
    }
}

fn start_settle(
    inner: &Rc<RefCell<FloatingButtonInner>>,
    target: SettleTarget,
    bounds: &TravelBounds,
) {
    let (settle, from, spec) = {
        let inner = inner.borrow();
        (inner.settle.clone(), inner.y, inner.config.settle_animation)
    };
    let to = target.y(bounds);
    log::debug!("drag session ended; settling {target:?} from {from} to {to}");
    settle.animate(from, to, spec);
}

impl View for FloatingButton {
    fn on_attached(&self) {
        let runtime = {
            let mut inner = self.inner.borrow_mut();
            if inner.measure_posted {
                return;
            }
            inner.measure_posted = true;
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(&self.inner);
        runtime.post_after_layout(move || FloatingButton::measure(&weak));
    }

    fn on_pointer_event(&self, event: &PointerEvent) {
        event.consume();
        if event.kind == PointerEventKind::Up {
            self.notify_press();
        }
    }

    fn draw(&self, scope: &mut dyn DrawScope) {
        let mut inner = self.inner.borrow_mut();
        inner.invalidated = false;

        scope.set_layer_type(LayerType::Software);
        let half = inner.diameter_px / 2.0;
        scope.draw_circle(
            Point::new(half, half),
            half,
            inner.config.background,
            Some(inner.config.shadow),
            true,
        );

        match inner.icon.as_ref() {
            Some(icon) => {
                let top_left = Point::new(
                    half - icon.width() as f32 / 2.0,
                    half - icon.height() as f32 / 2.0,
                );
                scope.draw_image(icon, top_left, FilterQuality::None);
            }
            None => log::warn!("no center icon set; drawing background only"),
        }
    }

    fn on_detached(&self) {
        let settle = {
            let mut inner = self.inner.borrow_mut();
            if let Some(icon) = inner.icon.take() {
                icon.recycle();
            }
            inner.drag = DragFollow::new();
            inner.attachment += 1;
            inner.settle.clone()
        };
        settle.stop();
    }

    fn measured_size(&self) -> Size {
        Size::square(self.inner.borrow().diameter_px)
    }

    fn is_invalidated(&self) -> bool {
        self.inner.borrow().invalidated
    }

    fn clear_invalidation(&self) {
        self.inner.borrow_mut().invalidated = false;
    }
}

#[cfg(test)]
#[path = "tests/floating_button_tests.rs"]
mod tests;
