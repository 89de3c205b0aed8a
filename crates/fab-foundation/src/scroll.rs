//! Vertically scrollable regions and the interceptor hook other views use
//! to observe their gestures.

use std::rc::Rc;

use fab_ui_graphics::Rect;

use crate::input::{PointerEvent, PointerEventKind};

/// Observer installed on a scrollable region. It sees every pointer event
/// before the region scrolls; calling [`PointerEvent::consume`] from it
/// keeps the region from scrolling for that event.
pub type PointerInterceptor = Rc<dyn Fn(&PointerEvent)>;

/// A region that scrolls vertically in response to drags and accepts one
/// pointer interceptor.
pub trait ScrollableRegion {
    /// Install `interceptor`, replacing any previously installed one.
    fn set_pointer_interceptor(&mut self, interceptor: PointerInterceptor);

    fn clear_pointer_interceptor(&mut self);
}

/// A list of fixed-height rows inside a viewport.
pub struct ScrollRegion {
    bounds: Rect,
    item_count: usize,
    item_height: f32,
    offset: f32,
    drag_anchor_y: Option<f32>,
    interceptor: Option<PointerInterceptor>,
}

impl ScrollRegion {
    pub fn new(bounds: Rect, item_count: usize, item_height: f32) -> Self {
        Self {
            bounds,
            item_count,
            item_height: item_height.max(1.0),
            offset: 0.0,
            drag_anchor_y: None,
            interceptor: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn scroll_offset(&self) -> f32 {
        self.offset
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.item_count as f32 * self.item_height - self.bounds.height).max(0.0)
    }

    pub fn first_visible_item(&self) -> usize {
        ((self.offset / self.item_height) as usize).min(self.item_count.saturating_sub(1))
    }

    pub fn has_interceptor(&self) -> bool {
        self.interceptor.is_some()
    }

    /// Scrolls by `delta` pixels (positive moves content up) and returns the
    /// amount actually consumed after clamping.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let previous = self.offset;
        self.offset = (self.offset + delta).clamp(0.0, self.max_scroll_offset());
        self.offset - previous
    }

    /// Routes `event` through the interceptor, then through the region's own
    /// drag-to-scroll handling unless the interceptor consumed it.
    pub fn dispatch(&mut self, event: &PointerEvent) {
        // Cloned so the interceptor may replace itself while running.
        if let Some(interceptor) = self.interceptor.clone() {
            interceptor(event);
        }
        if event.is_consumed() {
            return;
        }

        let y = event.raw_y();
        match event.kind {
            PointerEventKind::Down => self.drag_anchor_y = Some(y),
            PointerEventKind::Move => {
                let anchor = self.drag_anchor_y.unwrap_or(y);
                self.scroll_by(anchor - y);
                self.drag_anchor_y = Some(y);
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.drag_anchor_y = None,
        }
    }
}

impl ScrollableRegion for ScrollRegion {
    fn set_pointer_interceptor(&mut self, interceptor: PointerInterceptor) {
        if self.interceptor.is_some() {
            log::debug!("replacing pointer interceptor on scroll region");
        }
        self.interceptor = Some(interceptor);
    }

    fn clear_pointer_interceptor(&mut self) {
        self.interceptor = None;
    }
}
