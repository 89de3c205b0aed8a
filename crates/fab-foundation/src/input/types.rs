use fab_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event with consumption tracking.
///
/// `position` is local to the view receiving the event; `raw_position` is
/// in screen coordinates and does not change as the event is routed.
/// Handlers that want to stop the event from reaching the target's own
/// handling call [`PointerEvent::consume`].
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub raw_position: Point,
    /// Shared via Rc<Cell> so consumption is visible across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, raw_position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            raw_position,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    /// Event whose local and screen positions coincide.
    pub fn at_screen(kind: PointerEventKind, raw_position: Point) -> Self {
        Self::new(kind, raw_position, raw_position)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn raw_y(&self) -> f32 {
        self.raw_position.y
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Creates a copy of this event with a new local position, sharing the consumption state.
    pub fn copy_with_local_position(&self, position: Point) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            position,
            raw_position: self.raw_position,
            consumed: self.consumed.clone(),
        }
    }
}
