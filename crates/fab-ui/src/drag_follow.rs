//! Scroll-follow state machine.
//!
//! While a finger drags over the attached list the button tracks it 1:1
//! between its resting position and the bottom of the screen. When the
//! finger lifts, the net direction of the gesture decides where the button
//! settles: finger moved down the screen reveals it, anything else hides it.
//!
//! A gesture starts on its first move event rather than on the down event.
//! Session state is explicit, so a gesture whose first raw Y is exactly 0
//! starts tracking like any other.

/// Vertical travel range of the button, measured once after first layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelBounds {
    /// Visible resting position.
    pub resting_y: f32,
    /// Hidden position at the bottom edge of the screen.
    pub max_y: f32,
}

impl TravelBounds {
    pub fn new(resting_y: f32, max_y: f32) -> Self {
        Self {
            resting_y,
            // A button laid out below the screen edge has nowhere to hide.
            max_y: max_y.max(resting_y),
        }
    }

    pub fn clamp(&self, y: f32) -> f32 {
        y.clamp(self.resting_y, self.max_y)
    }
}

/// Where a finished gesture sends the button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleTarget {
    Visible,
    Hidden,
}

impl SettleTarget {
    pub fn y(self, bounds: &TravelBounds) -> f32 {
        match self {
            SettleTarget::Visible => bounds.resting_y,
            SettleTarget::Hidden => bounds.max_y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragSession {
    #[default]
    Idle,
    Tracking {
        initial_touch_y: f32,
        initial_button_y: f32,
        last_touch_y: f32,
    },
}

/// Result of feeding a move event to [`DragFollow`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStep {
    /// The move opened a new session; the button stays where it is.
    Started,
    /// The button should jump to this Y.
    Moved(f32),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DragFollow {
    session: DragSession,
}

impl DragFollow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> DragSession {
        self.session
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.session, DragSession::Tracking { .. })
    }

    pub fn on_move(&mut self, touch_y: f32, button_y: f32, bounds: &TravelBounds) -> DragStep {
        match self.session {
            DragSession::Idle => {
                self.session = DragSession::Tracking {
                    initial_touch_y: touch_y,
                    initial_button_y: button_y,
                    last_touch_y: touch_y,
                };
                DragStep::Started
            }
            DragSession::Tracking {
                initial_touch_y: initial,
                initial_button_y,
                ref mut last_touch_y,
            } => {
                *last_touch_y = touch_y;
                let y = if initial < touch_y {
                    // Finger moving down the screen pulls the button back up.
                    (initial_button_y - (touch_y - initial)).max(bounds.resting_y)
                } else {
                    (initial_button_y + (initial - touch_y)).min(bounds.max_y)
                };
                DragStep::Moved(bounds.clamp(y))
            }
        }
    }

    /// Ends the session on pointer up. `None` when no session was open.
    pub fn on_release(&mut self, touch_y: f32) -> Option<SettleTarget> {
        match std::mem::take(&mut self.session) {
            DragSession::Idle => None,
            DragSession::Tracking {
                initial_touch_y, ..
            } => Some(if initial_touch_y < touch_y {
                SettleTarget::Visible
            } else {
                SettleTarget::Hidden
            }),
        }
    }

    /// Ends the session on pointer cancel, judging direction by the last
    /// reported move.
    pub fn on_cancel(&mut self) -> Option<SettleTarget> {
        match self.session {
            DragSession::Idle => None,
            DragSession::Tracking { last_touch_y, .. } => self.on_release(last_touch_y),
        }
    }
}
