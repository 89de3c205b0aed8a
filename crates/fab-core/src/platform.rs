//! Platform abstraction for runtime scheduling.
//!
//! The host windowing layer owns the real vsync/choreographer loop. The
//! runtime only tells it that a frame is wanted.

/// Schedules frames on behalf of the runtime.
///
/// Implementations forward the request to whatever drives frames on the
/// host (a choreographer callback, a winit redraw request, a test loop).
pub trait FrameScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

#[derive(Default)]
pub struct DefaultScheduler;

impl FrameScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
