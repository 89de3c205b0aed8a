//! Runtime services for the floating action button.
//!
//! Everything here is single-threaded and cooperative: the host drives
//! frames with [`RuntimeHandle::drain_frame_callbacks`] and signals finished
//! layout passes with [`Runtime::run_layout_pass`]. Nothing blocks and
//! nothing runs on a background thread.

mod frame_clock;
mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{DefaultScheduler, FrameScheduler};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{Runtime, RuntimeHandle};
}
