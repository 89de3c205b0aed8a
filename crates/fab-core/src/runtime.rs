use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, FrameScheduler};
use crate::FrameCallbackId;

pub(crate) struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Rc<dyn FrameScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    // One-shot tasks that run once the host has finished a layout pass.
    after_layout: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            after_layout: RefCell::new(VecDeque::new()),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        let callbacks_empty = callbacks.is_empty();
        drop(callbacks);
        if callbacks_empty && self.after_layout.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() && self.after_layout.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn post_after_layout(&self, task: Box<dyn FnOnce() + 'static>) {
        self.after_layout.borrow_mut().push_back(task);
        self.schedule();
    }

    fn run_layout_pass(&self) -> usize {
        // Tasks posted while running wait for the next pass.
        let tasks: Vec<_> = self.after_layout.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        if !self.has_frame_callbacks() && self.after_layout.borrow().is_empty() {
            self.needs_frame.set(false);
        }
        count
    }
}

/// Owner of the runtime state. Dropping it invalidates every handle.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Signals that the host finished laying out its views and runs every
    /// task posted with [`RuntimeHandle::post_after_layout`].
    ///
    /// Returns the number of tasks that ran.
    pub fn run_layout_pass(&self) -> usize {
        self.inner.run_layout_pass()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Rc::new(DefaultScheduler))
    }
}

/// Weak handle to the [`Runtime`]. Operations on a handle whose runtime has
/// been dropped are silently ignored.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Defers `task` until the host's next layout pass completes.
    ///
    /// Used for measurements that need final view positions. The task runs
    /// exactly once. If the runtime is gone the task is dropped unrun.
    pub fn post_after_layout(&self, task: impl FnOnce() + 'static) {
        match self.inner.upgrade() {
            Some(inner) => inner.post_after_layout(Box::new(task)),
            None => log::debug!("runtime dropped; discarding after-layout task"),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
