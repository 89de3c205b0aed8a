use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CountingScheduler {
    requests: Cell<usize>,
}

impl FrameScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

#[test]
fn frame_callbacks_run_once_in_registration_order() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let log = Rc::new(RefCell::new(Vec::new()));

    for tag in ["a", "b", "c"] {
        let log = Rc::clone(&log);
        handle.register_frame_callback(move |time| log.borrow_mut().push((tag, time)));
    }
    assert!(runtime.needs_frame());

    handle.drain_frame_callbacks(16);
    handle.drain_frame_callbacks(32);

    assert_eq!(*log.borrow(), vec![("a", 16), ("b", 16), ("c", 16)]);
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelled_callback_never_fires() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    let id = {
        let fired = Rc::clone(&fired);
        handle
            .register_frame_callback(move |_| fired.set(true))
            .expect("runtime alive")
    };
    handle.cancel_frame_callback(id);
    handle.drain_frame_callbacks(0);

    assert!(!fired.get());
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |time| {
            frames.borrow_mut().push(time);
            let frames = Rc::clone(&frames);
            inner_handle.register_frame_callback(move |time| frames.borrow_mut().push(time));
        });
    }

    handle.drain_frame_callbacks(1);
    assert_eq!(*frames.borrow(), vec![1]);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(2);
    assert_eq!(*frames.borrow(), vec![1, 2]);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::default();
    let clock = runtime.handle().frame_clock();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.set(true))
    };
    assert!(registration.is_active());
    drop(registration);

    runtime.handle().drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn after_layout_tasks_run_once_on_layout_pass() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let runs = Rc::new(Cell::new(0));

    {
        let runs = Rc::clone(&runs);
        handle.post_after_layout(move || runs.set(runs.get() + 1));
    }
    assert_eq!(runs.get(), 0);

    assert_eq!(runtime.run_layout_pass(), 1);
    assert_eq!(runtime.run_layout_pass(), 0);
    assert_eq!(runs.get(), 1);
}

#[test]
fn scheduler_is_asked_for_frames() {
    let scheduler = Rc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let handle = runtime.handle();

    handle.register_frame_callback(|_| {});
    handle.post_after_layout(|| {});

    assert_eq!(scheduler.requests.get(), 2);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let handle = {
        let runtime = Runtime::default();
        runtime.handle()
    };

    assert!(!handle.is_alive());
    assert!(handle.register_frame_callback(|_| {}).is_none());
    handle.post_after_layout(|| panic!("must not run"));
    handle.drain_frame_callbacks(0);
    assert!(!handle.needs_frame());
}
