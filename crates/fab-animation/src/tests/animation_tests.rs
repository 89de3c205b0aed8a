use super::*;

use fab_core::Runtime;
use std::cell::RefCell;
use std::rc::Rc;

const MS: u64 = 1_000_000;

fn recorded(animatable: &Animatable<f32>) -> Rc<RefCell<Vec<f32>>> {
    let samples = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&samples);
    animatable.set_update_listener(move |value| sink.borrow_mut().push(value));
    samples
}

fn linear(duration_millis: u64) -> AnimationSpec {
    AnimationSpec::tween(duration_millis, Easing::LinearEasing)
}

fn run_frames(runtime: &Runtime, from_ms: u64, to_ms: u64, step_ms: u64) {
    let handle = runtime.handle();
    let mut time = from_ms;
    while time <= to_ms {
        handle.drain_frame_callbacks(time * MS);
        time += step_ms;
    }
}

#[test]
fn tween_interpolates_over_time() {
    let runtime = Runtime::default();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let samples = recorded(&animatable);

    animatable.animate_to(1.0, linear(300));
    assert!(animatable.is_running());
    assert!(runtime.needs_frame());

    run_frames(&runtime, 0, 400, 16);

    let samples = samples.borrow();
    assert_eq!(samples.first().copied(), Some(0.0));
    assert!(samples.iter().any(|v| *v > 0.0 && *v < 1.0));
    assert_eq!(samples.last().copied(), Some(1.0));
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    assert!(!animatable.is_running());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn linear_tween_hits_midpoint_at_half_duration() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let animatable = Animatable::new(800.0f32, handle.clone());

    animatable.animate_to(1600.0, linear(300));
    handle.drain_frame_callbacks(1_000 * MS);
    handle.drain_frame_callbacks(1_150 * MS);

    assert!((animatable.value() - 1200.0).abs() < 0.01);
}

#[test]
fn restarting_cancels_previous_animation() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let animatable = Animatable::new(0.0f32, handle.clone());
    let samples = recorded(&animatable);

    animatable.animate_to(100.0, linear(300));
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(150 * MS);
    let reached = animatable.value();
    assert!((reached - 50.0).abs() < 0.01);

    animatable.animate_to(-50.0, linear(300));
    assert!(animatable.is_running());

    let before_second = samples.borrow().len();
    run_frames(&runtime, 200, 700, 16);

    let samples = samples.borrow();
    let second_run = &samples[before_second..];
    assert!(second_run.iter().all(|v| *v <= reached && *v >= -50.0));
    assert_eq!(samples.last().copied(), Some(-50.0));
    assert_eq!(animatable.value(), -50.0);
}

#[test]
fn stop_freezes_value_and_drops_frame() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let animatable = Animatable::new(0.0f32, handle.clone());

    animatable.animate_to(10.0, linear(100));
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(50 * MS);
    animatable.stop();

    assert!(!animatable.is_running());
    assert!(!handle.has_frame_callbacks());
    let frozen = animatable.value();
    handle.drain_frame_callbacks(500 * MS);
    assert_eq!(animatable.value(), frozen);
}

#[test]
fn animate_starts_from_explicit_value() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let animatable = Animatable::new(0.0f32, handle.clone());
    let samples = recorded(&animatable);

    animatable.animate(850.0, 1600.0, linear(300));
    handle.drain_frame_callbacks(0);

    assert_eq!(*samples.borrow(), vec![850.0]);
}

#[test]
fn listener_stopping_animation_ends_it() {
    let runtime = Runtime::default();
    let handle = runtime.handle();
    let animatable = Animatable::new(0.0f32, handle.clone());
    {
        let this = animatable.clone();
        animatable.set_update_listener(move |value| {
            if value > 0.0 {
                this.stop();
            }
        });
    }

    animatable.animate_to(1.0, linear(100));
    handle.drain_frame_callbacks(0);
    handle.drain_frame_callbacks(16 * MS);

    assert!(!animatable.is_running());
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn accelerate_decelerate_is_symmetric() {
    let easing = Easing::AccelerateDecelerate;
    assert!(easing.transform(0.0).abs() < 1e-6);
    assert!((easing.transform(0.5) - 0.5).abs() < 1e-6);
    assert!((easing.transform(1.0) - 1.0).abs() < 1e-6);
    let early = easing.transform(0.25);
    let late = easing.transform(0.75);
    assert!((early + late - 1.0).abs() < 1e-5);
    assert!(early < 0.25, "starts slow");
}

#[test]
fn default_spec_is_three_hundred_millis_accelerate_decelerate() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::AccelerateDecelerate);
}
