//! Time-based animations with easing curves.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use fab_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Cosine ease in and out; the default interpolator of mobile property
    /// animators.
    AccelerateDecelerate,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::AccelerateDecelerate => {
                let fraction = fraction.clamp(0.0, 1.0);
                ((fraction + 1.0) * PI).cos() / 2.0 + 0.5
            }
        }
    }
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::AccelerateDecelerate)
    }
}

type UpdateListener<T> = Rc<dyn Fn(T)>;

/// Animated value holder.
///
/// At most one animation drives an `Animatable` at a time: starting a new
/// one cancels the pending frame of the previous one, and the new animation
/// continues from whatever value the old one had reached. Every frame's
/// value is pushed to the update listener.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    running: bool,
    // Bumped whenever the animation is restarted, snapped or stopped so a
    // frame that is already in flight can tell it has been superseded.
    generation: u64,
    on_update: Option<UpdateListener<T>>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            clock: runtime.frame_clock(),
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            registration: None,
            running: false,
            generation: 0,
            on_update: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Install the callback that receives every animated value.
    pub fn set_update_listener(&self, listener: impl Fn(T) + 'static) {
        self.inner.borrow_mut().on_update = Some(Rc::new(listener));
    }

    /// Animate from the current value to `target`.
    pub fn animate_to(&self, target: T, spec: AnimationSpec) {
        {
            let mut inner = self.inner.borrow_mut();

            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }

            inner.start = inner.current.clone();
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
            inner.running = true;
            inner.generation += 1;
        }

        Self::schedule_frame(&self.inner);
    }

    /// Jump to `from` without notifying, then animate to `to`.
    pub fn animate(&self, from: T, to: T, spec: AnimationSpec) {
        self.inner.borrow_mut().current = from;
        self.animate_to(to, spec);
    }

    /// Cancel any running animation, leaving the value where it is.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.running {
            log::trace!("animation cancelled");
        }
        Self::cancel_locked(&mut inner);
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Return the most recent animated value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    fn cancel_locked(inner: &mut AnimatableInner<T>) {
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.start_time_nanos = None;
        inner.running = false;
        inner.generation += 1;
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (value, listener, generation, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let spec = inner.spec;
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let animation_elapsed = frame_time_nanos.saturating_sub(start_time);
            let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
            let linear_progress =
                (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
            let finished = linear_progress >= 1.0;

            let new_value = if finished {
                inner.target.clone()
            } else {
                inner
                    .start
                    .lerp(&inner.target, spec.easing.transform(linear_progress))
            };
            inner.current = new_value.clone();
            if finished {
                inner.start = inner.target.clone();
                inner.start_time_nanos = None;
                inner.running = false;
            }
            (new_value, inner.on_update.clone(), inner.generation, finished)
        };

        if let Some(listener) = listener {
            listener(value);
        }

        let superseded = this.borrow().generation != generation;
        if !finished && !superseded {
            Self::schedule_frame(this);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
