//! Finite-time actions and the elapsed-time adapter that drives them.
//!
//! A [`FiniteAction`] describes behavior over a fixed duration in terms of
//! *normalized progress* rather than raw frame deltas. That is what makes
//! composition exact: a [`Sequence`](crate::Sequence) can convert its own
//! progress into a child's progress without either of them owning a clock.
//! The single clock lives in [`Interval`], which adapts any finite action to
//! the scheduler-facing [`Action`] trait.

use crate::action::Action;
use crate::context::ActionContext;

/// Behavior with a fixed duration, driven by normalized progress in [0, 1].
///
/// Implementations capture whatever starting state they need in
/// [`start`](FiniteAction::start) — called once each time the action (re)
/// begins, including once per repetition under [`Repeat`](crate::Repeat) —
/// and apply themselves in [`update`](FiniteAction::update). `update` is
/// called with monotonically non-decreasing progress and is guaranteed a
/// final call with `1.0` before the action is considered complete.
pub trait FiniteAction<C>: Send {
    /// Total duration in seconds. Zero-duration actions fire on their first
    /// update and complete immediately.
    fn duration(&self) -> f32;

    /// Called once when the action begins, before the first `update`.
    fn start(&mut self, ctx: &mut ActionContext<'_, C>) {
        let _ = ctx;
    }

    /// Apply the state corresponding to `progress` (0.0 = start, 1.0 = end).
    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32);

    /// Teardown hook, called when the action ends or is cancelled.
    fn stop(&mut self) {}
}

/// Blanket implementation for boxed finite actions.
impl<C> FiniteAction<C> for Box<dyn FiniteAction<C>> {
    #[inline]
    fn duration(&self) -> f32 {
        (**self).duration()
    }

    #[inline]
    fn start(&mut self, ctx: &mut ActionContext<'_, C>) {
        (**self).start(ctx)
    }

    #[inline]
    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32) {
        (**self).update(ctx, progress)
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Adapts a [`FiniteAction`] to the stepping [`Action`] interface by
/// accumulating elapsed time and converting it to progress.
///
/// Elapsed time only advances when the interval is stepped, so pausing the
/// owning target freezes progress exactly and resuming continues from the
/// same point.
pub struct Interval<B> {
    inner: B,
    elapsed: f32,
    started: bool,
}

impl<B> Interval<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            elapsed: 0.0,
            started: false,
        }
    }

    /// Seconds of stepped time accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<C, B: FiniteAction<C>> Action<C> for Interval<B> {
    fn step(&mut self, ctx: &mut ActionContext<'_, C>, dt: f32) {
        if !self.started {
            self.started = true;
            self.inner.start(ctx);
        }
        self.elapsed += dt;

        let duration = self.inner.duration();
        let progress = if duration > 0.0 {
            (self.elapsed / duration).min(1.0)
        } else {
            1.0
        };
        self.inner.update(ctx, progress);
    }

    fn is_done(&self) -> bool {
        self.started && self.elapsed >= self.inner.duration()
    }

    fn stop(&mut self) {
        self.inner.stop();
    }
}

/// Closure-driven finite action: animate anything in the world for a fixed
/// duration.
///
/// The closure receives the step context and the current progress; what it
/// interpolates is entirely up to the application. Actions that must capture
/// state when they begin (relative moves and the like) should implement
/// [`FiniteAction`] directly instead.
pub struct Tween<C> {
    duration: f32,
    apply: Box<dyn for<'a, 'w> FnMut(&'a mut ActionContext<'w, C>, f32) + Send>,
}

impl<C> Tween<C> {
    pub fn new(
        duration: f32,
        apply: impl for<'a, 'w> FnMut(&'a mut ActionContext<'w, C>, f32) + Send + 'static,
    ) -> Self {
        Self {
            duration,
            apply: Box::new(apply),
        }
    }
}

impl<C> FiniteAction<C> for Tween<C> {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32) {
        (self.apply)(ctx, progress);
    }
}

/// Does nothing for a fixed duration. Useful as a spacer inside sequences.
pub struct DelayTime {
    duration: f32,
}

impl DelayTime {
    pub fn new(seconds: f32) -> Self {
        Self { duration: seconds }
    }
}

impl<C> FiniteAction<C> for DelayTime {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn update(&mut self, _ctx: &mut ActionContext<'_, C>, _progress: f32) {}
}
