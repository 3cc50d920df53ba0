//! Decorator actions.
//!
//! Decorators wrap a single child action and modify how it consumes time:
//! [`Repeat`] runs it a fixed number of times, [`RepeatForever`] runs it
//! until cancelled, and [`Speed`] rescales the frame delta fed to it.

use crate::action::Action;
use crate::context::ActionContext;
use crate::interval::FiniteAction;

/// Repeats a finite action a fixed number of times.
///
/// # Semantics
///
/// The total duration is `times` multiplied by the child's duration. Each
/// repetition restarts the child — including a fresh
/// [`start`](FiniteAction::start), so a child that captures state on start
/// (a relative move, say) compounds across repetitions. Boundary crossings
/// carry the fractional remainder of the frame into the next repetition.
pub struct Repeat<C> {
    inner: Box<dyn FiniteAction<C>>,
    times: u32,
    completed: u32,
    inner_active: bool,
}

impl<C> Repeat<C> {
    /// Creates a repeat decorator around the given child action.
    ///
    /// # Panics
    ///
    /// Panics if `times` is zero.
    pub fn new(inner: Box<dyn FiniteAction<C>>, times: u32) -> Self {
        assert!(times > 0, "Repeat must run its child at least once");
        Self {
            inner,
            times,
            completed: 0,
            inner_active: false,
        }
    }
}

impl<C> FiniteAction<C> for Repeat<C> {
    fn duration(&self) -> f32 {
        self.inner.duration() * self.times as f32
    }

    fn start(&mut self, _ctx: &mut ActionContext<'_, C>) {
        self.completed = 0;
        self.inner_active = false;
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32) {
        let cycle = self.inner.duration();
        if cycle <= 0.0 {
            // Instant child: run out all repetitions in one go.
            while self.completed < self.times {
                self.inner.start(ctx);
                self.inner.update(ctx, 1.0);
                self.inner.stop();
                self.completed += 1;
            }
            return;
        }

        let goal = progress * cycle * self.times as f32;
        loop {
            if !self.inner_active {
                self.inner.start(ctx);
                self.inner_active = true;
            }

            let cycle_end = (self.completed + 1) as f32 * cycle;
            let is_last = self.completed + 1 == self.times;
            if goal < cycle_end || is_last {
                let local = ((goal - self.completed as f32 * cycle) / cycle).clamp(0.0, 1.0);
                self.inner.update(ctx, local);
                return;
            }

            self.inner.update(ctx, 1.0);
            self.inner.stop();
            self.completed += 1;
            self.inner_active = false;
        }
    }

    fn stop(&mut self) {
        if self.inner_active {
            self.inner.stop();
        }
    }
}

/// Repeats a finite action until it is removed from its scheduler.
///
/// Never reports done; overshoot past the end of one repetition carries
/// into the next, so the child's clock stays exact across restarts.
pub struct RepeatForever<C> {
    inner: Box<dyn FiniteAction<C>>,
    elapsed: f32,
    started: bool,
}

impl<C> RepeatForever<C> {
    pub fn new(inner: Box<dyn FiniteAction<C>>) -> Self {
        Self {
            inner,
            elapsed: 0.0,
            started: false,
        }
    }
}

impl<C> Action<C> for RepeatForever<C> {
    fn step(&mut self, ctx: &mut ActionContext<'_, C>, dt: f32) {
        if !self.started {
            self.started = true;
            self.inner.start(ctx);
        }
        self.elapsed += dt;

        let cycle = self.inner.duration();
        if cycle <= 0.0 {
            self.inner.update(ctx, 1.0);
            return;
        }

        while self.elapsed >= cycle {
            self.inner.update(ctx, 1.0);
            self.inner.stop();
            self.elapsed -= cycle;
            self.inner.start(ctx);
        }
        self.inner.update(ctx, (self.elapsed / cycle).clamp(0.0, 1.0));
    }

    fn is_done(&self) -> bool {
        false
    }

    fn stop(&mut self) {
        if self.started {
            self.inner.stop();
        }
    }
}

/// Rescales the frame delta fed to the wrapped action.
///
/// A rate of 2.0 makes the action run twice as fast, 0.5 at half speed. The
/// rate may be changed while the action runs.
pub struct Speed<C> {
    inner: Box<dyn Action<C>>,
    rate: f32,
}

impl<C> Speed<C> {
    pub fn new(inner: Box<dyn Action<C>>, rate: f32) -> Self {
        Self { inner, rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }
}

impl<C> Action<C> for Speed<C> {
    fn step(&mut self, ctx: &mut ActionContext<'_, C>, dt: f32) {
        self.inner.step(ctx, dt * self.rate);
    }

    fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    fn stop(&mut self) {
        self.inner.stop();
    }
}
