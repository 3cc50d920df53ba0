//! Composite actions.
//!
//! Composites control how multiple finite actions share one span of time:
//! [`Sequence`] runs its children back to back, [`Spawn`] runs them in
//! parallel. Both are themselves [`FiniteAction`]s, so they nest freely and
//! count as a single action wherever they are scheduled.

use crate::context::ActionContext;
use crate::interval::FiniteAction;

/// Runs child actions back to back.
///
/// # Semantics
///
/// The sequence's duration is the sum of its children's durations. Progress
/// is mapped onto the timeline exactly: when one update crosses a child
/// boundary mid-frame, the finished child receives a final `update(1.0)` and
/// is stopped, the next child is started, and the fractional remainder of
/// the frame lands in the next child — no time is lost at the seam. A jump
/// across several children finishes each of them once, in order.
pub struct Sequence<C> {
    children: Vec<Box<dyn FiniteAction<C>>>,
    current: usize,
    consumed: f32,
    child_active: bool,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child actions.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn FiniteAction<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            current: 0,
            consumed: 0.0,
            child_active: false,
        }
    }
}

impl<C> FiniteAction<C> for Sequence<C> {
    fn duration(&self) -> f32 {
        self.children.iter().map(|child| child.duration()).sum()
    }

    fn start(&mut self, _ctx: &mut ActionContext<'_, C>) {
        self.current = 0;
        self.consumed = 0.0;
        self.child_active = false;
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32) {
        let goal = progress * self.duration();
        loop {
            let is_last = self.current + 1 == self.children.len();
            let child = &mut self.children[self.current];
            let child_duration = child.duration();

            if !self.child_active {
                child.start(ctx);
                self.child_active = true;
            }

            let child_end = self.consumed + child_duration;
            if goal < child_end || is_last {
                let local = if child_duration > 0.0 {
                    ((goal - self.consumed) / child_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                child.update(ctx, local);
                return;
            }

            // Boundary crossed: finish this child and move on, carrying the
            // remainder of the frame into the next one.
            child.update(ctx, 1.0);
            child.stop();
            self.consumed = child_end;
            self.current += 1;
            self.child_active = false;
        }
    }

    fn stop(&mut self) {
        if self.child_active {
            self.children[self.current].stop();
        }
    }
}

/// Runs child actions in parallel.
///
/// # Semantics
///
/// The spawn's duration is its longest child's duration. Every child starts
/// together; a child whose own duration elapses receives a final
/// `update(1.0)`, is stopped, and is not updated again while its longer
/// siblings run out.
pub struct Spawn<C> {
    children: Vec<Box<dyn FiniteAction<C>>>,
    finished: Vec<bool>,
}

impl<C> Spawn<C> {
    /// Creates a new spawn with the given child actions.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn FiniteAction<C>>>) -> Self {
        assert!(!children.is_empty(), "Spawn must have at least one child");
        let finished = vec![false; children.len()];
        Self { children, finished }
    }
}

impl<C> FiniteAction<C> for Spawn<C> {
    fn duration(&self) -> f32 {
        self.children
            .iter()
            .map(|child| child.duration())
            .fold(0.0, f32::max)
    }

    fn start(&mut self, ctx: &mut ActionContext<'_, C>) {
        self.finished.fill(false);
        for child in &mut self.children {
            child.start(ctx);
        }
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, C>, progress: f32) {
        let goal = progress * self.duration();
        for (index, child) in self.children.iter_mut().enumerate() {
            if self.finished[index] {
                continue;
            }
            let child_duration = child.duration();
            let local = if child_duration > 0.0 {
                (goal / child_duration).min(1.0)
            } else {
                1.0
            };
            child.update(ctx, local);
            if local >= 1.0 {
                child.stop();
                self.finished[index] = true;
            }
        }
    }

    fn stop(&mut self) {
        for (index, child) in self.children.iter_mut().enumerate() {
            if !self.finished[index] {
                child.stop();
            }
        }
    }
}
