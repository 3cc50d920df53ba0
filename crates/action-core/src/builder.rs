//! Builder utilities for ergonomic action construction.
//!
//! This module provides helper functions to reduce boilerplate when
//! composing actions. Instead of writing verbose
//! `Box::new(Interval::new(Sequence::new(vec![...])))`, you can use shorter
//! functions like `interval(sequence(vec![...]))`.

use crate::action::Action;
use crate::composite::{Sequence, Spawn};
use crate::context::ActionContext;
use crate::decorator::{Repeat, RepeatForever, Speed};
use crate::instant::CallFunc;
use crate::interval::{DelayTime, FiniteAction, Interval, Tween};

/// Creates a sequence of finite actions.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn FiniteAction<C>>>) -> Box<dyn FiniteAction<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a parallel group of finite actions.
///
/// Shorthand for `Box::new(Spawn::new(children))`.
#[inline]
pub fn spawn<C: 'static>(children: Vec<Box<dyn FiniteAction<C>>>) -> Box<dyn FiniteAction<C>> {
    Box::new(Spawn::new(children))
}

/// Repeats a finite action `times` times.
///
/// Shorthand for `Box::new(Repeat::new(inner, times))`.
#[inline]
pub fn repeat<C: 'static>(inner: Box<dyn FiniteAction<C>>, times: u32) -> Box<dyn FiniteAction<C>> {
    Box::new(Repeat::new(inner, times))
}

/// Repeats a finite action until removed.
///
/// Shorthand for `Box::new(RepeatForever::new(inner))`. The result is a
/// schedulable [`Action`] — it has no finite duration.
#[inline]
pub fn forever<C: 'static>(inner: Box<dyn FiniteAction<C>>) -> Box<dyn Action<C>> {
    Box::new(RepeatForever::new(inner))
}

/// Creates a fixed-duration pause.
///
/// Shorthand for `Box::new(DelayTime::new(seconds))`.
#[inline]
pub fn delay<C: 'static>(seconds: f32) -> Box<dyn FiniteAction<C>> {
    Box::new(DelayTime::new(seconds))
}

/// Creates a one-shot callback action.
///
/// Shorthand for `Box::new(CallFunc::new(callback))`.
#[inline]
pub fn call<C: 'static>(
    callback: impl for<'a, 'w> FnOnce(&'a mut ActionContext<'w, C>) + Send + 'static,
) -> Box<dyn FiniteAction<C>> {
    Box::new(CallFunc::new(callback))
}

/// Creates a closure-driven tween over `seconds`.
///
/// Shorthand for `Box::new(Tween::new(seconds, apply))`.
#[inline]
pub fn tween<C: 'static>(
    seconds: f32,
    apply: impl for<'a, 'w> FnMut(&'a mut ActionContext<'w, C>, f32) + Send + 'static,
) -> Box<dyn FiniteAction<C>> {
    Box::new(Tween::new(seconds, apply))
}

/// Adapts a finite action into a schedulable [`Action`] with its own clock.
///
/// Shorthand for `Box::new(Interval::new(inner))`.
#[inline]
pub fn interval<C: 'static>(inner: Box<dyn FiniteAction<C>>) -> Box<dyn Action<C>> {
    Box::new(Interval::new(inner))
}

/// Rescales the frame delta fed to an action.
///
/// Shorthand for `Box::new(Speed::new(inner, rate))`.
#[inline]
pub fn speed<C: 'static>(inner: Box<dyn Action<C>>, rate: f32) -> Box<dyn Action<C>> {
    Box::new(Speed::new(inner, rate))
}
