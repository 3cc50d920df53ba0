//! Core action trait.
//!
//! This module defines the [`Action`] trait, the minimal interface a
//! scheduler needs to drive a unit of time-based behavior, and
//! [`TaggedAction`], the schedule-time wrapper that attaches caller-assigned
//! routing metadata (tag and flags) to a boxed action.

use crate::context::ActionContext;

/// Sentinel tag meaning "no tag was assigned".
///
/// Tag-based lookups and removals given this value are documented no-ops,
/// so untagged actions can never be matched by accident.
pub const NO_TAG: i32 = -1;

/// A time-driven unit of behavior executed against exactly one target.
///
/// A scheduler advances the action once per frame via [`step`](Action::step)
/// and polls [`is_done`](Action::is_done) afterwards; a `true` result means
/// the action is removed and [`stop`](Action::stop) is called. The scheduler
/// never inspects internal progress beyond these three affordances.
///
/// Time is cooperative: the action's clock only advances when it is stepped,
/// so a target that is paused simply stops receiving steps and the action
/// resumes exactly where it left off.
pub trait Action<C>: Send {
    /// Advance this action by `dt` seconds.
    ///
    /// The first step both starts the action and advances its clock, so an
    /// action with a 1.0 s duration stepped with `0.5` then `0.6` reports
    /// done after the second step.
    ///
    /// `ctx` grants mutable access to the world and lets the action queue
    /// scheduling requests (see [`ActionContext`]); those requests are
    /// applied by the scheduler between steps, never during one.
    fn step(&mut self, ctx: &mut ActionContext<'_, C>, dt: f32);

    /// Returns `true` once the action has run to completion.
    fn is_done(&self) -> bool;

    /// Teardown hook, called when the action is removed — whether it
    /// finished naturally or was cancelled mid-flight.
    fn stop(&mut self) {}
}

/// Blanket implementation for boxed actions.
///
/// This allows `Box<dyn Action<C>>` to also implement `Action<C>`,
/// enabling dynamic dispatch and heterogeneous collections of actions.
impl<C> Action<C> for Box<dyn Action<C>> {
    #[inline]
    fn step(&mut self, ctx: &mut ActionContext<'_, C>, dt: f32) {
        (**self).step(ctx, dt)
    }

    #[inline]
    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop()
    }
}

/// A boxed action plus the caller-assigned labels a scheduler routes by.
///
/// The tag is an application-defined integer (default [`NO_TAG`]) used for
/// selective lookup and removal; flags are an application-defined bitmask
/// (default `0`) matched by bitwise AND. Neither needs to be unique.
pub struct TaggedAction<C> {
    action: Box<dyn Action<C>>,
    tag: i32,
    flags: u32,
}

impl<C> TaggedAction<C> {
    pub fn new(action: impl Action<C> + 'static) -> Self {
        Self::from_boxed(Box::new(action))
    }

    /// Wraps an already-boxed action without reboxing it.
    pub fn from_boxed(action: Box<dyn Action<C>>) -> Self {
        Self {
            action,
            tag: NO_TAG,
            flags: 0,
        }
    }

    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Decomposes the wrapper for a scheduler to store.
    pub fn into_parts(self) -> (Box<dyn Action<C>>, i32, u32) {
        (self.action, self.tag, self.flags)
    }
}

impl<C> From<Box<dyn Action<C>>> for TaggedAction<C> {
    fn from(action: Box<dyn Action<C>>) -> Self {
        Self::from_boxed(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl Action<()> for Noop {
        fn step(&mut self, _ctx: &mut ActionContext<'_, ()>, _dt: f32) {}
        fn is_done(&self) -> bool {
            true
        }
    }

    #[test]
    fn tagged_action_defaults() {
        let tagged = TaggedAction::new(Noop);
        assert_eq!(tagged.tag(), NO_TAG);
        assert_eq!(tagged.flags(), 0);
    }

    #[test]
    fn tagged_action_builder() {
        let tagged = TaggedAction::new(Noop).with_tag(7).with_flags(0b10);
        assert_eq!(tagged.tag(), 7);
        assert_eq!(tagged.flags(), 0b10);

        let (_, tag, flags) = tagged.into_parts();
        assert_eq!(tag, 7);
        assert_eq!(flags, 0b10);
    }
}
