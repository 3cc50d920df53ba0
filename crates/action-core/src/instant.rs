//! Instant actions.
//!
//! Instants are zero-duration finite actions: they fire once, on the frame
//! they are reached, and complete immediately. Inside a
//! [`Sequence`](crate::Sequence) they act as one-shot waypoints between
//! timed children.

use crate::context::ActionContext;
use crate::interval::FiniteAction;

/// Fires a callback once.
///
/// The callback receives the step context, so it can mutate the world and
/// issue scheduling requests — removing its own target, pausing another,
/// chaining a follow-up action. This is the escape hatch that lets a
/// running animation talk back to the scheduler.
pub struct CallFunc<C> {
    callback: Option<Box<dyn for<'a, 'w> FnOnce(&'a mut ActionContext<'w, C>) + Send>>,
}

impl<C> CallFunc<C> {
    pub fn new(
        callback: impl for<'a, 'w> FnOnce(&'a mut ActionContext<'w, C>) + Send + 'static,
    ) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }
}

impl<C> FiniteAction<C> for CallFunc<C> {
    fn duration(&self) -> f32 {
        0.0
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, C>, _progress: f32) {
        if let Some(callback) = self.callback.take() {
            callback(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::context::Command;
    use crate::interval::Interval;
    use crate::target::TargetId;

    #[test]
    fn callback_fires_exactly_once() {
        let mut world = 0u32;
        let mut commands: Vec<Command<u32>> = Vec::new();
        let mut action = Interval::new(CallFunc::new(|ctx: &mut ActionContext<'_, u32>| {
            *ctx.world += 1
        }));

        let mut ctx = ActionContext::new(&mut world, TargetId::new(1), &mut commands);
        action.step(&mut ctx, 0.1);
        assert!(action.is_done());

        // Defensive: a second update must not re-fire the callback.
        let mut ctx = ActionContext::new(&mut world, TargetId::new(1), &mut commands);
        action.step(&mut ctx, 0.1);
        assert_eq!(world, 1);
    }

    #[test]
    fn callback_can_issue_scheduling_requests() {
        let mut world = 0u32;
        let mut commands: Vec<Command<u32>> = Vec::new();
        let mut action = Interval::new(CallFunc::new(|ctx: &mut ActionContext<'_, u32>| {
            let own = ctx.target();
            ctx.remove_all_actions_from_target(own);
        }));

        let mut ctx = ActionContext::new(&mut world, TargetId::new(9), &mut commands);
        action.step(&mut ctx, 0.1);
        assert!(matches!(
            commands.as_slice(),
            [Command::RemoveAllFrom(t)] if *t == TargetId::new(9)
        ));
    }
}
