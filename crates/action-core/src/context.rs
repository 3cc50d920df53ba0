//! Execution context passed to every action step.
//!
//! Stepping an action must not hand it a mutable reference to the scheduler
//! that is iterating it, so the context exposes the scheduler's control
//! surface as deferred [`Command`] values instead. The scheduler drains the
//! queue between steps; a request issued during a step therefore takes
//! effect before the next sibling action ticks, and can never touch
//! scheduler state that is mid-iteration.

use crate::action::TaggedAction;
use crate::target::TargetId;

/// A scheduling request queued by an action during its step.
///
/// The scheduler driving the actions applies these in issue order after the
/// current step returns. Requests that reference an unknown target are
/// no-ops, matching the scheduler's own control surface.
pub enum Command<C> {
    /// Schedule a new action on `target`.
    Add {
        action: TaggedAction<C>,
        target: TargetId,
        paused: bool,
    },
    /// Remove every action bound to `target`.
    RemoveAllFrom(TargetId),
    /// Remove the first action on `target` with the given tag.
    RemoveByTag { tag: i32, target: TargetId },
    /// Remove every action on `target` with the given tag.
    RemoveAllByTag { tag: i32, target: TargetId },
    /// Remove every action on `target` whose flags intersect `flags`.
    RemoveByFlags { flags: u32, target: TargetId },
    /// Freeze all actions bound to `target`.
    PauseTarget(TargetId),
    /// Unfreeze all actions bound to `target`.
    ResumeTarget(TargetId),
}

/// Context for a single action step.
///
/// Grants the action mutable access to the world it animates, tells it which
/// target it is bound to, and collects the scheduling requests it issues.
pub struct ActionContext<'a, C> {
    /// Mutable access to the world the actions animate.
    pub world: &'a mut C,
    target: TargetId,
    commands: &'a mut Vec<Command<C>>,
}

impl<'a, C> ActionContext<'a, C> {
    /// Creates a step context. Called by the scheduler driving the actions.
    pub fn new(world: &'a mut C, target: TargetId, commands: &'a mut Vec<Command<C>>) -> Self {
        Self {
            world,
            target,
            commands,
        }
    }

    /// The target this action is bound to.
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Requests that a new action be scheduled on `target`.
    pub fn add_action(
        &mut self,
        action: impl Into<TaggedAction<C>>,
        target: TargetId,
        paused: bool,
    ) {
        self.commands.push(Command::Add {
            action: action.into(),
            target,
            paused,
        });
    }

    /// Requests removal of every action bound to `target`.
    ///
    /// Pass [`target()`](Self::target) to tear down the calling action's own
    /// record; the scheduler stops ticking the record's remaining actions
    /// immediately.
    pub fn remove_all_actions_from_target(&mut self, target: TargetId) {
        self.commands.push(Command::RemoveAllFrom(target));
    }

    /// Requests removal of the first action on `target` matching `tag`.
    pub fn remove_action_by_tag(&mut self, tag: i32, target: TargetId) {
        self.commands.push(Command::RemoveByTag { tag, target });
    }

    /// Requests removal of every action on `target` matching `tag`.
    pub fn remove_all_actions_by_tag(&mut self, tag: i32, target: TargetId) {
        self.commands.push(Command::RemoveAllByTag { tag, target });
    }

    /// Requests removal of every action on `target` whose flags intersect
    /// `flags`.
    pub fn remove_actions_by_flags(&mut self, flags: u32, target: TargetId) {
        self.commands.push(Command::RemoveByFlags { flags, target });
    }

    /// Requests that `target` be paused.
    pub fn pause_target(&mut self, target: TargetId) {
        self.commands.push(Command::PauseTarget(target));
    }

    /// Requests that `target` be resumed.
    pub fn resume_target(&mut self, target: TargetId) {
        self.commands.push(Command::ResumeTarget(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_queued_in_issue_order() {
        let mut world = 0u32;
        let mut commands: Vec<Command<u32>> = Vec::new();
        let mut ctx = ActionContext::new(&mut world, TargetId::new(3), &mut commands);

        assert_eq!(ctx.target(), TargetId::new(3));
        *ctx.world += 1;

        ctx.pause_target(TargetId::new(3));
        ctx.remove_action_by_tag(5, TargetId::new(4));

        assert_eq!(world, 1);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], Command::PauseTarget(t) if t == TargetId::new(3)));
        assert!(matches!(
            commands[1],
            Command::RemoveByTag { tag: 5, target } if target == TargetId::new(4)
        ));
    }
}
