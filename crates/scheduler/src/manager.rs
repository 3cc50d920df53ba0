//! Action scheduling and per-target bookkeeping.

use std::collections::HashMap;
use std::fmt;

use action_core::{Action, ActionContext, Command, NO_TAG, TaggedAction, TargetId};

/// Identity of a scheduled action, assigned by [`ActionManager::add_action`].
///
/// The Rust-native stand-in for remove-by-pointer: the manager owns every
/// action outright, so callers hold this handle instead of the action.
/// Handles are never reused; a handle whose action is already gone is a
/// no-op wherever it is passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(u64);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One scheduled action plus its routing metadata.
struct ScheduledEntry<C> {
    id: ActionId,
    tag: i32,
    flags: u32,
    action: Box<dyn Action<C>>,
}

/// Per-target state: the target's action list and pause flag.
///
/// Entries stay in insertion order, which is also ascending [`ActionId`]
/// order — adds always append and nothing reorders. The update pass leans
/// on that to keep its place across mid-iteration removals.
struct TargetRecord<C> {
    entries: Vec<ScheduledEntry<C>>,
    paused: bool,
}

/// Owns and advances every scheduled action, keyed by target.
///
/// The manager holds no reference to the animated objects themselves — a
/// [`TargetId`] is just the key actions are grouped and addressed by. The
/// world the actions mutate is lent to [`update`](Self::update) each frame.
///
/// A target's owner must call
/// [`remove_all_actions_from_target`](Self::remove_all_actions_from_target)
/// before retiring an id that still has actions scheduled; the manager
/// cannot observe external destruction and would keep ticking the stale
/// entry.
pub struct ActionManager<C> {
    targets: HashMap<TargetId, TargetRecord<C>>,
    pending: Vec<Command<C>>,
    next_action_id: u64,
}

impl<C> Default for ActionManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ActionManager<C> {
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            pending: Vec::new(),
            next_action_id: 1,
        }
    }

    /// Schedules an action on a target.
    ///
    /// If the target has no record yet, one is created with the given
    /// `paused` state; if it already has one, `paused` is ignored and the
    /// existing pause state wins. The action is appended to the target's
    /// list and first steps on the next [`update`](Self::update) pass.
    ///
    /// Scheduling the same action twice is unrepresentable here: the
    /// manager takes ownership of the boxed action, so there is no second
    /// reference left to add.
    pub fn add_action(
        &mut self,
        action: impl Into<TaggedAction<C>>,
        target: TargetId,
        paused: bool,
    ) -> ActionId {
        let (action, tag, flags) = action.into().into_parts();
        let id = ActionId(self.next_action_id);
        self.next_action_id += 1;

        let record = self.targets.entry(target).or_insert_with(|| TargetRecord {
            entries: Vec::new(),
            paused,
        });
        record.entries.push(ScheduledEntry {
            id,
            tag,
            flags,
            action,
        });
        tracing::trace!(target_id = %target, action_id = %id, tag, "action scheduled");
        id
    }

    /// Removes and stops every action on every target.
    pub fn remove_all_actions(&mut self) {
        for (_, mut record) in self.targets.drain() {
            for entry in &mut record.entries {
                entry.action.stop();
            }
        }
    }

    /// Removes and stops every action bound to `target`. No-op if the
    /// target is unknown.
    pub fn remove_all_actions_from_target(&mut self, target: TargetId) {
        if let Some(mut record) = self.targets.remove(&target) {
            for entry in &mut record.entries {
                entry.action.stop();
            }
            tracing::trace!(target_id = %target, "target cleared");
        }
    }

    /// Removes the action identified by `id`, wherever it is scheduled.
    /// No-op if the handle is stale.
    pub fn remove_action(&mut self, id: ActionId) {
        let owner = self
            .targets
            .iter()
            .find_map(|(key, record)| record.entries.iter().any(|e| e.id == id).then_some(*key));
        if let Some(target) = owner {
            self.remove_matching(target, true, |entry| entry.id == id);
        }
    }

    /// Removes the first action on `target` matching `tag`.
    ///
    /// Passing [`NO_TAG`] is a documented no-op even if untagged actions
    /// exist, so they can never be removed by accident.
    pub fn remove_action_by_tag(&mut self, tag: i32, target: TargetId) {
        if tag == NO_TAG {
            tracing::warn!(target_id = %target, "remove_action_by_tag called with NO_TAG, ignoring");
            return;
        }
        self.remove_matching(target, true, |entry| entry.tag == tag);
    }

    /// Removes every action on `target` matching `tag` in a single pass.
    pub fn remove_all_actions_by_tag(&mut self, tag: i32, target: TargetId) {
        if tag == NO_TAG {
            tracing::warn!(target_id = %target, "remove_all_actions_by_tag called with NO_TAG, ignoring");
            return;
        }
        self.remove_matching(target, false, |entry| entry.tag == tag);
    }

    /// Removes every action on `target` whose flags intersect `flags`
    /// (bitwise AND). A zero mask matches nothing.
    pub fn remove_actions_by_flags(&mut self, flags: u32, target: TargetId) {
        self.remove_matching(target, false, |entry| entry.flags & flags != 0);
    }

    /// Returns the first action on `target` matching `tag`, if any.
    /// [`NO_TAG`] never matches.
    pub fn get_action_by_tag(&self, tag: i32, target: TargetId) -> Option<&dyn Action<C>> {
        if tag == NO_TAG {
            tracing::warn!(target_id = %target, "get_action_by_tag called with NO_TAG, ignoring");
            return None;
        }
        self.targets
            .get(&target)?
            .entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.action.as_ref())
    }

    /// Number of top-level actions scheduled on `target`. A composite
    /// counts as one action no matter how many children it contains.
    pub fn running_action_count(&self, target: TargetId) -> usize {
        self.targets
            .get(&target)
            .map_or(0, |record| record.entries.len())
    }

    /// Freezes all actions bound to `target`: none of them advance or
    /// complete until the target is resumed. No-op if the target is
    /// unknown.
    pub fn pause_target(&mut self, target: TargetId) {
        if let Some(record) = self.targets.get_mut(&target) {
            record.paused = true;
        }
    }

    /// Unfreezes `target`; its actions continue from exactly where they
    /// were paused. No-op if the target is unknown.
    pub fn resume_target(&mut self, target: TargetId) {
        if let Some(record) = self.targets.get_mut(&target) {
            record.paused = false;
        }
    }

    /// Pauses every currently-unpaused target and returns exactly the set
    /// that was paused, so the caller can later restore the previous state
    /// with [`resume_targets`](Self::resume_targets).
    pub fn pause_all_running_actions(&mut self) -> Vec<TargetId> {
        let mut paused = Vec::new();
        for (key, record) in self.targets.iter_mut() {
            if !record.paused {
                record.paused = true;
                paused.push(*key);
            }
        }
        tracing::debug!(count = paused.len(), "paused all running targets");
        paused
    }

    /// Resumes exactly the given targets — the inverse of a
    /// [`pause_all_running_actions`](Self::pause_all_running_actions)
    /// snapshot. Targets not in the list keep their current state.
    pub fn resume_targets(&mut self, targets: &[TargetId]) {
        for &target in targets {
            self.resume_target(target);
        }
    }

    /// The per-frame scheduling tick. Advances every unpaused target's
    /// actions by `dt` seconds and retires the ones that report done.
    ///
    /// Guarantees:
    ///
    /// - Within one target, actions step in insertion order; two actions
    ///   touching the same state resolve last-writer-wins within the tick.
    /// - Across targets, visit order is unspecified (hash-keyed table) and
    ///   in particular is *not* insertion order.
    /// - Scheduling requests an action issues through its
    ///   [`ActionContext`] apply as soon as its step returns: a removed
    ///   sibling no longer ticks this frame, and an action that tears down
    ///   its own target aborts the rest of that target's pass without
    ///   touching its siblings' targets.
    /// - Targets scheduled during this pass start ticking on the next one.
    pub fn update(&mut self, world: &mut C, dt: f32) {
        debug_assert!(dt >= 0.0, "update expects a non-negative frame delta");

        let roster: Vec<TargetId> = self.targets.keys().copied().collect();
        for target in roster {
            // Cursor over ascending action ids: immune to the list shifting
            // underneath it when a step removes or adds entries.
            let mut cursor: Option<ActionId> = None;
            loop {
                let Some(record) = self.targets.get_mut(&target) else {
                    // Salvaged: the record was torn down by one of its own
                    // actions (or a previously visited target's action).
                    break;
                };
                if record.paused {
                    break;
                }
                let Some(position) = record
                    .entries
                    .iter()
                    .position(|entry| cursor.is_none_or(|c| entry.id > c))
                else {
                    break;
                };

                let entry = &mut record.entries[position];
                let id = entry.id;
                cursor = Some(id);

                let mut ctx = ActionContext::new(world, target, &mut self.pending);
                entry.action.step(&mut ctx, dt);

                if !self.pending.is_empty() {
                    self.apply_pending();
                }

                // Re-validate: the step (or the commands it queued) may have
                // removed this entry or the whole record.
                let Some(record) = self.targets.get_mut(&target) else {
                    break;
                };
                if let Some(position) = record.entries.iter().position(|entry| entry.id == id)
                    && record.entries[position].action.is_done()
                {
                    let mut done = record.entries.remove(position);
                    done.action.stop();
                    tracing::trace!(target_id = %target, action_id = %id, "action completed");
                }
            }

            if self
                .targets
                .get(&target)
                .is_some_and(|record| record.entries.is_empty())
            {
                self.targets.remove(&target);
            }
        }
    }

    /// Applies commands queued by actions during their steps.
    fn apply_pending(&mut self) {
        while !self.pending.is_empty() {
            let commands = std::mem::take(&mut self.pending);
            for command in commands {
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: Command<C>) {
        match command {
            Command::Add {
                action,
                target,
                paused,
            } => {
                self.add_action(action, target, paused);
            }
            Command::RemoveAllFrom(target) => self.remove_all_actions_from_target(target),
            Command::RemoveByTag { tag, target } => self.remove_action_by_tag(tag, target),
            Command::RemoveAllByTag { tag, target } => self.remove_all_actions_by_tag(tag, target),
            Command::RemoveByFlags { flags, target } => self.remove_actions_by_flags(flags, target),
            Command::PauseTarget(target) => self.pause_target(target),
            Command::ResumeTarget(target) => self.resume_target(target),
        }
    }

    /// Removes entries on `target` matching `predicate`, stopping each one.
    /// Drops the record once its list is empty.
    fn remove_matching(
        &mut self,
        target: TargetId,
        first_only: bool,
        predicate: impl Fn(&ScheduledEntry<C>) -> bool,
    ) -> usize {
        let Some(record) = self.targets.get_mut(&target) else {
            return 0;
        };
        let mut removed = 0;
        let mut index = 0;
        while index < record.entries.len() {
            if predicate(&record.entries[index]) {
                let mut entry = record.entries.remove(index);
                entry.action.stop();
                removed += 1;
                if first_only {
                    break;
                }
            } else {
                index += 1;
            }
        }
        let empty = record.entries.is_empty();
        if empty {
            self.targets.remove(&target);
        }
        removed
    }
}
