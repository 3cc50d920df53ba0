//! Per-target, tag-addressable frame scheduler for composable actions.
//!
//! The [`ActionManager`] owns every scheduled action, keyed by the
//! [`TargetId`](action_core::TargetId) of the object it animates. An
//! external frame driver calls [`ActionManager::update`] once per frame;
//! the manager advances every unpaused target's actions in insertion order
//! and retires the ones that report done. Everything else — tag and flag
//! addressed removal, pause/resume per target, whole-table pause snapshots —
//! is bookkeeping around that tick.
//!
//! Design notes:
//!
//! - **Single-threaded by contract.** One `update` per frame from one
//!   logical thread; pausing a target stalls its actions' clocks rather
//!   than blocking anything.
//! - **No-ops over errors.** Operations naming an unknown target, tag, or
//!   action id do nothing. This runs on a per-frame hot path where the
//!   worst acceptable outcome is a visually wrong animation, never a crash.
//! - **Safe self-mutation.** Actions mutate the scheduler mid-step only
//!   through queued [`Command`](action_core::Command)s, applied between
//!   steps; iteration re-validates every handle it holds, so an action
//!   tearing down its own target cannot corrupt the pass.

pub mod manager;

pub use manager::{ActionId, ActionManager};
