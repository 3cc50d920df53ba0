//! Target identity.

use std::fmt;

/// Handle identifying an externally-owned object that actions animate.
///
/// The scheduler keys its per-target state on this handle and never touches
/// the object behind it; the application decides what a `TargetId` denotes
/// (a sprite, a particle emitter, a UI panel) and is responsible for the
/// object's lifetime. Two actions bound to equal ids animate the same
/// object.
///
/// Handles are plain integers so they stay cheap to copy, hash, and log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u64);

impl TargetId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for TargetId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn target_id_round_trips_through_json() {
        let id = TargetId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(serde_json::from_str::<TargetId>(&json).unwrap(), id);
    }
}
