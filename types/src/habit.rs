//! Habit records and snapshots
//!
//! [`HabitRecord`] is the shape the habit collaborator hands out on every poll.
//! [`HabitSnapshot`] is the validated subset the completion detector compares.

use serde::{Deserialize, Serialize};

/// Opaque habit identifier assigned by the habit collaborator
pub type HabitId = u64;

/// A habit as reported by the habit collaborator
///
/// `progress` and `target` are optional on the wire so that a malformed
/// record can still be deserialized and rejected with a precise reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: HabitId,
    pub name: String,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub target: Option<u32>,
    /// Derived by the collaborator, not required by detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_today: Option<bool>,
}

impl HabitRecord {
    /// Build a complete record with the derived percentage filled in
    pub fn new(id: HabitId, name: impl Into<String>, progress: u32, target: u32) -> Self {
        Self {
            id,
            name: name.into(),
            progress: Some(progress),
            target: Some(target),
            percentage: Some(percentage(progress, target)),
            completed_today: Some(false),
        }
    }
}

/// Progress as a whole percentage, capped at 100.
///
/// A zero target yields 0 rather than dividing by zero.
pub fn percentage(progress: u32, target: u32) -> u8 {
    if target == 0 {
        return 0;
    }
    let pct = (progress as u64 * 100) / target as u64;
    pct.min(100) as u8
}

/// Immutable view of one habit at one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub id: HabitId,
    pub name: String,
    pub progress: u32,
    /// Always greater than zero
    pub target: u32,
}

impl HabitSnapshot {
    pub fn new(id: HabitId, name: impl Into<String>, progress: u32, target: u32) -> Self {
        Self {
            id,
            name: name.into(),
            progress,
            target,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }
}
