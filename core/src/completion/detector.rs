use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pulse_types::{HabitId, HabitSnapshot};
use serde::{Deserialize, Serialize};

/// A habit crossed from below target to at-or-above target between two polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub habit_id: HabitId,
    pub name: String,
    pub observed_at: DateTime<Utc>,
}

/// Compare two snapshot sets and report every completion transition.
///
/// A habit fires when its previous snapshot is absent or below target and its
/// current snapshot is at or above target. Events come out in `current` order.
/// If `previous` repeats an id, the first occurrence wins.
pub fn detect(
    previous: &[HabitSnapshot],
    current: &[HabitSnapshot],
    observed_at: DateTime<Utc>,
) -> Vec<CompletionEvent> {
    let mut by_id: HashMap<HabitId, &HabitSnapshot> = HashMap::with_capacity(previous.len());
    for snapshot in previous {
        by_id.entry(snapshot.id).or_insert(snapshot);
    }

    current
        .iter()
        .filter(|h| {
            let was_incomplete = by_id.get(&h.id).is_none_or(|p| !p.is_complete());
            was_incomplete && h.is_complete()
        })
        .map(|h| CompletionEvent {
            habit_id: h.id,
            name: h.name.clone(),
            observed_at,
        })
        .collect()
}
