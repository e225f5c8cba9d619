use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pulse_types::{HabitRecord, HabitSnapshot};

use super::detector::{CompletionEvent, detect};
use crate::error::DetectError;

/// Validate collaborator records into snapshots.
///
/// Rejects the whole batch on the first bad record, so a half-parsed poll can
/// never make a habit look newly complete.
pub fn snapshots_from_records(records: &[HabitRecord]) -> Result<Vec<HabitSnapshot>, DetectError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut snapshots = Vec::with_capacity(records.len());

    for record in records {
        let progress = record.progress.ok_or(DetectError::MissingField {
            id: record.id,
            field: "progress",
        })?;
        let target = record.target.ok_or(DetectError::MissingField {
            id: record.id,
            field: "target",
        })?;
        if target == 0 {
            return Err(DetectError::ZeroTarget { id: record.id });
        }
        if !seen.insert(record.id) {
            return Err(DetectError::DuplicateId { id: record.id });
        }
        snapshots.push(HabitSnapshot::new(record.id, record.name.clone(), progress, target));
    }

    Ok(snapshots)
}

/// Snapshot set carried from one poll to the next.
///
/// `advance` consumes the state and returns its successor, so the previous
/// poll is never shared or mutated behind the caller's back.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    snapshots: Vec<HabitSnapshot>,
    polls: u64,
    rejected: u64,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the state with an initial observation without emitting events
    pub fn primed(snapshots: Vec<HabitSnapshot>) -> Self {
        Self {
            snapshots,
            ..Self::default()
        }
    }

    pub fn snapshots(&self) -> &[HabitSnapshot] {
        &self.snapshots
    }

    /// Successful polls folded into this state
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Polls dropped because of malformed data
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Fold one poll into the state.
    ///
    /// On malformed data the error is logged, no events are produced, and the
    /// previous snapshot set is kept so the next good poll compares against it.
    pub fn advance(
        self,
        records: &[HabitRecord],
        now: DateTime<Utc>,
    ) -> (Self, Vec<CompletionEvent>) {
        match snapshots_from_records(records) {
            Ok(current) => self.fold(current, now),
            Err(e) => self.reject(e),
        }
    }

    /// Same as [`advance`](Self::advance) for a raw JSON array payload
    pub fn advance_json(self, payload: &str, now: DateTime<Utc>) -> (Self, Vec<CompletionEvent>) {
        match serde_json::from_str::<Vec<HabitRecord>>(payload) {
            Ok(records) => self.advance(&records, now),
            Err(e) => self.reject(DetectError::from(e)),
        }
    }

    fn fold(self, current: Vec<HabitSnapshot>, now: DateTime<Utc>) -> (Self, Vec<CompletionEvent>) {
        let events = detect(&self.snapshots, &current, now);
        if !events.is_empty() {
            tracing::debug!(count = events.len(), "Detected habit completions");
        }
        let next = Self {
            snapshots: current,
            polls: self.polls + 1,
            rejected: self.rejected,
        };
        (next, events)
    }

    fn reject(mut self, error: DetectError) -> (Self, Vec<CompletionEvent>) {
        tracing::warn!(error = %error, "Skipping habit poll");
        self.rejected += 1;
        (self, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, progress: u32, target: u32) -> HabitRecord {
        HabitRecord::new(id, format!("Habit {id}"), progress, target)
    }

    #[test]
    fn test_first_poll_fires_for_already_complete() {
        let (state, events) = PollState::new().advance(&[record(1, 3, 3), record(2, 0, 3)], Utc::now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].habit_id, 1);
        assert_eq!(state.snapshots().len(), 2);
        assert_eq!(state.polls(), 1);
    }

    #[test]
    fn test_primed_state_does_not_fire_for_known_completions() {
        let state = PollState::primed(vec![HabitSnapshot::new(1, "Run", 3, 3)]);
        let (_, events) = state.advance(&[record(1, 3, 3)], Utc::now());
        assert!(events.is_empty());
    }

    #[test]
    fn test_state_threads_across_polls() {
        let now = Utc::now();
        let (state, events) = PollState::new().advance(&[record(1, 1, 2)], now);
        assert!(events.is_empty());
        let (state, events) = state.advance(&[record(1, 2, 2)], now);
        assert_eq!(events.len(), 1);
        let (state, events) = state.advance(&[record(1, 2, 2)], now);
        assert!(events.is_empty());
        assert_eq!(state.polls(), 3);
    }

    #[test]
    fn test_missing_field_yields_no_events_and_keeps_state() {
        let now = Utc::now();
        let (state, _) = PollState::new().advance(&[record(1, 1, 2)], now);

        let mut broken = record(1, 2, 2);
        broken.progress = None;
        let (state, events) = state.advance(&[broken], now);
        assert!(events.is_empty());
        assert_eq!(state.rejected(), 1);
        assert_eq!(state.snapshots()[0].progress, 1);

        // next good poll still sees the crossing
        let (_, events) = state.advance(&[record(1, 2, 2)], now);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_zero_target_is_rejected() {
        let err = snapshots_from_records(&[record(4, 0, 0)]).unwrap_err();
        assert!(matches!(err, DetectError::ZeroTarget { id: 4 }));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = snapshots_from_records(&[record(4, 0, 1), record(4, 1, 1)]).unwrap_err();
        assert!(matches!(err, DetectError::DuplicateId { id: 4 }));
    }

    #[test]
    fn test_json_payload() {
        let payload = r#"[
            {"id": 1, "name": "Read", "progress": 5, "target": 5, "percentage": 100, "completed_today": false},
            {"id": 2, "name": "Walk", "progress": 1, "target": 5}
        ]"#;
        let (state, events) = PollState::new().advance_json(payload, Utc::now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Read");
        assert_eq!(state.snapshots().len(), 2);
    }

    #[test]
    fn test_garbage_json_is_swallowed() {
        let (state, events) = PollState::new().advance_json("{not json", Utc::now());
        assert!(events.is_empty());
        assert_eq!(state.rejected(), 1);
        assert_eq!(state.polls(), 0);
    }
}
