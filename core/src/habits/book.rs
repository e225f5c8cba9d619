use std::collections::BTreeMap;

use pulse_types::{HabitId, HabitRecord, HabitSettings, habit::percentage};

use crate::error::HabitError;

/// Anything the poll loop can fetch habit records from
pub trait HabitSource {
    fn fetch(&self) -> Vec<HabitRecord>;
}

#[derive(Debug, Clone)]
struct StoredHabit {
    name: String,
    target: u32,
    progress: u32,
    completed_today: bool,
}

impl StoredHabit {
    fn to_record(&self, id: HabitId) -> HabitRecord {
        HabitRecord {
            id,
            name: self.name.clone(),
            progress: Some(self.progress),
            target: Some(self.target),
            percentage: Some(percentage(self.progress, self.target)),
            completed_today: Some(self.completed_today),
        }
    }
}

/// Habit store with check/reset/delete semantics.
///
/// Ids ascend from 1 and are never reused, so listing by id is insertion
/// order.
#[derive(Debug, Clone)]
pub struct HabitBook {
    habits: BTreeMap<HabitId, StoredHabit>,
    next_id: HabitId,
    default_target: u32,
}

impl Default for HabitBook {
    fn default() -> Self {
        Self::new(&HabitSettings::default())
    }
}

impl HabitBook {
    pub fn new(settings: &HabitSettings) -> Self {
        Self {
            habits: BTreeMap::new(),
            next_id: 1,
            default_target: settings.default_target.max(1),
        }
    }

    /// Add a habit. `target` falls back to the configured default.
    pub fn add(&mut self, name: &str, target: Option<u32>) -> Result<HabitRecord, HabitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::EmptyName);
        }
        let target = match target {
            Some(0) => return Err(HabitError::ZeroTarget),
            Some(t) => t,
            None => self.default_target,
        };

        let id = self.next_id;
        self.next_id += 1;

        let habit = StoredHabit {
            name: name.to_string(),
            target,
            progress: 0,
            completed_today: false,
        };
        let record = habit.to_record(id);
        self.habits.insert(id, habit);

        tracing::debug!(id, name, target, "Habit added");
        Ok(record)
    }

    /// Mark one more day. Progress stops at the target; checking a finished
    /// habit is accepted and changes nothing.
    pub fn check(&mut self, id: HabitId) -> Result<HabitRecord, HabitError> {
        let habit = self.habits.get_mut(&id).ok_or(HabitError::NotFound(id))?;
        if habit.progress < habit.target {
            habit.progress += 1;
        }
        habit.completed_today = false;
        Ok(habit.to_record(id))
    }

    /// Back to zero progress
    pub fn reset(&mut self, id: HabitId) -> Result<HabitRecord, HabitError> {
        let habit = self.habits.get_mut(&id).ok_or(HabitError::NotFound(id))?;
        habit.progress = 0;
        habit.completed_today = false;
        Ok(habit.to_record(id))
    }

    pub fn delete(&mut self, id: HabitId) -> Result<(), HabitError> {
        self.habits
            .remove(&id)
            .map(|_| tracing::debug!(id, "Habit deleted"))
            .ok_or(HabitError::NotFound(id))
    }

    pub fn get(&self, id: HabitId) -> Option<HabitRecord> {
        self.habits.get(&id).map(|h| h.to_record(id))
    }

    pub fn list(&self) -> Vec<HabitRecord> {
        self.habits.iter().map(|(&id, h)| h.to_record(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

impl HabitSource for HabitBook {
    fn fetch(&self) -> Vec<HabitRecord> {
        self.list()
    }
}
