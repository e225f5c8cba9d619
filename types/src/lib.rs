//! Shared types for Pulse
//!
//! Habit records exchanged with the habit collaborator, the snapshot view the
//! completion detector works on, and the serde configuration tree shared by
//! the core, overlay and shell crates.

pub mod config;
pub mod formatting;
pub mod habit;

pub use config::{AudioSettings, CelebrationSettings, HabitSettings, PollSettings, PulseConfig};
pub use habit::{HabitId, HabitRecord, HabitSnapshot};
