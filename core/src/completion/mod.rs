//! Completion detection
//!
//! - **Detector**: pure comparison of two snapshot sets
//! - **Poll reducer**: threads the previous snapshot set through each poll
//!
//! ```text
//!   habit collaborator ──records──▶ PollState::advance ──▶ (next PollState, events)
//!                                        │
//!                                        └── detect(previous, current)
//! ```

mod detector;
mod poll;

pub use detector::{CompletionEvent, detect};
pub use poll::{PollState, snapshots_from_records};
