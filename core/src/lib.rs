//! Habit completion celebrations
//!
//! Polls habit progress, detects the transition into completion, and runs a
//! one-shot celebration: a particle burst on a drawing surface plus a short
//! synthesized audio cue.

pub mod audio;
pub mod celebration;
pub mod completion;
pub mod config;
pub mod error;
pub mod habits;

// Re-exports for convenience
pub use audio::{AudioCuePlayer, CuePlayer, CueSynthesizer, SilentPlayer};
pub use celebration::{
    CelebrationSignal, DrawingSurface, Orchestrator, Phase, RotatedRect, SurfaceFactory, Viewport,
};
pub use completion::{CompletionEvent, PollState, detect};
pub use error::{AudioError, ConfigError, DetectError, HabitError, SurfaceError};
pub use habits::{HabitBook, HabitSource};
