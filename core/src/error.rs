//! Error types for the celebration pipeline
//!
//! None of these are fatal to the host: the poll reducer, the orchestrator and
//! the audio player catch them at their boundary and log.

use std::path::PathBuf;

use pulse_types::HabitId;
use thiserror::Error;

/// Malformed habit data seen during a poll
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("habit {id}: missing field `{field}`")]
    MissingField { id: HabitId, field: &'static str },

    #[error("habit {id}: target must be greater than zero")]
    ZeroTarget { id: HabitId },

    #[error("habit {id} reported more than once in a single poll")]
    DuplicateId { id: HabitId },

    #[error("invalid habit payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drawing surface failures
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),

    #[error("invalid viewport {width}x{height} @ {scale}")]
    InvalidViewport { width: f32, height: f32, scale: f32 },

    #[error("drawing surface already detached")]
    Detached,

    #[error("draw failed: {0}")]
    Draw(String),
}

/// Audio output failures. Only ever logged.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),

    #[error("audio playback failed: {0}")]
    Playback(String),

    #[error("audio thread could not be started: {0}")]
    Thread(#[from] std::io::Error),
}

/// Config file load/store failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },
}

/// Rejected mutations on the habit book
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HabitError {
    #[error("habit {0} not found")]
    NotFound(HabitId),

    #[error("habit name must not be empty")]
    EmptyName,

    #[error("target must be greater than zero")]
    ZeroTarget,
}
