//! Configuration types
//!
//! The whole tree round-trips through TOML. Every field has a serde default so
//! a partial or older config file still loads.

use serde::{Deserialize, Serialize};

/// Largest burst a celebration will spawn
pub const MAX_PARTICLE_COUNT: usize = 5_000;

/// Slowest and fastest rates the cue is rendered at
pub const MIN_SAMPLE_RATE: u32 = 8_000;
pub const MAX_SAMPLE_RATE: u32 = 192_000;

// ═══════════════════════════════════════════════════════════════════════════
// Celebration
// ═══════════════════════════════════════════════════════════════════════════

/// Visual overlay settings for a celebration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrationSettings {
    /// How long the overlay stays mounted
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Number of particles spawned per burst
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,

    /// Downward acceleration in units per tick squared
    #[serde(default = "default_gravity")]
    pub gravity: f32,

    /// RGBA colours particles are drawn from
    #[serde(default = "default_palette")]
    pub palette: Vec<[u8; 4]>,
}

impl Default for CelebrationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            particle_count: default_particle_count(),
            gravity: default_gravity(),
            palette: default_palette(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Audio
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Playback volume, 0-100
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Rate the cue is rendered at before it is handed to the device
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
            sample_rate: default_sample_rate(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Polling and habits
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSettings {
    /// Interval between polls of the habit collaborator
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSettings {
    /// Target used when a habit is created without one
    #[serde(default = "default_target")]
    pub default_target: u32,
}

impl Default for HabitSettings {
    fn default() -> Self {
        Self {
            default_target: default_target(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Root
// ═══════════════════════════════════════════════════════════════════════════

/// Root of the `pulse` config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    #[serde(default)]
    pub celebration: CelebrationSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub habits: HabitSettings,
}

impl PulseConfig {
    /// Clamp values that would make a celebration impossible to run.
    ///
    /// Returns the names of the fields that were changed.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut fixed = Vec::new();

        if self.celebration.duration_ms == 0 {
            self.celebration.duration_ms = default_duration_ms();
            fixed.push("celebration.duration_ms");
        }
        if self.celebration.particle_count == 0 {
            self.celebration.particle_count = default_particle_count();
            fixed.push("celebration.particle_count");
        } else if self.celebration.particle_count > MAX_PARTICLE_COUNT {
            self.celebration.particle_count = MAX_PARTICLE_COUNT;
            fixed.push("celebration.particle_count");
        }
        if !self.celebration.gravity.is_finite() {
            self.celebration.gravity = default_gravity();
            fixed.push("celebration.gravity");
        }
        if self.celebration.palette.is_empty() {
            self.celebration.palette = default_palette();
            fixed.push("celebration.palette");
        }
        if self.audio.volume > 100 {
            self.audio.volume = 100;
            fixed.push("audio.volume");
        }
        if self.audio.sample_rate < MIN_SAMPLE_RATE {
            self.audio.sample_rate = default_sample_rate();
            fixed.push("audio.sample_rate");
        } else if self.audio.sample_rate > MAX_SAMPLE_RATE {
            self.audio.sample_rate = MAX_SAMPLE_RATE;
            fixed.push("audio.sample_rate");
        }
        if self.poll.interval_ms == 0 {
            self.poll.interval_ms = default_poll_interval_ms();
            fixed.push("poll.interval_ms");
        }
        if self.habits.default_target == 0 {
            self.habits.default_target = default_target();
            fixed.push("habits.default_target");
        }

        fixed
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Serde Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn default_true() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    3_800
}

fn default_particle_count() -> usize {
    80
}

fn default_gravity() -> f32 {
    0.25
}

fn default_palette() -> Vec<[u8; 4]> {
    vec![
        [0x06, 0xb6, 0xd4, 255], // Cyan
        [0x8b, 0x5c, 0xf6, 255], // Violet
        [0x3b, 0x82, 0xf6, 255], // Blue
        [0xf9, 0x73, 0x16, 255], // Orange
        [0xef, 0x44, 0x44, 255], // Red
        [0x10, 0xb9, 0x81, 255], // Emerald
    ]
}

fn default_volume() -> u8 {
    80
}

fn default_sample_rate() -> u32 {
    44_100
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_target() -> u32 {
    30
}
