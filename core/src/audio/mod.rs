//! Completion cue synthesis and playback
//!
//! ```text
//!   CueSynthesizer ──render()──► Vec<f32> ──► audio thread ──► rodio mixer
//!     ├─ noise  (band-passed, 1.2 kHz)            ▲
//!     ├─ boom   (sine, 100 Hz)                    │ try_send(Play)
//!     └─ click  (triangle, 1.6 kHz)         AudioCuePlayer::play()
//! ```
//!
//! Rendering is pure and testable without a device. Playback is best effort:
//! a missing or failing output is logged once and every later trigger is a
//! no-op.

mod cue;
mod envelope;
mod filter;
mod player;
mod voice;

pub use cue::CueSynthesizer;
pub use envelope::{ENVELOPE_FLOOR, GainEnvelope};
pub use filter::BandPass;
pub use player::{AudioCommand, AudioCuePlayer, CuePlayer, OutputParams, SilentPlayer};
pub use voice::{Voice, VoiceSource, Waveform};
