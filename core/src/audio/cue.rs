//! The celebration "blast": filtered noise burst, low sine boom, high
//! triangle click. All three start together and mix additively.

use rand::Rng;

use super::envelope::{ENVELOPE_FLOOR, GainEnvelope};
use super::voice::{Voice, VoiceSource, Waveform};

/// A set of voices rendered into one mono buffer
#[derive(Debug, Clone, PartialEq)]
pub struct CueSynthesizer {
    voices: Vec<Voice>,
}

impl CueSynthesizer {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    /// The three-voice completion cue
    pub fn celebration() -> Self {
        let noise = Voice {
            name: "noise",
            source: VoiceSource::FilteredNoise {
                length_secs: 1.0,
                center_hz: 1_200.0,
                q: 0.8,
            },
            envelope: GainEnvelope::starting_at(ENVELOPE_FLOOR)
                .exp_ramp_to(0.5, 0.010)
                .exp_ramp_to(ENVELOPE_FLOOR, 0.600),
            start_offset: 0.0,
            stop_offset: 0.700,
        };

        let boom = Voice {
            name: "boom",
            source: VoiceSource::Oscillator {
                waveform: Waveform::Sine,
                frequency: 100.0,
            },
            envelope: GainEnvelope::starting_at(ENVELOPE_FLOOR)
                .exp_ramp_to(0.7, 0.020)
                .exp_ramp_to(ENVELOPE_FLOOR, 0.900),
            start_offset: 0.0,
            stop_offset: 0.900,
        };

        let click = Voice {
            name: "click",
            source: VoiceSource::Oscillator {
                waveform: Waveform::Triangle,
                frequency: 1_600.0,
            },
            envelope: GainEnvelope::starting_at(ENVELOPE_FLOOR)
                .exp_ramp_to(0.6, 0.002)
                .exp_ramp_to(ENVELOPE_FLOOR, 0.090),
            start_offset: 0.0,
            stop_offset: 0.100,
        };

        Self::new(vec![noise, boom, click])
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Length of the rendered cue: the latest stop offset
    pub fn duration_secs(&self) -> f32 {
        self.voices
            .iter()
            .map(|v| v.stop_offset)
            .fold(0.0, f32::max)
    }

    /// Render all voices into a mono buffer, hard-limited to [-1, 1]
    pub fn render<R: Rng + ?Sized>(&self, sample_rate: u32, rng: &mut R) -> Vec<f32> {
        let len = (self.duration_secs() * sample_rate as f32).round() as usize;
        let mut out = vec![0.0f32; len];

        for voice in &self.voices {
            voice.render_into(&mut out, sample_rate, rng);
        }
        for s in &mut out {
            *s = s.clamp(-1.0, 1.0);
        }
        out
    }
}

impl Default for CueSynthesizer {
    fn default() -> Self {
        Self::celebration()
    }
}
