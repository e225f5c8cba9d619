use std::f32::consts::TAU;

use rand::Rng;

use super::envelope::GainEnvelope;
use super::filter::BandPass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` in cycles. Both shapes start at zero heading up.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => {
                let p = (phase + 0.25).fract();
                1.0 - 4.0 * (p - 0.5).abs()
            }
        }
    }
}

/// Where a voice's raw signal comes from
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceSource {
    Oscillator { waveform: Waveform, frequency: f32 },
    /// Uniform white noise in [-1, 1] through a band-pass
    FilteredNoise {
        length_secs: f32,
        center_hz: f32,
        q: f32,
    },
}

/// One sound source with its gain envelope and play window.
///
/// Offsets and envelope times are seconds relative to the cue's "now".
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub name: &'static str,
    pub source: VoiceSource,
    pub envelope: GainEnvelope,
    pub start_offset: f32,
    pub stop_offset: f32,
}

impl Voice {
    /// Mix this voice into `out` (mono, `sample_rate` Hz, index 0 = cue start)
    pub fn render_into<R: Rng + ?Sized>(&self, out: &mut [f32], sample_rate: u32, rng: &mut R) {
        let sr = sample_rate as f32;
        let start = (self.start_offset * sr).round().max(0.0) as usize;
        let mut stop = ((self.stop_offset * sr).round().max(0.0) as usize).min(out.len());

        let raw: Vec<f32> = match &self.source {
            VoiceSource::Oscillator {
                waveform,
                frequency,
            } => {
                let step = frequency / sr;
                let mut phase = 0.0f32;
                (start..stop)
                    .map(|_| {
                        let s = waveform.sample(phase);
                        phase = (phase + step).fract();
                        s
                    })
                    .collect()
            }
            VoiceSource::FilteredNoise {
                length_secs,
                center_hz,
                q,
            } => {
                let len = (length_secs * sr).round() as usize;
                stop = stop.min(start + len);
                let mut buffer: Vec<f32> = (0..len).map(|_| rng.gen_range(-1.0..=1.0)).collect();
                BandPass::new(*center_hz, *q, sample_rate).process_buffer(&mut buffer);
                buffer.truncate(stop.saturating_sub(start));
                buffer
            }
        };

        for (i, s) in raw.into_iter().enumerate() {
            let idx = start + i;
            if idx >= stop {
                break;
            }
            let t = i as f32 / sr;
            out[idx] += s * self.envelope.value_at(t);
        }
    }
}
