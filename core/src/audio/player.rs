//! Fire-and-forget cue playback
//!
//! One output stream is opened on a dedicated audio thread and reused for
//! every trigger; each trigger renders fresh voices and hands them to the
//! device mixer. Nothing here ever reports an error to the caller.

use std::thread;
use std::time::{Duration, Instant};

use pulse_types::AudioSettings;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

use crate::error::AudioError;

/// Pending triggers beyond this are dropped
const QUEUE_DEPTH: usize = 4;

/// Something that can play the completion cue
pub trait CuePlayer {
    /// Trigger the cue. Must return immediately and never fail.
    fn play(&self);
}

/// Player used when audio is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl CuePlayer for SilentPlayer {
    fn play(&self) {}
}

/// Commands sent to the audio thread
#[derive(Debug)]
pub enum AudioCommand {
    Play,
}

/// Parameters handed to the output thread
#[derive(Debug, Clone, Copy)]
pub struct OutputParams {
    pub sample_rate: u32,
    /// Linear gain, 0.0 - 1.0
    pub gain: f32,
}

impl From<&AudioSettings> for OutputParams {
    fn from(settings: &AudioSettings) -> Self {
        Self {
            sample_rate: settings.sample_rate,
            gain: settings.volume.min(100) as f32 / 100.0,
        }
    }
}

/// Handle to the audio thread
#[derive(Debug)]
pub struct AudioCuePlayer {
    tx: Option<Sender<AudioCommand>>,
}

impl AudioCuePlayer {
    /// Start the audio thread on the default output device.
    ///
    /// Returns a silent player if audio is disabled in `settings`.
    pub fn spawn(settings: &AudioSettings) -> Self {
        if !settings.enabled {
            tracing::info!("Audio cues disabled");
            return Self::silent();
        }
        Self::spawn_with(settings, device_output)
    }

    /// Start the audio thread with a custom output loop
    pub fn spawn_with<F>(settings: &AudioSettings, output: F) -> Self
    where
        F: FnOnce(Receiver<AudioCommand>, OutputParams) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let params = OutputParams::from(settings);

        let spawned = thread::Builder::new()
            .name("pulse-audio".to_string())
            .spawn(move || output(rx, params));

        match spawned {
            Ok(_) => Self { tx: Some(tx) },
            Err(e) => {
                tracing::warn!(error = %AudioError::from(e), "Audio cues unavailable");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { tx: None }
    }

    /// False once the output thread has gone away
    pub fn is_available(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

impl CuePlayer for AudioCuePlayer {
    fn play(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(AudioCommand::Play) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!("Audio queue full, skipping cue");
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("Audio output gone, skipping cue");
            }
        }
    }
}

/// Output loop for the default rodio device.
#[cfg(feature = "playback")]
fn device_output(mut rx: Receiver<AudioCommand>, params: OutputParams) {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rodio::Source;
    use rodio::buffer::SamplesBuffer;

    use super::cue::CueSynthesizer;

    // Stream must outlive every cue handed to it
    let (_stream, handle) = match rodio::OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %AudioError::NoDevice(e.to_string()), "Audio cues unavailable");
            return;
        }
    };

    let synth = CueSynthesizer::celebration();
    let tail = Duration::from_secs_f32(synth.duration_secs());
    let mut rng = StdRng::from_entropy();
    let mut last_play: Option<Instant> = None;

    tracing::debug!(sample_rate = params.sample_rate, gain = params.gain, "Audio output ready");

    while let Some(command) = rx.blocking_recv() {
        match command {
            AudioCommand::Play => {
                let samples = synth.render(params.sample_rate, &mut rng);
                let source = SamplesBuffer::new(1, params.sample_rate, samples).amplify(params.gain);
                if let Err(e) = handle.play_raw(source) {
                    tracing::warn!(error = %AudioError::Playback(e.to_string()), "Audio cue failed");
                }
                last_play = Some(Instant::now());
            }
        }
    }

    ring_out(last_play, tail);
}

#[cfg(not(feature = "playback"))]
fn device_output(mut rx: Receiver<AudioCommand>, _params: OutputParams) {
    tracing::info!("Built without playback support, audio cues are silent");
    while rx.blocking_recv().is_some() {}
    ring_out(None, Duration::ZERO);
}

/// Keep the stream open until the last cue has finished
fn ring_out(last_play: Option<Instant>, tail: Duration) {
    if let Some(at) = last_play {
        thread::sleep(tail.saturating_sub(at.elapsed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_closed(player: &AudioCuePlayer) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while player.is_available() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_disabled_player_is_silent() {
        let settings = AudioSettings {
            enabled: false,
            ..Default::default()
        };
        let player = AudioCuePlayer::spawn(&settings);
        assert!(!player.is_available());
        player.play();
    }

    #[test]
    fn test_missing_device_is_a_no_op() {
        // Output loop gives up immediately, as it does when no device opens
        let player = AudioCuePlayer::spawn_with(&AudioSettings::default(), |_rx, _params| {});
        wait_closed(&player);

        assert!(!player.is_available());
        for _ in 0..10 {
            player.play();
        }
    }

    #[test]
    fn test_panicking_output_is_contained() {
        let player = AudioCuePlayer::spawn_with(&AudioSettings::default(), |_rx, _params| {
            panic!("device exploded");
        });
        wait_closed(&player);
        player.play();
        assert!(!player.is_available());
    }

    #[test]
    fn test_triggers_reach_output_thread() {
        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let player = AudioCuePlayer::spawn_with(&AudioSettings::default(), move |mut rx, params| {
            let mut count = 0;
            while let Some(AudioCommand::Play) = rx.blocking_recv() {
                count += 1;
                if count == 2 {
                    break;
                }
            }
            let _ = done_tx.send((count, params.gain));
        });

        player.play();
        player.play();

        let (count, gain) = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(count, 2);
        assert!((gain - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_full_queue_drops_quietly() {
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let player = AudioCuePlayer::spawn_with(&AudioSettings::default(), move |_rx, _params| {
            let _ = release_rx.recv_timeout(Duration::from_secs(5));
        });
        for _ in 0..(QUEUE_DEPTH * 3) {
            player.play();
        }
        let _ = release_tx.send(());
    }

    #[test]
    fn test_volume_maps_to_gain() {
        let settings = AudioSettings {
            volume: 250,
            ..Default::default()
        };
        assert_eq!(OutputParams::from(&settings).gain, 1.0);
        let settings = AudioSettings {
            volume: 0,
            ..Default::default()
        };
        assert_eq!(OutputParams::from(&settings).gain, 0.0);
    }
}
