//! Celebration lifecycle
//!
//! `Idle → Active → Idle`. Only one overlay is live at a time; completion
//! events that arrive while a celebration is running are dropped (their toast
//! still goes out, since the notification collaborator is independent of the
//! overlay slot).

use std::time::Instant;

use pulse_types::formatting::celebration_message;
use pulse_types::{CelebrationSettings, HabitId};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::particles::{ParticleRun, ParticleSimulator, SimulationConfig};
use super::session::{CelebrationSession, ScheduledTeardown};
use super::surface::{DrawingSurface, SurfaceFactory, Viewport};
use crate::audio::CuePlayer;
use crate::completion::CompletionEvent;

/// Output for the presentation and notification collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CelebrationSignal {
    /// Mount the overlay for this habit
    Show { habit_id: HabitId, name: String },
    /// Unmount the overlay
    Hide { habit_id: HabitId },
    /// Human-readable message for the toast collaborator
    Toast(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
}

struct ActiveCelebration<S: DrawingSurface> {
    session: CelebrationSession,
    run: ParticleRun<S>,
    teardown: ScheduledTeardown,
}

/// Owns the single overlay slot and every session that occupies it
pub struct Orchestrator<F: SurfaceFactory, A: CuePlayer> {
    factory: F,
    audio: A,
    config: SimulationConfig,
    rng: StdRng,
    active: Option<ActiveCelebration<F::Surface>>,
    dropped: u64,
    completed: u64,
}

impl<F: SurfaceFactory, A: CuePlayer> Orchestrator<F, A> {
    pub fn new(factory: F, audio: A, settings: &CelebrationSettings) -> Self {
        Self::with_rng(factory, audio, settings, StdRng::from_entropy())
    }

    /// Same as [`new`](Self::new) with a caller-provided RNG (seeded runs)
    pub fn with_rng(factory: F, audio: A, settings: &CelebrationSettings, rng: StdRng) -> Self {
        Self {
            factory,
            audio,
            config: SimulationConfig::from(settings),
            rng,
            active: None,
            dropped: 0,
            completed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.active.is_some() {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&CelebrationSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn particle_run(&self) -> Option<&ParticleRun<F::Surface>> {
        self.active.as_ref().map(|a| &a.run)
    }

    /// When the live session will be torn down
    pub fn teardown_deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.teardown.deadline())
    }

    /// Events dropped because the overlay slot was busy
    pub fn dropped_events(&self) -> u64 {
        self.dropped
    }

    /// Sessions that ran to completion or were shut down
    pub fn completed_sessions(&self) -> u64 {
        self.completed
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Accept one completion event.
    pub fn handle_event(&mut self, event: CompletionEvent, now: Instant) -> Vec<CelebrationSignal> {
        let toast = CelebrationSignal::Toast(celebration_message(&event.name));

        if let Some(active) = &self.active {
            self.dropped += 1;
            tracing::debug!(
                habit_id = event.habit_id,
                active_habit_id = active.session.event.habit_id,
                "Celebration already running, dropping trigger"
            );
            return vec![toast];
        }

        let surface = match self.factory.mount() {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!(habit_id = event.habit_id, error = %e, "Could not mount celebration surface");
                self.audio.play();
                return vec![toast];
            }
        };

        // Visual and audio onset in the same step
        let run = ParticleSimulator::start(surface, &self.config, &mut self.rng, now);
        self.audio.play();

        tracing::info!(habit_id = event.habit_id, name = %event.name, "Celebration started");

        let show = CelebrationSignal::Show {
            habit_id: event.habit_id,
            name: event.name.clone(),
        };
        self.active = Some(ActiveCelebration {
            session: CelebrationSession {
                event,
                started_at: now,
                duration: self.config.duration,
            },
            run,
            teardown: ScheduledTeardown::after(now, self.config.duration),
        });

        vec![show, toast]
    }

    /// Accept every event from one poll, in order
    pub fn handle_events(
        &mut self,
        events: impl IntoIterator<Item = CompletionEvent>,
        now: Instant,
    ) -> Vec<CelebrationSignal> {
        events
            .into_iter()
            .flat_map(|event| self.handle_event(event, now))
            .collect()
    }

    /// Display refresh callback. Advances the burst and runs teardown once due.
    pub fn on_frame(&mut self, now: Instant) -> Vec<CelebrationSignal> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        if active.teardown.is_due(now) {
            return self.teardown();
        }

        active.run.on_frame(now);
        Vec::new()
    }

    /// Viewport changed. Never cancels a live run.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(active) = self.active.as_mut() {
            active.run.resize(viewport);
        }
    }

    /// Host is going away. Cancels the pending teardown and releases the
    /// surface now. Audio already handed off is left to finish.
    pub fn shutdown(&mut self) -> Vec<CelebrationSignal> {
        match self.active.as_mut() {
            Some(active) => {
                active.teardown.cancel();
                self.teardown()
            }
            None => Vec::new(),
        }
    }

    fn teardown(&mut self) -> Vec<CelebrationSignal> {
        let Some(active) = self.active.take() else {
            return Vec::new();
        };
        let habit_id = active.session.event.habit_id;
        let frames = active.run.frames();

        // Dropping the run clears and detaches the surface
        ParticleSimulator::stop(active.run);
        self.completed += 1;

        tracing::debug!(habit_id, frames, "Celebration torn down");
        vec![CelebrationSignal::Hide { habit_id }]
    }
}

impl<F: SurfaceFactory, A: CuePlayer> Drop for Orchestrator<F, A> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
