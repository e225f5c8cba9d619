//! Shell state: the habit book, the poll reducer and the celebration
//! orchestrator, all owned by the single-threaded main loop.

use std::time::Instant;

use chrono::Utc;
use pulse_core::celebration::CelebrationSignal;
use pulse_core::{AudioCuePlayer, HabitBook, HabitSource, Orchestrator, PollState, Viewport};
use pulse_overlay::PixmapFactory;
use pulse_types::PulseConfig;

/// Logical size of the headless overlay
pub const OVERLAY_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
    scale: 1.0,
};

pub struct App {
    config: PulseConfig,
    book: HabitBook,
    poll_state: PollState,
    orchestrator: Orchestrator<PixmapFactory, AudioCuePlayer>,
}

impl App {
    pub fn new(config: PulseConfig, player: AudioCuePlayer) -> Self {
        let orchestrator = Orchestrator::new(
            PixmapFactory::new(OVERLAY_VIEWPORT),
            player,
            &config.celebration,
        );
        Self {
            book: HabitBook::new(&config.habits),
            poll_state: PollState::new(),
            orchestrator,
            config,
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn book(&self) -> &HabitBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut HabitBook {
        &mut self.book
    }

    pub fn orchestrator(&self) -> &Orchestrator<PixmapFactory, AudioCuePlayer> {
        &self.orchestrator
    }

    /// Fetch the book through the reducer and feed any completions to the
    /// orchestrator.
    pub fn poll(&mut self, now: Instant) -> Vec<CelebrationSignal> {
        let records = self.book.fetch();
        let state = std::mem::take(&mut self.poll_state);
        let (next, events) = state.advance(&records, Utc::now());
        self.poll_state = next;
        self.orchestrator.handle_events(events, now)
    }

    /// One display refresh
    pub fn frame(&mut self, now: Instant) -> Vec<CelebrationSignal> {
        self.orchestrator.on_frame(now)
    }

    pub fn shutdown(&mut self) -> Vec<CelebrationSignal> {
        self.orchestrator.shutdown()
    }
}
