use std::time::{Duration, Instant};

use crate::completion::CompletionEvent;

/// One bounded-lifetime celebration. Created and destroyed only by the
/// orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationSession {
    pub event: CompletionEvent,
    pub started_at: Instant,
    pub duration: Duration,
}

impl CelebrationSession {
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}

/// Teardown scheduled at trigger time.
///
/// Polled by the frame driver rather than armed on a timer thread, so a
/// cancelled task can never fire against a surface that is already gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTeardown {
    deadline: Instant,
    cancelled: bool,
}

impl ScheduledTeardown {
    pub fn after(start: Instant, delay: Duration) -> Self {
        Self {
            deadline: start + delay,
            cancelled: false,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.cancelled && now >= self.deadline
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Time left before the deadline, zero once due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}
