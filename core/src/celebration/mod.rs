//! Celebration overlay
//!
//! This module provides:
//! - **Surface**: the drawing capability a burst renders onto
//! - **Particles**: the burst simulation itself
//! - **Orchestrator**: the `Idle → Active → Idle` lifecycle owning the single
//!   overlay slot
//!
//! # Architecture
//!
//! ```text
//!  CompletionEvent ──▶ Orchestrator ──mount──▶ SurfaceFactory
//!                          │  │
//!                          │  └──play──▶ CuePlayer (independent audio timeline)
//!                          ▼
//!                   ParticleRun ◀── on_frame(now) from the display refresh
//!                          │
//!                          ▼
//!                   DrawingSurface (clear / draw_rotated_rect / resize)
//! ```

mod orchestrator;
mod particles;
mod session;
mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::{CelebrationSignal, Orchestrator, Phase};
pub use particles::{FrameRequest, Particle, ParticleRun, ParticleSimulator, SimulationConfig};
pub use session::{CelebrationSession, ScheduledTeardown};
pub use surface::{DrawingSurface, RotatedRect, Rgba, SurfaceFactory, Viewport};
