//! Particle burst simulation
//!
//! A run spawns its particles once, then advances one physics tick per
//! display refresh. Elapsed time is measured against the wall clock so the
//! burst lasts the same real duration at 30 Hz or 144 Hz.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use pulse_types::CelebrationSettings;
use rand::Rng;
use rand::seq::SliceRandom;

use super::surface::{DrawingSurface, RotatedRect, Rgba, Viewport};

/// Fallback when a caller hands over an empty palette
const FALLBACK_COLOR: Rgba = [255, 255, 255, 255];

/// Height of a particle relative to its width
const ASPECT: f32 = 0.6;

/// One piece of confetti
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub size: f32,
    pub color: Rgba,
    pub rotation: f32,
    pub angular_velocity: f32,
}

impl Particle {
    /// Spawn at `(x, y)` with randomized size, velocity, spin and colour
    pub fn spawn<R: Rng + ?Sized>(x: f32, y: f32, palette: &[Rgba], rng: &mut R) -> Self {
        Self {
            x,
            y,
            size: rng.gen_range(4.0..10.0),
            dx: rng.gen_range(-4.0..4.0),
            // upward-biased: [-12, -6)
            dy: (rng.r#gen::<f32>() - 2.0) * 6.0,
            color: palette.choose(rng).copied().unwrap_or(FALLBACK_COLOR),
            rotation: rng.gen_range(0.0..PI),
            angular_velocity: rng.gen_range(-0.1..0.1),
        }
    }

    /// Advance one tick
    #[inline]
    pub fn step(&mut self, gravity: f32) {
        self.x += self.dx;
        self.y += self.dy;
        self.dy += gravity;
        self.rotation += self.angular_velocity;
    }

    pub fn rect(&self) -> RotatedRect {
        RotatedRect {
            cx: self.x,
            cy: self.y,
            width: self.size,
            height: self.size * ASPECT,
            rotation: self.rotation,
        }
    }
}

/// Parameters for one burst
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub gravity: f32,
    pub duration: Duration,
    pub palette: Vec<Rgba>,
}

impl From<&CelebrationSettings> for SimulationConfig {
    fn from(settings: &CelebrationSettings) -> Self {
        Self {
            particle_count: settings.particle_count,
            gravity: settings.gravity,
            duration: Duration::from_millis(settings.duration_ms),
            palette: settings.palette.clone(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from(&CelebrationSettings::default())
    }
}

/// What the run wants from the display after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Schedule another refresh callback
    Continue,
    /// Do not schedule anything further
    Halt,
}

/// Entry points mirroring a start/stop lifecycle
pub struct ParticleSimulator;

impl ParticleSimulator {
    /// Spawn a burst on `surface`. The first frame is drawn on the first
    /// [`ParticleRun::on_frame`] call.
    pub fn start<S: DrawingSurface, R: Rng + ?Sized>(
        surface: S,
        config: &SimulationConfig,
        rng: &mut R,
        now: Instant,
    ) -> ParticleRun<S> {
        let viewport = surface.viewport();
        let origin_x = viewport.width / 2.0;
        let origin_y = viewport.height / 3.0;

        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(origin_x, origin_y, &config.palette, rng))
            .collect();

        tracing::debug!(
            count = config.particle_count,
            width = viewport.width,
            height = viewport.height,
            "Particle burst started"
        );

        ParticleRun {
            surface: Some(surface),
            particles,
            started_at: now,
            duration: config.duration,
            gravity: config.gravity,
            frames: 0,
            halted: false,
        }
    }

    /// Stop a run early (unmount). Equivalent to dropping the handle.
    pub fn stop<S: DrawingSurface>(run: ParticleRun<S>) {
        drop(run);
    }
}

/// Handle to a live burst. Owns its particles and its surface.
///
/// Dropping the handle clears and detaches the surface, so teardown happens
/// on every exit path.
pub struct ParticleRun<S: DrawingSurface> {
    surface: Option<S>,
    particles: Vec<Particle>,
    started_at: Instant,
    duration: Duration,
    gravity: f32,
    frames: u64,
    halted: bool,
}

impl<S: DrawingSurface> ParticleRun<S> {
    /// Display refresh callback.
    ///
    /// Returns [`FrameRequest::Halt`] once the duration has elapsed (after a
    /// final clear) and on every call after that.
    pub fn on_frame(&mut self, now: Instant) -> FrameRequest {
        if self.halted {
            return FrameRequest::Halt;
        }
        let Some(surface) = self.surface.as_mut() else {
            self.halted = true;
            return FrameRequest::Halt;
        };

        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            if let Err(e) = surface.clear() {
                tracing::warn!(error = %e, "Final particle clear failed");
            }
            self.halted = true;
            self.particles.clear();
            tracing::debug!(frames = self.frames, "Particle burst finished");
            return FrameRequest::Halt;
        }

        for particle in &mut self.particles {
            particle.step(self.gravity);
        }

        if let Err(e) = surface.clear() {
            tracing::warn!(error = %e, "Particle frame clear failed");
        }
        let mut failed = 0usize;
        for particle in &self.particles {
            if surface.draw_rotated_rect(particle.rect(), particle.color).is_err() {
                failed += 1;
            }
        }
        if failed > 0 {
            tracing::warn!(failed, frame = self.frames, "Particle draws failed");
        }

        self.frames += 1;
        FrameRequest::Continue
    }

    /// Viewport changed. Particle state is kept as is.
    pub fn resize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(e) = viewport.validate().and_then(|v| surface.resize(v)) {
            tracing::warn!(error = %e, "Celebration surface resize failed");
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Clear and detach the surface and drop all particles.
    fn release(&mut self) {
        self.halted = true;
        self.particles.clear();
        if let Some(mut surface) = self.surface.take() {
            if let Err(e) = surface.clear() {
                tracing::debug!(error = %e, "Clear on release failed");
            }
            surface.detach();
        }
    }
}

impl<S: DrawingSurface> Drop for ParticleRun<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::test_support::{RecordingSurface, SurfaceLog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn start(log: &SurfaceLog, now: Instant) -> ParticleRun<RecordingSurface> {
        let surface = RecordingSurface::new(Viewport::new(900.0, 600.0, 1.0), log.clone());
        let mut rng = StdRng::seed_from_u64(7);
        ParticleSimulator::start(surface, &SimulationConfig::default(), &mut rng, now)
    }

    #[test]
    fn test_spawns_eighty_particles_at_origin() {
        let log = SurfaceLog::default();
        let run = start(&log, Instant::now());

        assert_eq!(run.particles().len(), 80);
        for p in run.particles() {
            assert_eq!((p.x, p.y), (450.0, 200.0));
        }
    }

    #[test]
    fn test_initial_conditions_in_range() {
        let palette = SimulationConfig::default().palette;
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1_000 {
            let p = Particle::spawn(0.0, 0.0, &palette, &mut rng);
            assert!((4.0..10.0).contains(&p.size));
            assert!((-4.0..4.0).contains(&p.dx));
            assert!((-12.0..=-6.0).contains(&p.dy), "dy={}", p.dy);
            assert!((0.0..PI).contains(&p.rotation));
            assert!((-0.1..0.1).contains(&p.angular_velocity));
            assert!(palette.contains(&p.color));
        }
    }

    #[test]
    fn test_palette_colors_all_used() {
        let palette = SimulationConfig::default().palette;
        let mut rng = StdRng::seed_from_u64(3);
        let seen: std::collections::HashSet<Rgba> = (0..600)
            .map(|_| Particle::spawn(0.0, 0.0, &palette, &mut rng).color)
            .collect();
        assert_eq!(seen.len(), palette.len());
    }

    #[test]
    fn test_step_applies_gravity_after_move() {
        let mut p = Particle {
            x: 10.0,
            y: 10.0,
            dx: 1.0,
            dy: -2.0,
            size: 5.0,
            color: [0, 0, 0, 255],
            rotation: 0.0,
            angular_velocity: 0.05,
        };
        p.step(0.25);
        assert_eq!((p.x, p.y, p.dy), (11.0, 8.0, -1.75));
        assert!((p.rotation - 0.05).abs() < f32::EPSILON);
        p.step(0.25);
        assert_eq!((p.x, p.y, p.dy), (12.0, 6.25, -1.5));
    }

    #[test]
    fn test_frame_clears_and_draws_every_particle() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);

        assert_eq!(run.on_frame(t0 + Duration::from_millis(16)), FrameRequest::Continue);
        assert_eq!(log.clears(), 1);
        assert_eq!(log.rects(), 80);

        assert_eq!(run.on_frame(t0 + Duration::from_millis(32)), FrameRequest::Continue);
        assert_eq!(log.clears(), 2);
        assert_eq!(log.rects(), 160);
    }

    #[test]
    fn test_duration_is_wall_clock_not_frame_count() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);

        // two slow frames then the deadline
        assert_eq!(run.on_frame(t0 + Duration::from_millis(1_000)), FrameRequest::Continue);
        assert_eq!(run.on_frame(t0 + Duration::from_millis(3_799)), FrameRequest::Continue);
        assert_eq!(run.on_frame(t0 + Duration::from_millis(3_800)), FrameRequest::Halt);
        assert_eq!(run.frames(), 2);
        assert!(run.is_halted());
        assert!(run.particles().is_empty());
    }

    #[test]
    fn test_halt_is_final() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);

        assert_eq!(run.on_frame(t0 + Duration::from_secs(10)), FrameRequest::Halt);
        let clears = log.clears();
        assert_eq!(run.on_frame(t0 + Duration::from_secs(11)), FrameRequest::Halt);
        assert_eq!(log.clears(), clears);
        assert_eq!(log.rects(), 0);
    }

    #[test]
    fn test_resize_keeps_particles() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);
        run.on_frame(t0 + Duration::from_millis(16));
        let before = run.particles().to_vec();

        run.resize(Viewport::new(1200.0, 800.0, 2.0));

        assert_eq!(run.particles(), before.as_slice());
        assert_eq!(log.resizes(), vec![Viewport::new(1200.0, 800.0, 2.0)]);
        assert_eq!(run.on_frame(t0 + Duration::from_millis(32)), FrameRequest::Continue);
    }

    #[test]
    fn test_invalid_resize_is_ignored() {
        let log = SurfaceLog::default();
        let mut run = start(&log, Instant::now());
        run.resize(Viewport::new(0.0, 800.0, 1.0));
        assert!(log.resizes().is_empty());
        assert!(!run.is_halted());
    }

    #[test]
    fn test_stop_detaches_surface() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);
        run.on_frame(t0 + Duration::from_millis(16));

        ParticleSimulator::stop(run);

        assert!(log.detached());
    }

    #[test]
    fn test_drop_detaches_surface() {
        let log = SurfaceLog::default();
        {
            let _run = start(&log, Instant::now());
        }
        assert!(log.detached());
    }

    #[test]
    fn test_draw_failures_do_not_block_teardown() {
        let log = SurfaceLog::default();
        log.fail_draws(true);
        let t0 = Instant::now();
        let mut run = start(&log, t0);

        assert_eq!(run.on_frame(t0 + Duration::from_millis(16)), FrameRequest::Continue);
        assert_eq!(run.on_frame(t0 + Duration::from_secs(4)), FrameRequest::Halt);
        drop(run);
        assert!(log.detached());
    }

    #[test]
    fn test_gravity_pulls_burst_down_eventually() {
        let log = SurfaceLog::default();
        let t0 = Instant::now();
        let mut run = start(&log, t0);
        for i in 1..=100 {
            run.on_frame(t0 + Duration::from_millis(i * 16));
        }
        // max upward speed 12 is cancelled after 48 ticks; by tick 100 all fall
        assert!(run.particles().iter().all(|p| p.dy > 0.0));
    }
}
