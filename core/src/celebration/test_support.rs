//! Test doubles for the drawing surface and audio seams

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::surface::{DrawingSurface, RotatedRect, Rgba, SurfaceFactory, Viewport};
use crate::audio::CuePlayer;
use crate::error::SurfaceError;

#[derive(Debug, Default)]
struct LogInner {
    clears: Cell<usize>,
    rects: Cell<usize>,
    resizes: RefCell<Vec<Viewport>>,
    detached: Cell<bool>,
    fail_draws: Cell<bool>,
}

/// Shared view of what a [`RecordingSurface`] was asked to do
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog(Rc<LogInner>);

impl SurfaceLog {
    pub fn clears(&self) -> usize {
        self.0.clears.get()
    }

    pub fn rects(&self) -> usize {
        self.0.rects.get()
    }

    pub fn resizes(&self) -> Vec<Viewport> {
        self.0.resizes.borrow().clone()
    }

    pub fn detached(&self) -> bool {
        self.0.detached.get()
    }

    pub fn fail_draws(&self, fail: bool) {
        self.0.fail_draws.set(fail);
    }
}

pub struct RecordingSurface {
    viewport: Viewport,
    log: SurfaceLog,
    attached: bool,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport, log: SurfaceLog) -> Self {
        Self {
            viewport,
            log,
            attached: true,
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        self.log.0.clears.set(self.log.0.clears.get() + 1);
        Ok(())
    }

    fn draw_rotated_rect(&mut self, _rect: RotatedRect, _color: Rgba) -> Result<(), SurfaceError> {
        if self.log.0.fail_draws.get() {
            return Err(SurfaceError::Draw("forced failure".into()));
        }
        self.log.0.rects.set(self.log.0.rects.get() + 1);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        self.viewport = viewport;
        self.log.0.resizes.borrow_mut().push(viewport);
        Ok(())
    }

    fn detach(&mut self) {
        self.attached = false;
        self.log.0.detached.set(true);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Hands out recording surfaces and keeps every log for inspection
#[derive(Default)]
pub struct RecordingFactory {
    pub logs: Vec<SurfaceLog>,
    pub fail_mount: bool,
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn mount(&mut self) -> Result<RecordingSurface, SurfaceError> {
        if self.fail_mount {
            return Err(SurfaceError::Unavailable("no display".into()));
        }
        let log = SurfaceLog::default();
        self.logs.push(log.clone());
        Ok(RecordingSurface::new(Viewport::new(800.0, 600.0, 1.0), log))
    }
}

/// Counts triggers instead of making sound
#[derive(Debug, Clone, Default)]
pub struct CountingPlayer(pub Rc<Cell<usize>>);

impl CountingPlayer {
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

impl CuePlayer for CountingPlayer {
    fn play(&self) {
        self.0.set(self.0.get() + 1);
    }
}
