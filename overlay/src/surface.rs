//! Raster drawing surface
//!
//! A full-viewport transparent [`Pixmap`] sized in device pixels. Drawing
//! happens in logical units; the device pixel ratio is folded into every
//! transform so particles stay crisp on high-density displays.

use std::path::Path;

use pulse_core::{DrawingSurface, RotatedRect, SurfaceError, SurfaceFactory, Viewport};
use tiny_skia::{Color, Paint, Pixmap, Rect};

use crate::utils::{color_from_rgba, rect_transform};

pub struct PixmapSurface {
    pixmap: Pixmap,
    viewport: Viewport,
    attached: bool,
}

impl PixmapSurface {
    pub fn new(viewport: Viewport) -> Result<Self, SurfaceError> {
        let viewport = viewport.validate()?;
        Ok(Self {
            pixmap: allocate(viewport)?,
            viewport,
            attached: true,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Device pixels with any coverage at all
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SurfaceError> {
        self.pixmap
            .save_png(path)
            .map_err(|e| SurfaceError::Draw(format!("{}: {e}", path.display())))
    }
}

fn allocate(viewport: Viewport) -> Result<Pixmap, SurfaceError> {
    let (width, height) = viewport.device_size();
    Pixmap::new(width, height)
        .ok_or_else(|| SurfaceError::Unavailable(format!("cannot allocate {width}x{height} pixmap")))
}

impl DrawingSurface for PixmapSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        if self.attached {
            self.pixmap.fill(Color::TRANSPARENT);
        }
        Ok(())
    }

    /// Ignored once detached
    fn draw_rotated_rect(&mut self, rect: RotatedRect, color: [u8; 4]) -> Result<(), SurfaceError> {
        if !self.attached {
            return Ok(());
        }

        let degenerate =
            || SurfaceError::Draw(format!("degenerate rect {}x{}", rect.width, rect.height));
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return Err(degenerate());
        }
        let shape = Rect::from_xywh(-rect.width / 2.0, -rect.height / 2.0, rect.width, rect.height)
            .ok_or_else(degenerate)?;

        let mut paint = Paint::default();
        paint.set_color(color_from_rgba(color));
        paint.anti_alias = true;

        self.pixmap
            .fill_rect(shape, &paint, rect_transform(&rect, self.viewport.scale), None);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        let viewport = viewport.validate()?;
        if viewport.device_size() != self.viewport.device_size() {
            self.pixmap = allocate(viewport)?;
        }
        self.viewport = viewport;
        Ok(())
    }

    fn detach(&mut self) {
        if self.attached {
            tracing::trace!("Pixmap surface detached");
        }
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Mounts a fresh pixmap covering the current viewport for each celebration
#[derive(Debug, Clone)]
pub struct PixmapFactory {
    viewport: Viewport,
    mounted: u64,
}

impl PixmapFactory {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mounted: 0,
        }
    }

    /// Viewport used for the next mount
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mounted(&self) -> u64 {
        self.mounted
    }
}

impl SurfaceFactory for PixmapFactory {
    type Surface = PixmapSurface;

    fn mount(&mut self) -> Result<PixmapSurface, SurfaceError> {
        let surface = PixmapSurface::new(self.viewport)?;
        self.mounted += 1;
        Ok(surface)
    }
}
