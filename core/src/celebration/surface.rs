//! Drawing surface capability
//!
//! The particle simulator only ever clears, draws rotated rectangles and
//! resizes. Anything that can do those three things (a raster pixmap, a
//! window, a recording test double) can host a celebration.

use crate::error::SurfaceError;

/// RGBA colour, 8 bits per channel
pub type Rgba = [u8; 4];

/// Logical viewport size plus device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixels per logical unit
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn validate(self) -> Result<Self, SurfaceError> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.scale.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.scale > 0.0;
        if ok {
            Ok(self)
        } else {
            Err(SurfaceError::InvalidViewport {
                width: self.width,
                height: self.height,
                scale: self.scale,
            })
        }
    }

    /// Backing store size in device pixels
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale).round().max(1.0) as u32,
            (self.height * self.scale).round().max(1.0) as u32,
        )
    }
}

/// A rectangle rotated about its centre, in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub height: f32,
    /// Radians, clockwise in screen space
    pub rotation: f32,
}

/// Minimal drawing capability needed by the particle simulator
pub trait DrawingSurface {
    /// Current logical viewport
    fn viewport(&self) -> Viewport;

    /// Clear the whole surface to transparent
    fn clear(&mut self) -> Result<(), SurfaceError>;

    fn draw_rotated_rect(&mut self, rect: RotatedRect, color: Rgba) -> Result<(), SurfaceError>;

    /// Resize the backing store and rescale the transform. Drawn content may
    /// be lost; the caller redraws on the next frame.
    fn resize(&mut self, viewport: Viewport) -> Result<(), SurfaceError>;

    /// Detach the surface from its host. Must be idempotent.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;
}

/// Produces a fresh full-viewport surface for each celebration
pub trait SurfaceFactory {
    type Surface: DrawingSurface;

    fn mount(&mut self) -> Result<Self::Surface, SurfaceError>;
}
