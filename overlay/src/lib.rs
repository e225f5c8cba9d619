//! Headless rendering for Pulse celebrations
//!
//! [`PixmapSurface`] implements the core drawing capability on a tiny-skia
//! pixmap, so a burst can be rendered, inspected and exported without a
//! window system. [`logging`] holds the subscriber setup shared by the
//! binaries.

pub mod logging;
pub mod surface;
pub mod utils;

pub use surface::{PixmapFactory, PixmapSurface};
