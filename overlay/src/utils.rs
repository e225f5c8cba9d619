//! Common helpers for pixmap rendering

use tiny_skia::{Color, Transform};

use pulse_core::RotatedRect;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Device transform for a rect rotated about its centre.
///
/// Logical units are scaled by `scale` (the device pixel ratio); the rect is
/// then drawn centred on the origin of the returned transform.
#[inline]
pub fn rect_transform(rect: &RotatedRect, scale: f32) -> Transform {
    Transform::from_scale(scale, scale)
        .pre_translate(rect.cx, rect.cy)
        .pre_rotate(rect.rotation.to_degrees())
}
