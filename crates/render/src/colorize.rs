//! Mask recoloring.

use image::{Rgba, RgbaImage};
use koi_engine_core::Rgb8;

/// Mask pixels with alpha at or below this stay fully transparent.
pub const ALPHA_THRESHOLD: u8 = 0;

/// Paints `color` through `mask` into a new image; the mask is untouched.
///
/// Pixels whose alpha exceeds [`ALPHA_THRESHOLD`] take `color` and keep the
/// mask's alpha. Everything else becomes transparent black. Edges are not
/// blended.
pub fn colorize(mask: &RgbaImage, color: Rgb8) -> RgbaImage {
    let mut out = RgbaImage::new(mask.width(), mask.height());
    for (dst, src) in out.pixels_mut().zip(mask.pixels()) {
        let alpha = src[3];
        if alpha > ALPHA_THRESHOLD {
            *dst = Rgba([color.r, color.g, color.b, alpha]);
        }
    }
    out
}
