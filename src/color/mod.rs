//! Luma-based grayscale reduction.

use crate::image::{Pixel, PixelBuffer};
use crate::trace::{trace_event, trace_span};
use crate::util::math::round_clamp_u8;

/// Standard luma coefficient sets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LumaWeights {
    /// ITU-R BT.601: `0.299 R + 0.587 G + 0.114 B`.
    Bt601,
    /// ITU-R BT.709: `0.2126 R + 0.7152 G + 0.0722 B`.
    #[default]
    Bt709,
}

impl LumaWeights {
    /// Returns `(w_r, w_g, w_b)`.
    pub fn coefficients(self) -> (f64, f64, f64) {
        match self {
            LumaWeights::Bt601 => (0.299, 0.587, 0.114),
            LumaWeights::Bt709 => (0.2126, 0.7152, 0.0722),
        }
    }

    /// Rounded, clamped luma of one color.
    #[inline]
    pub fn luma(self, r: u8, g: u8, b: u8) -> u8 {
        let (wr, wg, wb) = self.coefficients();
        round_clamp_u8(wr * f64::from(r) + wg * f64::from(g) + wb * f64::from(b))
    }
}

/// Gray level of a pixel: the shared channel value when `R == G == B`,
/// otherwise its BT.709 luma.
#[inline]
pub fn gray_level(px: Pixel) -> u8 {
    if px.is_gray() {
        px.r
    } else {
        LumaWeights::Bt709.luma(px.r, px.g, px.b)
    }
}

/// Replaces every pixel with its luma under `weights` (R = G = B = gray).
pub fn to_grayscale(image: &mut PixelBuffer, weights: LumaWeights) {
    if image.is_empty() {
        return;
    }
    let _span = trace_span!(
        "to_grayscale",
        width = image.width(),
        height = image.height(),
        weights = ?weights
    )
    .entered();
    for px in image.pixels_mut() {
        let gray = weights.luma(px.r, px.g, px.b);
        *px = px.with_rgb(gray, gray, gray);
    }
}

/// True iff every pixel has `R == G == B`. Vacuously true for empty images.
pub fn is_grayscale(image: &PixelBuffer) -> bool {
    image.pixels().iter().all(|px| px.is_gray())
}

/// Converts with BT.709 only when the image is not already gray.
///
/// Returns whether a conversion happened. Repeated calls are idempotent and
/// never re-round an already gray image.
pub fn ensure_grayscale(image: &mut PixelBuffer) -> bool {
    if is_grayscale(image) {
        return false;
    }
    to_grayscale(image, LumaWeights::Bt709);
    trace_event!("grayscale_converted", pixels = image.pixels().len());
    true
}
