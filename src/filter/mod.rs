//! Spatial convolution filters.
//!
//! All filters read neighborhoods through clamp-to-edge sampling from an
//! unmodified copy of the input, accumulate each color channel in `f64`, then
//! round and clamp to `[0, 255]` once per output channel. Alpha is preserved.
//!
//! Empty images are returned unchanged. This is part of the contract, not an
//! error path.

use crate::image::{Pixel, PixelBuffer};
use crate::kernel::{gaussian_1d, Kernel};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{clamp_index, round_clamp_u8};
use crate::util::ImKernelResult;

pub(crate) mod scalar;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Per-channel weighted sum.
pub(crate) trait RgbAccumulate: Copy {
    fn zero() -> Self;
    fn add(&mut self, rgb: [f64; 3], weight: f64);
    fn finish(self) -> [f64; 3];
}

#[cfg(not(feature = "simd"))]
pub(crate) type RgbAccum = scalar::ScalarAccum;

#[cfg(feature = "simd")]
pub(crate) type RgbAccum = simd::SimdAccum;

#[inline]
fn channels(px: Pixel) -> [f64; 3] {
    [f64::from(px.r), f64::from(px.g), f64::from(px.b)]
}

#[inline]
fn store(dst: &mut Pixel, sums: [f64; 3]) {
    *dst = dst.with_rgb(
        round_clamp_u8(sums[0]),
        round_clamp_u8(sums[1]),
        round_clamp_u8(sums[2]),
    );
}

/// Correlates `kernel` with `src` for output row `y`, writing into `out`.
///
/// `out` must hold the destination row, already containing the pixels whose
/// alpha should be kept.
pub(crate) fn correlate_row(src: &PixelBuffer, kernel: &Kernel, y: usize, out: &mut [Pixel]) {
    let (cx, cy) = kernel.center();
    let kw = kernel.width();
    let weights = kernel.as_slice();
    for (x, dst) in out.iter_mut().enumerate() {
        let mut acc = RgbAccum::zero();
        for ky in 0..kernel.height() {
            let sy = y as isize + ky as isize - cy as isize;
            let row = &weights[ky * kw..(ky + 1) * kw];
            for (kx, &w) in row.iter().enumerate() {
                let sx = x as isize + kx as isize - cx as isize;
                acc.add(channels(src.sample(sx, sy)), w);
            }
        }
        store(dst, acc.finish());
    }
}

/// Horizontal 1D pass for row `y` into an unrounded temporary row.
pub(crate) fn blur_row_horizontal(
    src: &PixelBuffer,
    weights: &[f64],
    y: usize,
    out: &mut [[f64; 3]],
) {
    let center = (weights.len() / 2) as isize;
    for (x, dst) in out.iter_mut().enumerate() {
        let mut acc = RgbAccum::zero();
        for (k, &w) in weights.iter().enumerate() {
            let sx = x as isize + k as isize - center;
            acc.add(channels(src.sample(sx, y as isize)), w);
        }
        *dst = acc.finish();
    }
}

/// Vertical 1D pass over the temporary buffer for output row `y`.
pub(crate) fn blur_row_vertical(
    temp: &[[f64; 3]],
    width: usize,
    height: usize,
    weights: &[f64],
    y: usize,
    out: &mut [Pixel],
) {
    let center = (weights.len() / 2) as isize;
    for (x, dst) in out.iter_mut().enumerate() {
        let mut acc = RgbAccum::zero();
        for (k, &w) in weights.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - center, height);
            acc.add(temp[sy * width + x], w);
        }
        store(dst, acc.finish());
    }
}

/// Applies `kernel` to every pixel of `image` (2D correlation, clamp-to-edge).
///
/// For each output pixel the sum is `Σ kernel[ky][kx] * src(x + kx - cx, y + ky - cy)`,
/// per channel, read from a snapshot of the input. Empty images are left as-is.
pub fn filter2d(image: &mut PixelBuffer, kernel: &Kernel) {
    if image.is_empty() {
        return;
    }
    let _span = trace_span!(
        "filter2d",
        width = image.width(),
        height = image.height(),
        kernel_width = kernel.width(),
        kernel_height = kernel.height()
    )
    .entered();

    let src = image.clone();
    let width = src.width();
    for (y, row) in image.pixels_mut().chunks_exact_mut(width).enumerate() {
        correlate_row(&src, kernel, y, row);
    }
}

/// Precondition-checked variant of [`filter2d`] over raw row-major weights.
///
/// Any of: empty image, empty `weights`, zero kernel dimension, or a weight
/// count that is not `kernel_width * kernel_height` leaves the image
/// untouched and returns `false`. Returns `true` when the filter ran.
pub fn filter2d_raw(
    image: &mut PixelBuffer,
    weights: &[f64],
    kernel_width: usize,
    kernel_height: usize,
) -> bool {
    if image.is_empty() || weights.is_empty() {
        return false;
    }
    let kernel = match Kernel::new(weights.to_vec(), kernel_width, kernel_height) {
        Ok(kernel) => kernel,
        Err(_err) => {
            trace_event!("filter2d_raw_rejected", reason = _err.to_string().as_str());
            return false;
        }
    };
    filter2d(image, &kernel);
    true
}

/// Separable Gaussian blur: a horizontal 1D pass into an `f64` buffer, then a
/// vertical pass back into `image`.
///
/// `size` is forced odd. `size == 0` or an empty image is a no-op; a
/// non-positive or non-finite `sigma` is rejected.
pub fn gaussian_blur(image: &mut PixelBuffer, size: usize, sigma: f64) -> ImKernelResult<()> {
    if image.is_empty() || size == 0 {
        return Ok(());
    }
    let kernel = gaussian_1d(size, sigma)?;
    let _span = trace_span!(
        "gaussian_blur",
        width = image.width(),
        height = image.height(),
        size = kernel.width(),
        sigma = sigma
    )
    .entered();

    let width = image.width();
    let height = image.height();
    let weights = kernel.as_slice();

    let mut temp = vec![[0.0f64; 3]; width * height];
    for (y, row) in temp.chunks_exact_mut(width).enumerate() {
        blur_row_horizontal(image, weights, y, row);
    }
    for (y, row) in image.pixels_mut().chunks_exact_mut(width).enumerate() {
        blur_row_vertical(&temp, width, height, weights, y, row);
    }
    Ok(())
}
