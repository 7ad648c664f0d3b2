//! Niblack local adaptive threshold.
//!
//! Window statistics come from summed-area tables of `g` and `g²` in `u64`,
//! so every window sum is exact and equals the direct neighborhood sum. At the
//! borders the window is cropped to the image, giving a smaller effective
//! window rather than replicated samples.

use crate::color::gray_level;
use crate::image::PixelBuffer;
use crate::threshold::progress::Progress;
use crate::util::{ImKernelError, ImKernelResult};

/// Window side and weight of the standard deviation in `mean + k * stddev`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NiblackParams {
    window_size: usize,
    k: f64,
}

impl NiblackParams {
    /// Validates a window size (at least 1) and a finite `k`.
    pub fn new(window_size: usize, k: f64) -> ImKernelResult<Self> {
        if window_size == 0 {
            return Err(ImKernelError::InvalidParameter {
                name: "window_size",
                reason: "must be at least 1",
            });
        }
        if !k.is_finite() {
            return Err(ImKernelError::InvalidParameter {
                name: "k",
                reason: "must be finite",
            });
        }
        Ok(Self { window_size, k })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl Default for NiblackParams {
    fn default() -> Self {
        Self {
            window_size: 15,
            k: -0.2,
        }
    }
}

/// Summed-area tables with a zero top row and left column.
struct IntegralImages {
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
    stride: usize,
}

impl IntegralImages {
    fn build(gray: &[u8], width: usize, height: usize) -> Self {
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for x in 0..width {
                let g = u64::from(gray[y * width + x]);
                row_sum += g;
                row_sq += g * g;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sq;
            }
        }
        Self {
            sum,
            sum_sq,
            stride,
        }
    }

    /// Sums over the inclusive rectangle `[x0, x1] x [y0, y1]`.
    #[inline]
    fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> (u64, u64) {
        let s = self.stride;
        let (a, b, c, d) = (y0 * s + x0, y0 * s + x1 + 1, (y1 + 1) * s + x0, (y1 + 1) * s + x1 + 1);
        let sum = self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c];
        let sum_sq = self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c];
        (sum, sum_sq)
    }
}

/// Computes the local threshold for every pixel; `report_row` is called
/// before each row with the row index.
fn local_thresholds(
    gray: &[u8],
    width: usize,
    height: usize,
    params: NiblackParams,
    mut report_row: impl FnMut(usize),
) -> Vec<f64> {
    let integral = IntegralImages::build(gray, width, height);
    let half = params.window_size / 2;
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        report_row(y);
        let y0 = y.saturating_sub(half);
        let y1 = y.saturating_add(half).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = x.saturating_add(half).min(width - 1);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let (sum, sum_sq) = integral.window(x0, y0, x1, y1);
            let mean = sum as f64 / count;
            let variance = sum_sq as f64 / count - mean * mean;
            let std_dev = variance.max(0.0).sqrt();
            out.push(mean + params.k * std_dev);
        }
    }
    out
}

fn gray_levels(image: &PixelBuffer) -> Vec<u8> {
    image.pixels().iter().map(|px| gray_level(*px)).collect()
}

/// Per-pixel Niblack thresholds `mean + k * stddev` in row-major order.
pub fn niblack_threshold_map(image: &PixelBuffer, params: NiblackParams) -> Vec<f64> {
    if image.is_empty() {
        return Vec::new();
    }
    let gray = gray_levels(image);
    local_thresholds(&gray, image.width(), image.height(), params, |_| {})
}

/// Binarizes a grayscale image in place against each pixel's local threshold.
/// Reports `100 * y / height` every 10th row.
pub(crate) fn apply_niblack(image: &mut PixelBuffer, params: NiblackParams, progress: &mut Progress<'_>) {
    if image.is_empty() {
        return;
    }
    let width = image.width();
    let height = image.height();
    let gray = gray_levels(image);
    let thresholds = local_thresholds(&gray, width, height, params, |y| {
        if y % 10 == 0 {
            progress.report((100 * y / height) as u32);
        }
    });
    for ((px, &g), &t) in image.pixels_mut().iter_mut().zip(&gray).zip(&thresholds) {
        let binary = if f64::from(g) >= t { 255 } else { 0 };
        *px = px.with_rgb(binary, binary, binary);
    }
}
