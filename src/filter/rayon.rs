//! Rayon row-parallel filters (feature-gated).
//!
//! Each output row depends only on the read-only snapshot (or the finished
//! horizontal pass), so rows are computed independently and the results are
//! identical to [`filter2d`](crate::filter::filter2d) and
//! [`gaussian_blur`](crate::filter::gaussian_blur).

use crate::filter::{blur_row_horizontal, blur_row_vertical, correlate_row};
use crate::image::PixelBuffer;
use crate::kernel::{gaussian_1d, Kernel};
use crate::trace::trace_span;
use crate::util::ImKernelResult;
use rayon::prelude::*;

/// Row-parallel [`filter2d`](crate::filter::filter2d).
pub fn filter2d_par(image: &mut PixelBuffer, kernel: &Kernel) {
    if image.is_empty() {
        return;
    }
    let _span = trace_span!(
        "filter2d_par",
        width = image.width(),
        height = image.height(),
        kernel_width = kernel.width(),
        kernel_height = kernel.height()
    )
    .entered();

    let src = image.clone();
    let width = src.width();
    image
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| correlate_row(&src, kernel, y, row));
}

/// Row-parallel [`gaussian_blur`](crate::filter::gaussian_blur).
pub fn gaussian_blur_par(image: &mut PixelBuffer, size: usize, sigma: f64) -> ImKernelResult<()> {
    if image.is_empty() || size == 0 {
        return Ok(());
    }
    let kernel = gaussian_1d(size, sigma)?;
    let _span = trace_span!(
        "gaussian_blur_par",
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
    {
        let src: &PixelBuffer = image;
        temp.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| blur_row_horizontal(src, weights, y, row));
    }
    image
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| blur_row_vertical(&temp, width, height, weights, y, row));
    Ok(())
}
