//! Binarization of images into two gray levels (0 and 255).
//!
//! Every algorithm runs the same pipeline: ensure the image is grayscale,
//! compute a threshold (global, or per pixel for Niblack), then map
//! `gray >= T` to 255 and everything else to 0. Alpha is preserved.
//!
//! The global algorithms search a split level `t` with background
//! `0..=t`; the applied threshold is `t + 1` so that the output agrees with
//! the chosen split. Degenerate inputs (empty image, single gray level) never
//! fail: they fall back to `T = 0` and every pixel becomes foreground.
//!
//! Progress milestones are coarse and non-decreasing; the final report is
//! always 100.

use crate::color::{ensure_grayscale, gray_level};
use crate::image::PixelBuffer;
use crate::trace::{trace_span, trace_threshold};

pub mod histogram;
pub mod huang;
pub mod isodata;
pub mod niblack;
pub mod otsu;
pub mod progress;

pub use histogram::Histogram;
pub use huang::{huang_split, huang_threshold};
pub use isodata::{isodata_threshold, IsodataOutcome, ISODATA_MAX_ITERATIONS};
pub use niblack::{niblack_threshold_map, NiblackParams};
pub use otsu::{otsu_split, otsu_threshold};
pub use progress::{Progress, ProgressSink};

/// Binarization algorithm selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Method {
    Otsu,
    Huang,
    Niblack(NiblackParams),
    Isodata,
}

pub(crate) fn threshold_from_split(split: Option<u8>) -> u8 {
    split.map_or(0, |t| t.saturating_add(1))
}

/// Maps `gray >= threshold` to white and the rest to black.
pub fn apply_threshold(image: &mut PixelBuffer, threshold: u8) {
    for px in image.pixels_mut() {
        let binary = if gray_level(*px) >= threshold { 255 } else { 0 };
        *px = px.with_rgb(binary, binary, binary);
    }
}

fn binarize_global(
    image: &mut PixelBuffer,
    progress: &mut Progress<'_>,
    compute: impl FnOnce(&Histogram) -> u8,
) -> u8 {
    ensure_grayscale(image);
    progress.report(30);
    let threshold = compute(&Histogram::from_buffer(image));
    progress.report(70);
    apply_threshold(image, threshold);
    progress.report(100);
    threshold
}

/// Otsu binarization. Reports 30, 70, 100 and returns the applied threshold.
pub fn binarize_otsu(image: &mut PixelBuffer, progress: Option<ProgressSink<'_>>) -> u8 {
    let _span = trace_span!("binarize_otsu", width = image.width(), height = image.height()).entered();
    let threshold = binarize_global(image, &mut Progress::new(progress), otsu_threshold);
    trace_threshold!("otsu", threshold);
    threshold
}

/// Huang entropy binarization. Reports 30, 70, 100 and returns the applied
/// threshold.
pub fn binarize_huang(image: &mut PixelBuffer, progress: Option<ProgressSink<'_>>) -> u8 {
    let _span = trace_span!("binarize_huang", width = image.width(), height = image.height()).entered();
    let threshold = binarize_global(image, &mut Progress::new(progress), huang_threshold);
    trace_threshold!("huang", threshold);
    threshold
}

/// ISODATA binarization.
///
/// Reports 10 after grayscale conversion, 30 after the initial mean, every
/// fifth iteration `30 + 40 * iteration / 100`, 80 after convergence, then
/// 100.
pub fn binarize_isodata(
    image: &mut PixelBuffer,
    progress: Option<ProgressSink<'_>>,
) -> IsodataOutcome {
    let _span =
        trace_span!("binarize_isodata", width = image.width(), height = image.height()).entered();
    let mut progress = Progress::new(progress);
    ensure_grayscale(image);
    progress.report(10);
    let hist = Histogram::from_buffer(image);
    progress.report(30);
    let outcome = isodata::isodata_with_progress(&hist, &mut progress);
    progress.report(80);
    apply_threshold(image, outcome.threshold);
    progress.report(100);
    trace_threshold!("isodata", outcome.threshold, iterations = outcome.iterations);
    outcome
}

/// Niblack local binarization with `mean + k * stddev` per window.
///
/// Reports `100 * y / height` every tenth row, then 100.
pub fn binarize_niblack(
    image: &mut PixelBuffer,
    params: NiblackParams,
    progress: Option<ProgressSink<'_>>,
) {
    let _span = trace_span!(
        "binarize_niblack",
        width = image.width(),
        height = image.height(),
        window_size = params.window_size(),
        k = params.k()
    )
    .entered();
    let mut progress = Progress::new(progress);
    ensure_grayscale(image);
    niblack::apply_niblack(image, params, &mut progress);
    progress.report(100);
}

/// Runs `method` on `image`. Returns the global threshold, or `None` for
/// Niblack.
pub fn binarize(
    image: &mut PixelBuffer,
    method: Method,
    progress: Option<ProgressSink<'_>>,
) -> Option<u8> {
    match method {
        Method::Otsu => Some(binarize_otsu(image, progress)),
        Method::Huang => Some(binarize_huang(image, progress)),
        Method::Isodata => Some(binarize_isodata(image, progress).threshold),
        Method::Niblack(params) => {
            binarize_niblack(image, params, progress);
            None
        }
    }
}
