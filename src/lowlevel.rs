//! Building blocks below the in-place binarization API.
//!
//! These expose histogram statistics, split searches, and per-pixel threshold
//! maps for callers that want the numbers without rewriting an image.

pub use crate::color::gray_level;
pub use crate::kernel::{SHARPEN_3X3, SOBEL_X_3X3};
pub use crate::threshold::histogram::BINS;
pub use crate::threshold::huang::HUANG_EPSILON;
pub use crate::threshold::{
    apply_threshold, huang_split, huang_threshold, isodata_threshold, niblack_threshold_map,
    otsu_split, otsu_threshold, Histogram, Progress, ISODATA_MAX_ITERATIONS,
};

#[cfg(feature = "rayon")]
pub use crate::filter::rayon::{filter2d_par, gaussian_blur_par};
