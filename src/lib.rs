//! imkernel is a CPU image-processing kernel library for RGB rasters.
//!
//! It provides 2D correlation with arbitrary kernels, a separable Gaussian
//! blur, luma-based grayscale reduction, and four binarization algorithms
//! (Otsu, Huang, Niblack, ISODATA). Operations mutate a [`PixelBuffer`] in
//! place and treat an empty buffer as a no-op. Row-parallel filters are
//! available with the `rayon` feature, and `simd` vectorizes the per-pixel
//! channel accumulation.

pub mod color;
pub mod filter;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod threshold;
mod trace;
pub mod util;

pub use color::{ensure_grayscale, is_grayscale, to_grayscale, LumaWeights};
pub use filter::{filter2d, filter2d_raw, gaussian_blur};
pub use crate::image::info::ImageInfo;
pub use crate::image::{Pixel, PixelBuffer};
pub use kernel::{gaussian_1d, gaussian_2d, Kernel};
pub use threshold::{
    binarize, binarize_huang, binarize_isodata, binarize_niblack, binarize_otsu, IsodataOutcome,
    Method, NiblackParams, ProgressSink,
};
pub use util::{ImKernelError, ImKernelResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
