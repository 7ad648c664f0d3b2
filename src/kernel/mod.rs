//! Convolution kernels.
//!
//! A [`Kernel`] is an immutable, row-major grid of `f64` weights. Its anchor
//! is `(width / 2, height / 2)`, so odd dimensions give a unique symmetric
//! center. Gaussian constructors always produce odd sizes and normalized
//! weights; the fixed sharpen and Sobel kernels are not normalized.

use crate::util::{ImKernelError, ImKernelResult};

mod gaussian;

pub use gaussian::{gaussian_1d, gaussian_2d};

/// Mild sharpening kernel. Weights sum to 1.5, so output brightens slightly.
pub const SHARPEN_3X3: [f64; 9] = [0.0, -1.5, 0.0, -1.5, 7.5, -1.5, 0.0, -1.5, 0.0];

/// Horizontal gradient (Sobel-style) kernel. Weights sum to 0.
pub const SOBEL_X_3X3: [f64; 9] = [-2.0, 0.0, 2.0, -4.0, 0.0, 4.0, -2.0, 0.0, 2.0];

/// Immutable 2D kernel of real-valued weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    pub fn new(weights: Vec<f64>, width: usize, height: usize) -> ImKernelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ImKernelError::InvalidKernel {
                reason: "kernel dimensions must be non-zero",
            });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(ImKernelError::InvalidKernel {
                reason: "kernel dimensions overflow",
            })?;
        if weights.len() != needed {
            return Err(ImKernelError::InvalidKernel {
                reason: "weight count does not match kernel dimensions",
            });
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ImKernelError::InvalidKernel {
                reason: "kernel weights must be finite",
            });
        }
        Ok(Self {
            weights,
            width,
            height,
        })
    }

    /// Creates a 3×3 kernel, e.g. from user-edited matrix entries.
    pub fn from_3x3(weights: [f64; 9]) -> ImKernelResult<Self> {
        Self::new(weights.to_vec(), 3, 3)
    }

    /// 1×1 kernel with weight 1.
    pub fn identity() -> Self {
        Self {
            weights: vec![1.0],
            width: 1,
            height: 1,
        }
    }

    /// The fixed sharpening kernel.
    pub fn sharpen_3x3() -> Self {
        Self {
            weights: SHARPEN_3X3.to_vec(),
            width: 3,
            height: 3,
        }
    }

    /// The fixed horizontal-gradient kernel.
    pub fn sobel_x_3x3() -> Self {
        Self {
            weights: SOBEL_X_3X3.to_vec(),
            width: 3,
            height: 3,
        }
    }

    pub(crate) fn from_parts_unchecked(weights: Vec<f64>, width: usize, height: usize) -> Self {
        debug_assert_eq!(weights.len(), width * height);
        Self {
            weights,
            width,
            height,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Anchor as `(cx, cy)`.
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Row-major weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at column `x`, row `y`.
    pub fn weight(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.weights.get(y * self.width + x).copied()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}
