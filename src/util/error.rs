//! Error types for imkernel.

use thiserror::Error;

/// Result alias for imkernel operations.
pub type ImKernelResult<T> = std::result::Result<T, ImKernelError>;

/// Errors that can occur when constructing buffers, kernels, or parameters.
///
/// Image operations themselves never fail on empty input: a 0×0 buffer is
/// left unchanged. These variants cover malformed constructors and
/// out-of-domain numeric parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImKernelError {
    /// Width/height combination cannot describe a buffer.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Backing buffer length does not match the requested dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Kernel weights do not describe a `width x height` kernel.
    #[error("invalid kernel: {reason}")]
    InvalidKernel { reason: &'static str },
    /// A numeric parameter is outside its domain.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
