//! RGB raster buffers.
//!
//! `PixelBuffer` is an owned, row-major grid of `Pixel` values. Every
//! neighborhood read in the crate goes through [`PixelBuffer::sample`], which
//! clamps coordinates to the image bounds (replicate border). A 0×0 buffer is
//! a valid "null image"; operations treat it as a no-op.

use crate::util::{ImKernelError, ImKernelResult};

pub mod info;
#[cfg(feature = "image-io")]
pub mod io;

/// A single RGBA pixel. Alpha is carried but never processed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Opaque pixel from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pixel from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray pixel with all channels set to `value`.
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Returns true when `r == g == b`.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Same alpha, new color channels.
    #[inline]
    pub(crate) fn with_rgb(self, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: self.a }
    }
}

/// Owned row-major RGBA raster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Creates a `width x height` buffer filled with opaque black.
    pub fn new(width: usize, height: usize) -> ImKernelResult<Self> {
        Self::filled(width, height, Pixel::rgb(0, 0, 0))
    }

    /// Creates a `width x height` buffer filled with `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> ImKernelResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            data: vec![pixel; len],
            width,
            height,
        })
    }

    /// Wraps an existing pixel vector. The length must be exactly `width * height`.
    pub fn from_pixels(data: Vec<Pixel>, width: usize, height: usize) -> ImKernelResult<Self> {
        let needed = pixel_count(width, height)?;
        if data.len() < needed {
            return Err(ImKernelError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ImKernelError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a buffer from interleaved RGB bytes (alpha set to 255).
    pub fn from_rgb8(bytes: &[u8], width: usize, height: usize) -> ImKernelResult<Self> {
        Self::from_interleaved(bytes, width, height, 3)
    }

    /// Builds a buffer from interleaved RGBA bytes.
    pub fn from_rgba8(bytes: &[u8], width: usize, height: usize) -> ImKernelResult<Self> {
        Self::from_interleaved(bytes, width, height, 4)
    }

    fn from_interleaved(
        bytes: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> ImKernelResult<Self> {
        let count = pixel_count(width, height)?;
        let needed = count
            .checked_mul(channels)
            .ok_or(ImKernelError::InvalidDimensions { width, height })?;
        if bytes.len() < needed {
            return Err(ImKernelError::BufferTooSmall {
                needed,
                got: bytes.len(),
            });
        }
        if bytes.len() > needed {
            return Err(ImKernelError::InvalidDimensions { width, height });
        }
        let data = bytes
            .chunks_exact(channels)
            .map(|px| {
                let a = if channels == 4 { px[3] } else { 255 };
                Pixel::rgba(px[0], px[1], px[2], a)
            })
            .collect();
        Self::from_pixels(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True for the 0-area "null image".
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns all pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns row `y` as a slice of length `width`.
    pub fn row(&self, y: usize) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns the pixel at `(x, y)` with both coordinates clamped to the
    /// image bounds.
    ///
    /// # Panics
    ///
    /// Panics on an empty buffer.
    #[inline]
    pub fn sample(&self, x: isize, y: isize) -> Pixel {
        let cx = crate::util::math::clamp_index(x, self.width);
        let cy = crate::util::math::clamp_index(y, self.height);
        self.data[cy * self.width + cx]
    }

    /// Overwrites the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside the image; writes are not clamped.
    #[inline]
    pub fn write(&mut self, x: usize, y: usize, pixel: Pixel) {
        assert!(
            x < self.width && y < self.height,
            "write at ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        self.data[y * self.width + x] = pixel;
    }

    /// Copies the pixels out as interleaved RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, px.a])
            .collect()
    }
}

fn pixel_count(width: usize, height: usize) -> ImKernelResult<usize> {
    if (width == 0) != (height == 0) {
        return Err(ImKernelError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImKernelError::InvalidDimensions { width, height })
}
