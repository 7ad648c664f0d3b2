//! Summary statistics for a pixel buffer.

use crate::image::{Pixel, PixelBuffer};
use std::collections::HashSet;

/// Images at or above this pixel count skip the per-pixel statistics.
pub const INFO_PIXEL_LIMIT: usize = 1_000_000;

/// Bytes per stored pixel (RGBA8).
const BYTES_PER_PIXEL: usize = 4;

/// Descriptive summary of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    /// Size of the RGBA8 representation.
    pub size_bytes: usize,
    /// Number of distinct RGBA values; `None` for large images.
    pub unique_colors: Option<usize>,
    /// Integer mean of each channel; `None` for large or empty images.
    pub average_color: Option<Pixel>,
    /// Integer mean of `(r + g + b) / 3`; `None` for large or empty images.
    pub average_brightness: Option<u8>,
}

impl ImageInfo {
    /// Computes the summary for `buffer`.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let width = buffer.width();
        let height = buffer.height();
        let count = buffer.pixels().len();
        let mut info = Self {
            width,
            height,
            size_bytes: count * BYTES_PER_PIXEL,
            unique_colors: None,
            average_color: None,
            average_brightness: None,
        };
        if count >= INFO_PIXEL_LIMIT {
            return info;
        }

        let mut unique = HashSet::with_capacity(count.min(1 << 16));
        let (mut sum_r, mut sum_g, mut sum_b, mut sum_bright) = (0u64, 0u64, 0u64, 0u64);
        for px in buffer.pixels() {
            unique.insert(*px);
            sum_r += u64::from(px.r);
            sum_g += u64::from(px.g);
            sum_b += u64::from(px.b);
            sum_bright += (u64::from(px.r) + u64::from(px.g) + u64::from(px.b)) / 3;
        }
        info.unique_colors = Some(unique.len());

        if count > 0 {
            let n = count as u64;
            info.average_color = Some(Pixel::rgb(
                (sum_r / n) as u8,
                (sum_g / n) as u8,
                (sum_b / n) as u8,
            ));
            info.average_brightness = Some((sum_bright / n) as u8);
        }
        info
    }
}
