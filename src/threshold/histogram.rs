//! 256-bin gray-level histograms.

use crate::color::gray_level;
use crate::image::PixelBuffer;

/// Number of gray levels.
pub const BINS: usize = 256;

/// Count of gray-level occurrences over an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BINS],
    total: u64,
}

impl Histogram {
    /// Builds a histogram from the gray levels of `image`.
    ///
    /// Gray pixels contribute their shared channel value; color pixels
    /// contribute their BT.709 luma.
    pub fn from_buffer(image: &PixelBuffer) -> Self {
        let mut bins = [0u64; BINS];
        for px in image.pixels() {
            bins[gray_level(*px) as usize] += 1;
        }
        Self::from_counts(bins)
    }

    /// Wraps precomputed bin counts.
    pub fn from_counts(bins: [u64; BINS]) -> Self {
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Per-level counts.
    pub fn bins(&self) -> &[u64; BINS] {
        &self.bins
    }

    /// Number of samples.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True when no samples were counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Sum of `level * count` over all bins.
    pub fn weighted_sum(&self) -> u64 {
        self.bins
            .iter()
            .enumerate()
            .map(|(level, &count)| level as u64 * count)
            .sum()
    }

    /// Bin counts divided by the total; `None` for an empty histogram.
    pub fn probabilities(&self) -> Option<[f64; BINS]> {
        if self.total == 0 {
            return None;
        }
        let total = self.total as f64;
        let mut probs = [0.0f64; BINS];
        for (p, &count) in probs.iter_mut().zip(self.bins.iter()) {
            *p = count as f64 / total;
        }
        Some(probs)
    }
}
