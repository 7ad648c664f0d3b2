//! Scalar reference accumulator for per-channel weighted sums.

use crate::filter::RgbAccumulate;

/// Three independent `f64` channel sums.
#[cfg_attr(all(feature = "simd", not(test)), allow(dead_code))]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct ScalarAccum([f64; 3]);

impl RgbAccumulate for ScalarAccum {
    #[inline]
    fn zero() -> Self {
        Self([0.0; 3])
    }

    #[inline]
    fn add(&mut self, rgb: [f64; 3], weight: f64) {
        self.0[0] += rgb[0] * weight;
        self.0[1] += rgb[1] * weight;
        self.0[2] += rgb[2] * weight;
    }

    #[inline]
    fn finish(self) -> [f64; 3] {
        self.0
    }
}
