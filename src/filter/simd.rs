//! SIMD accumulator using the `wide` crate.
//!
//! One `f64x4` holds the R, G, and B sums in lanes 0..3; lane 3 stays zero.
//! Each lane sees the same multiply-then-add sequence as the scalar path, so
//! results are bit-identical.

use crate::filter::RgbAccumulate;
use wide::f64x4;

#[derive(Copy, Clone, Debug)]
pub(crate) struct SimdAccum(f64x4);

impl RgbAccumulate for SimdAccum {
    #[inline]
    fn zero() -> Self {
        Self(f64x4::ZERO)
    }

    #[inline]
    fn add(&mut self, rgb: [f64; 3], weight: f64) {
        let px = f64x4::from([rgb[0], rgb[1], rgb[2], 0.0]);
        self.0 += px * f64x4::splat(weight);
    }

    #[inline]
    fn finish(self) -> [f64; 3] {
        let lanes = self.0.to_array();
        [lanes[0], lanes[1], lanes[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::SimdAccum;
    use crate::filter::scalar::ScalarAccum;
    use crate::filter::RgbAccumulate;

    #[test]
    fn simd_matches_scalar_bitwise() {
        let mut scalar = ScalarAccum::zero();
        let mut simd = SimdAccum::zero();
        for i in 0..49 {
            let rgb = [
                (i * 37 % 256) as f64,
                (i * 11 % 256) as f64,
                (i * 5 % 256) as f64,
            ];
            let weight = ((i as f64) * 0.37).sin() * 1.3;
            scalar.add(rgb, weight);
            simd.add(rgb, weight);
        }
        let a = scalar.finish();
        let b = simd.finish();
        for c in 0..3 {
            assert_eq!(a[c].to_bits(), b[c].to_bits());
        }
    }
}
