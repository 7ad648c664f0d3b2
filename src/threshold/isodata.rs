//! Iterative intermeans (ISODATA) threshold.

use crate::threshold::histogram::Histogram;
use crate::threshold::progress::Progress;

/// Upper bound on refinement iterations.
pub const ISODATA_MAX_ITERATIONS: u32 = 100;

/// Final threshold and the number of refinement iterations run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IsodataOutcome {
    pub threshold: u8,
    pub iterations: u32,
}

/// Runs ISODATA on `hist` without progress reporting.
///
/// Starts from the floor of the global mean, then repeatedly sets
/// `T = round((mean_b + mean_f) / 2)` with background `< T` and foreground
/// `>= T` (empty background mean 0, empty foreground mean 255). Stops once
/// `|ΔT| <= 1` or after [`ISODATA_MAX_ITERATIONS`].
pub fn isodata_threshold(hist: &Histogram) -> IsodataOutcome {
    isodata_with_progress(hist, &mut Progress::none())
}

pub(crate) fn isodata_with_progress(hist: &Histogram, progress: &mut Progress<'_>) -> IsodataOutcome {
    if hist.is_empty() {
        return IsodataOutcome {
            threshold: 0,
            iterations: 0,
        };
    }
    let bins = hist.bins();
    let mut threshold = (hist.weighted_sum() / hist.total()) as i64;
    let mut iterations = 0u32;

    loop {
        let previous = threshold;

        let (mut sum_b, mut count_b, mut sum_f, mut count_f) = (0u64, 0u64, 0u64, 0u64);
        for (level, &count) in bins.iter().enumerate() {
            if (level as i64) < threshold {
                sum_b += level as u64 * count;
                count_b += count;
            } else {
                sum_f += level as u64 * count;
                count_f += count;
            }
        }
        let mean_b = if count_b > 0 {
            sum_b as f64 / count_b as f64
        } else {
            0.0
        };
        let mean_f = if count_f > 0 {
            sum_f as f64 / count_f as f64
        } else {
            255.0
        };
        threshold = ((mean_b + mean_f) / 2.0).round() as i64;
        iterations += 1;

        if iterations % 5 == 0 {
            progress.report(30 + 40 * iterations / ISODATA_MAX_ITERATIONS);
        }
        if (threshold - previous).abs() <= 1 || iterations >= ISODATA_MAX_ITERATIONS {
            break;
        }
    }

    IsodataOutcome {
        threshold: threshold.clamp(0, 255) as u8,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::{isodata_threshold, IsodataOutcome};
    use crate::threshold::histogram::{Histogram, BINS};

    fn uniform(level: usize, count: u64) -> Histogram {
        let mut bins = [0u64; BINS];
        bins[level] = count;
        Histogram::from_counts(bins)
    }

    #[test]
    fn uniform_image_converges_quickly_below_level() {
        for level in [0usize, 1, 2, 3, 100, 255] {
            let outcome = isodata_threshold(&uniform(level, 64));
            assert!(outcome.iterations <= 2, "level {level}: {outcome:?}");
            assert!(usize::from(outcome.threshold) <= level);
        }
        assert_eq!(
            isodata_threshold(&uniform(200, 9)),
            IsodataOutcome {
                threshold: 100,
                iterations: 2
            }
        );
    }

    #[test]
    fn bimodal_threshold_lands_between_modes() {
        let mut bins = [0u64; BINS];
        bins[40] = 500;
        bins[180] = 300;
        let outcome = isodata_threshold(&Histogram::from_counts(bins));
        assert!(outcome.threshold > 40 && outcome.threshold <= 180);
        assert_eq!(outcome.threshold, 110);
    }

    #[test]
    fn empty_histogram_yields_zero() {
        let outcome = isodata_threshold(&Histogram::from_counts([0; BINS]));
        assert_eq!(outcome.threshold, 0);
        assert_eq!(outcome.iterations, 0);
    }
}
