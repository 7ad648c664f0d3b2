//! Otsu's between-class variance threshold.

use crate::threshold::histogram::{Histogram, BINS};

/// Returns the split level `t` (background = levels `0..=t`) that maximizes
/// `w_b * w_f * (mu_b - mu_f)^2`.
///
/// Ties keep the lowest `t`. Splits with an empty class are skipped, so a
/// histogram with fewer than two occupied levels yields `None`.
pub fn otsu_split(hist: &Histogram) -> Option<u8> {
    let bins = hist.bins();
    let total = hist.total() as f64;
    let sum = hist.weighted_sum() as f64;

    let mut sum_b = 0.0f64;
    let mut w_b = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut best = None;

    for t in 0..BINS {
        let count = bins[t] as f64;
        w_b += count;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }
        sum_b += t as f64 * count;

        let mean_b = sum_b / w_b;
        let mean_f = (sum - sum_b) / w_f;
        let diff = mean_b - mean_f;
        let variance = w_b * w_f * diff * diff;

        if variance > max_variance {
            max_variance = variance;
            best = Some(t as u8);
        }
    }
    best
}

/// Otsu threshold `T` for the `gray >= T` rule: one past the best split level,
/// or 0 when no split separates the histogram.
pub fn otsu_threshold(hist: &Histogram) -> u8 {
    super::threshold_from_split(otsu_split(hist))
}

#[cfg(test)]
mod tests {
    use super::{otsu_split, otsu_threshold};
    use crate::threshold::histogram::{Histogram, BINS};

    fn hist_of(levels: &[(usize, u64)]) -> Histogram {
        let mut bins = [0u64; BINS];
        for &(level, count) in levels {
            bins[level] = count;
        }
        Histogram::from_counts(bins)
    }

    #[test]
    fn two_levels_split_at_lower_level() {
        let hist = hist_of(&[(20, 300), (220, 100)]);
        assert_eq!(otsu_split(&hist), Some(20));
        assert_eq!(otsu_threshold(&hist), 21);
    }

    #[test]
    fn single_level_has_no_split() {
        let hist = hist_of(&[(77, 10)]);
        assert_eq!(otsu_split(&hist), None);
        assert_eq!(otsu_threshold(&hist), 0);
        assert_eq!(otsu_threshold(&hist_of(&[])), 0);
    }

    #[test]
    fn three_clusters_pick_the_wider_gap() {
        let hist = hist_of(&[(10, 50), (30, 50), (200, 100)]);
        let split = otsu_split(&hist).unwrap();
        assert!((30..200).contains(&split));
    }
}
