//! Entropy-based threshold (sum of class entropies).

use crate::threshold::histogram::{Histogram, BINS};

/// Smoothing term for class renormalization and the logarithm.
pub const HUANG_EPSILON: f64 = 1e-10;

/// Entropy of one class, renormalizing each bin by the mass accumulated so
/// far within the class (including that bin), plus [`HUANG_EPSILON`].
///
/// The running mass makes early bins weigh close to 1, so the result is not
/// the Shannon entropy of the renormalized class distribution.
fn class_entropy(probs: &[f64]) -> f64 {
    let mut mass = 0.0f64;
    let mut entropy = 0.0f64;
    for &p in probs {
        mass += p;
        if p > 0.0 {
            let q = p / (mass + HUANG_EPSILON);
            entropy -= q * (q + HUANG_EPSILON).ln();
        }
    }
    entropy
}

/// Returns the split level `t` (background = levels `0..=t`) maximizing the
/// sum of background and foreground entropies.
///
/// Each bin is renormalized by the running class mass up to and including it,
/// plus [`HUANG_EPSILON`]. Ties keep the lowest `t`. Returns `None` for an
/// empty histogram.
pub fn huang_split(hist: &Histogram) -> Option<u8> {
    let probs = hist.probabilities()?;

    let mut max_entropy = -1.0f64;
    let mut best = None;
    for t in 0..BINS {
        let entropy = class_entropy(&probs[..=t]) + class_entropy(&probs[t + 1..]);
        if entropy > max_entropy {
            max_entropy = entropy;
            best = Some(t as u8);
        }
    }
    best
}

/// Huang threshold `T` for the `gray >= T` rule: one past the best split
/// level (saturating at 255), or 0 for an empty histogram.
pub fn huang_threshold(hist: &Histogram) -> u8 {
    super::threshold_from_split(huang_split(hist))
}

#[cfg(test)]
mod tests {
    use super::{class_entropy, huang_split, huang_threshold};
    use crate::threshold::histogram::{Histogram, BINS};

    #[test]
    fn two_levels_prefer_mixed_foreground() {
        let mut bins = [0u64; BINS];
        bins[20] = 10;
        bins[220] = 10;
        let hist = Histogram::from_counts(bins);
        // A class's first occupied bin contributes ~0, so keeping both levels
        // in one class (0.5 ln 2) beats two single-level classes (~0).
        assert_eq!(huang_split(&hist), Some(0));
        assert_eq!(huang_threshold(&hist), 1);
    }

    #[test]
    fn class_entropy_uses_running_mass() {
        // q = 1, 1/2, 1/3, 1/4
        let expected = 0.5 * 2f64.ln() + (3f64.ln()) / 3.0 + 0.25 * 4f64.ln();
        let entropy = class_entropy(&[0.0, 0.25, 0.0, 0.25, 0.25, 0.25]);
        assert!((entropy - expected).abs() < 1e-8, "{entropy} vs {expected}");
        assert_eq!(class_entropy(&[]), 0.0);
    }

    #[test]
    fn equal_levels_stay_in_one_class() {
        let mut bins = [0u64; BINS];
        for level in [50, 100, 150, 200] {
            bins[level] = 1;
        }
        // Two classes of two levels score 2 * 0.5 ln 2; one class of four
        // scores about 1.059.
        let hist = Histogram::from_counts(bins);
        assert_eq!(huang_split(&hist), Some(0));
        assert_eq!(huang_threshold(&hist), 1);
    }

    #[test]
    fn spread_histogram_splits_inside_range() {
        let mut bins = [0u64; BINS];
        for (level, bin) in bins.iter_mut().enumerate().skip(40).take(60) {
            *bin = 5 + (level % 3) as u64;
        }
        for bin in bins.iter_mut().skip(150).take(60) {
            *bin = 4;
        }
        let split = huang_split(&Histogram::from_counts(bins)).unwrap();
        assert!((40..210).contains(&split), "split {split}");
    }

    #[test]
    fn empty_histogram_has_no_split() {
        let hist = Histogram::from_counts([0; BINS]);
        assert_eq!(huang_split(&hist), None);
        assert_eq!(huang_threshold(&hist), 0);
    }
}
