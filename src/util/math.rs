//! Numeric helpers shared by the filters and thresholds.

/// Rounds to the nearest integer (half away from zero) and clamps to `[0, 255]`.
#[inline]
pub(crate) fn round_clamp_u8(value: f64) -> u8 {
    let rounded = value.round();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= 255.0 {
        255
    } else {
        rounded as u8
    }
}

/// Clamps a signed coordinate to `[0, len - 1]`.
///
/// `len` must be non-zero.
#[inline]
pub(crate) fn clamp_index(coord: isize, len: usize) -> usize {
    if coord <= 0 {
        0
    } else {
        (coord as usize).min(len - 1)
    }
}

/// Forces a requested kernel size to the next odd value.
#[inline]
pub(crate) fn force_odd(size: usize) -> usize {
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}
