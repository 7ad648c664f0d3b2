//! Normalized Gaussian kernels.

use crate::kernel::Kernel;
use crate::util::math::force_odd;
use crate::util::{ImKernelError, ImKernelResult};

fn check_sigma(sigma: f64) -> ImKernelResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ImKernelError::InvalidParameter {
            name: "sigma",
            reason: "must be finite and positive",
        });
    }
    Ok(())
}

/// Builds a `1 x size` Gaussian kernel normalized to sum 1.
///
/// Even sizes are bumped to the next odd size.
pub fn gaussian_1d(size: usize, sigma: f64) -> ImKernelResult<Kernel> {
    check_sigma(sigma)?;
    let size = force_odd(size);
    let center = (size / 2) as f64;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);

    Ok(Kernel::from_parts_unchecked(weights, size, 1))
}

/// Builds a `size x size` Gaussian kernel normalized to sum 1.
///
/// Even sizes are bumped to the next odd size.
pub fn gaussian_2d(size: usize, sigma: f64) -> ImKernelResult<Kernel> {
    check_sigma(sigma)?;
    let size = force_odd(size);
    let center = (size / 2) as f64;
    let denom = 2.0 * sigma * sigma;

    let mut weights = Vec::with_capacity(size * size);
    for i in 0..size {
        let y = i as f64 - center;
        for j in 0..size {
            let x = j as f64 - center;
            weights.push((-(x * x + y * y) / denom).exp());
        }
    }
    let sum: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);

    Ok(Kernel::from_parts_unchecked(weights, size, size))
}
