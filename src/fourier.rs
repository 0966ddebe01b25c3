//! Fourier surrogates: random phases and random amplitudes.
//!
//! Both methods transform the series, perturb one half of the polar
//! representation of every non-DC coefficient and transform back. Edits are
//! made on the one-sided spectrum, so the inverse is always real.
//!
//! - **Random phases** keep every magnitude and draw each phase uniformly in
//!   `[0, 2π)`. The DC term and, for even lengths, the Nyquist term keep their
//!   original (real) values. The result shares the periodogram and linear
//!   autocorrelation of the input.
//! - **Random amplitudes** keep every phase and the DC term, and draw new
//!   magnitudes according to an [`AmplitudeDistribution`].
//!
//! A constant series has no non-DC power and is returned unchanged. Other
//! series are rescaled by a power of two around the transforms, so inputs near
//! the `f64` limits do not overflow; an output that cannot be represented is
//! reported as a `NumericalOverflow` error.

use crate::config::AmplitudeDistribution;
use crate::errors::{validate_series, SurrogateResult};
use crate::fft_ops::{
    normalize_range, restore_range, RustFftTransform, SpectralTransform, Spectrum,
};
use crate::math_utils::{constants::TWO_PI, is_constant};
use crate::shuffle::fisher_yates;
use num_complex::Complex64;
use rand::Rng;

/// Generate a random phases surrogate of `series`.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::{random_phases, SecureRng};
///
/// let series: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin()).collect();
/// let surrogate = random_phases(&series, &mut SecureRng::with_seed(1)).unwrap();
/// assert_eq!(surrogate.len(), 64);
/// ```
pub fn random_phases<R: Rng + ?Sized>(series: &[f64], rng: &mut R) -> SurrogateResult<Vec<f64>> {
    random_phases_with_transform(&RustFftTransform, series, rng)
}

/// [`random_phases`] using a caller-supplied spectral transform.
pub fn random_phases_with_transform<T, R>(
    transform: &T,
    series: &[f64],
    rng: &mut R,
) -> SurrogateResult<Vec<f64>>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    validate_series(series, "random phases")?;
    if is_constant(series) {
        return Ok(series.to_vec());
    }

    let (scaled, scale) = normalize_range(series);
    let spectrum = transform.forward(&scaled)?;
    let randomized = randomize_phases(&spectrum, rng)?;
    restore_range(transform.inverse(&randomized)?, scale, "random phases")
}

/// Replace every non-DC, non-Nyquist phase with a uniform draw.
pub(crate) fn randomize_phases<R: Rng + ?Sized>(
    spectrum: &Spectrum,
    rng: &mut R,
) -> SurrogateResult<Spectrum> {
    let nyquist = spectrum.nyquist_index();
    let coefficients: Vec<Complex64> = spectrum
        .coefficients()
        .iter()
        .enumerate()
        .map(|(k, &c)| {
            if k == 0 || Some(k) == nyquist {
                c
            } else {
                Complex64::from_polar(c.norm(), rng.gen_range(0.0..TWO_PI))
            }
        })
        .collect();
    Spectrum::new(coefficients, spectrum.series_len())
}

/// Generate a random amplitudes surrogate of `series`.
///
/// Magnitudes are drawn with [`AmplitudeDistribution::Uniform`]; see
/// [`random_amplitudes_with`] to pick the distribution.
pub fn random_amplitudes<R: Rng + ?Sized>(
    series: &[f64],
    rng: &mut R,
) -> SurrogateResult<Vec<f64>> {
    random_amplitudes_with(series, AmplitudeDistribution::Uniform, rng)
}

/// Generate a random amplitudes surrogate with an explicit magnitude
/// distribution.
pub fn random_amplitudes_with<R: Rng + ?Sized>(
    series: &[f64],
    distribution: AmplitudeDistribution,
    rng: &mut R,
) -> SurrogateResult<Vec<f64>> {
    random_amplitudes_with_transform(&RustFftTransform, series, distribution, rng)
}

/// [`random_amplitudes_with`] using a caller-supplied spectral transform.
pub fn random_amplitudes_with_transform<T, R>(
    transform: &T,
    series: &[f64],
    distribution: AmplitudeDistribution,
    rng: &mut R,
) -> SurrogateResult<Vec<f64>>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    validate_series(series, "random amplitudes")?;
    if is_constant(series) {
        return Ok(series.to_vec());
    }

    let (scaled, scale) = normalize_range(series);
    let spectrum = transform.forward(&scaled)?;
    let mut magnitudes = spectrum.magnitudes();
    let phases = spectrum.phases();

    let drawn = &mut magnitudes[1..];
    match distribution {
        AmplitudeDistribution::Uniform => {
            let (low, high) = drawn
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &m| (lo.min(m), hi.max(m)));
            for magnitude in drawn.iter_mut() {
                *magnitude = rng.gen_range(low..=high);
            }
        }
        AmplitudeDistribution::Resampled => fisher_yates(drawn, rng),
    }

    // DC keeps its exact coefficient so the mean is untouched.
    let mut coefficients: Vec<Complex64> = magnitudes
        .iter()
        .zip(&phases)
        .map(|(&r, &theta)| Complex64::from_polar(r, theta))
        .collect();
    coefficients[0] = spectrum.coefficients()[0];

    let adjusted = transform.inverse(&Spectrum::new(coefficients, spectrum.series_len())?)?;
    restore_range(adjusted, scale, "random amplitudes")
}
