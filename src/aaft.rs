//! Amplitude adjusted Fourier transform (AAFT) surrogates.
//!
//! Three passes:
//! 1. Gaussianize: reorder a white-noise draw to follow the rank order of the
//!    input, giving a Gaussian series with the input's rank structure.
//! 2. Randomize the phases of that Gaussian series.
//! 3. Rescale: reorder the input's own values to follow the rank order of the
//!    phase-randomized series.
//!
//! The result has exactly the input's amplitude distribution and roughly its
//! power spectrum. The remaining spectral error is what IAAFT refines away.

use crate::errors::{validate_series, SurrogateResult};
use crate::fft_ops::{RustFftTransform, SpectralTransform};
use crate::fourier::random_phases_with_transform;
use crate::rank_order::{impose_distribution, RankOrderMapper};
use rand::Rng;
use rand_distr::StandardNormal;

/// Generate an AAFT surrogate of `series`.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::{aaft, SecureRng};
///
/// let series = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0];
/// let mut surrogate = aaft(&series, &mut SecureRng::with_seed(42)).unwrap();
/// surrogate.sort_by(|a, b| a.total_cmp(b));
/// assert_eq!(surrogate, vec![1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0]);
/// ```
pub fn aaft<R: Rng + ?Sized>(series: &[f64], rng: &mut R) -> SurrogateResult<Vec<f64>> {
    aaft_with_transform(&RustFftTransform, series, rng)
}

/// [`aaft`] using a caller-supplied spectral transform.
pub fn aaft_with_transform<T, R>(
    transform: &T,
    series: &[f64],
    rng: &mut R,
) -> SurrogateResult<Vec<f64>>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    validate_series(series, "aaft")?;
    aaft_unchecked(transform, series, &RankOrderMapper::new(series), rng)
}

/// AAFT on an already validated series with a pre-built mapper for its values.
pub(crate) fn aaft_unchecked<T, R>(
    transform: &T,
    series: &[f64],
    mapper: &RankOrderMapper,
    rng: &mut R,
) -> SurrogateResult<Vec<f64>>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    let noise: Vec<f64> = (0..series.len()).map(|_| rng.sample(StandardNormal)).collect();
    let gaussianized = impose_distribution(series, &noise)?;
    let phase_randomized = random_phases_with_transform(transform, &gaussianized, rng)?;
    mapper.apply(&phase_randomized)
}
