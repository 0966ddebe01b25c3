//! Spectral transform for real-valued series.
//!
//! A length-`n` real series maps to `n/2 + 1` complex coefficients (the
//! non-negative frequencies; the rest follow from Hermitian symmetry). The
//! inverse rebuilds the full symmetric spectrum, so any edit made on the
//! one-sided coefficients always inverts to a real sequence.
//!
//! [`RustFftTransform`] is the default implementation. FFT plans are cached
//! process-wide in an LRU map; plans are immutable, so the cache never
//! changes what a transform returns.

use crate::errors::{validate_parameter, SurrogateError, SurrogateResult};
use lru::LruCache;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::num::NonZeroUsize;
use std::sync::{Arc, LazyLock, Mutex};

/// Maximum number of cached plans
const MAX_CACHE_ENTRIES: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => panic!("cache capacity must be non-zero"),
};
/// Maximum FFT size (2^26 points)
const MAX_FFT_SIZE: usize = 1 << 26;

/// Cache key distinguishing forward and inverse plans
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
struct FftCacheKey {
    size: usize,
    is_forward: bool,
}

type FftPlanCache = LruCache<FftCacheKey, Arc<dyn Fft<f64>>>;

static FFT_CACHE: LazyLock<Mutex<FftPlanCache>> =
    LazyLock::new(|| Mutex::new(LruCache::new(MAX_CACHE_ENTRIES)));

/// Get a cached FFT plan, planning it on a miss.
fn get_cached_fft_plan(size: usize, is_forward: bool) -> SurrogateResult<Arc<dyn Fft<f64>>> {
    if size == 0 || size > MAX_FFT_SIZE {
        return Err(SurrogateError::FftError { size });
    }

    let cache_key = FftCacheKey { size, is_forward };

    // A poisoned cache still holds valid plans.
    let mut cache = match FFT_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(cached_fft) = cache.get(&cache_key) {
        return Ok(Arc::clone(cached_fft));
    }

    log::debug!(
        "planning {} FFT of size {}",
        if is_forward { "forward" } else { "inverse" },
        size
    );
    let mut planner = FftPlanner::new();
    let new_fft = if is_forward {
        planner.plan_fft_forward(size)
    } else {
        planner.plan_fft_inverse(size)
    };

    cache.put(cache_key, Arc::clone(&new_fft));
    Ok(new_fft)
}

/// Drop every cached FFT plan.
pub fn clear_fft_cache() {
    match FFT_CACHE.lock() {
        Ok(mut cache) => cache.clear(),
        Err(poisoned) => poisoned.into_inner().clear(),
    }
}

/// Number of FFT plans currently cached.
pub fn fft_cache_len() -> usize {
    match FFT_CACHE.lock() {
        Ok(cache) => cache.len(),
        Err(poisoned) => poisoned.into_inner().len(),
    }
}

/// One-sided spectral representation of a real series.
///
/// Holds the coefficients for frequencies `0..=n/2` of a length-`n` series.
/// Index 0 is the DC term; for even `n` the last index is the Nyquist term.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    coefficients: Vec<Complex64>,
    series_len: usize,
}

impl Spectrum {
    /// Number of one-sided coefficients for a series of length `n`.
    pub fn coefficient_count(n: usize) -> usize {
        n / 2 + 1
    }

    /// Wrap one-sided coefficients for a series of length `series_len`.
    ///
    /// The DC and Nyquist terms of a real series are real; inverse transforms
    /// use only their real parts.
    pub fn new(coefficients: Vec<Complex64>, series_len: usize) -> SurrogateResult<Self> {
        if series_len == 0 {
            return Err(SurrogateError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let expected = Self::coefficient_count(series_len);
        if coefficients.len() != expected {
            return Err(SurrogateError::LengthMismatch {
                expected,
                actual: coefficients.len(),
                operation: "spectrum construction".to_string(),
            });
        }
        Ok(Self {
            coefficients,
            series_len,
        })
    }

    /// Build a spectrum from per-frequency magnitudes and phases.
    pub fn from_polar(
        series_len: usize,
        magnitudes: &[f64],
        phases: &[f64],
    ) -> SurrogateResult<Self> {
        if magnitudes.len() != phases.len() {
            return Err(SurrogateError::LengthMismatch {
                expected: magnitudes.len(),
                actual: phases.len(),
                operation: "spectrum from polar".to_string(),
            });
        }
        let coefficients = magnitudes
            .iter()
            .zip(phases)
            .map(|(&r, &theta)| Complex64::from_polar(r, theta))
            .collect();
        Self::new(coefficients, series_len)
    }

    /// Length of the series this spectrum describes.
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// One-sided complex coefficients.
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Index of the Nyquist coefficient, present only for even lengths.
    pub fn nyquist_index(&self) -> Option<usize> {
        (self.series_len % 2 == 0).then_some(self.series_len / 2)
    }

    /// Per-frequency magnitudes `|X_k|`.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Per-frequency phases in `(-π, π]`.
    pub fn phases(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.arg()).collect()
    }

    /// Periodogram `|X_k|² / n` over the one-sided frequencies.
    pub fn periodogram(&self) -> Vec<f64> {
        let n = self.series_len as f64;
        self.coefficients.iter().map(|c| c.norm_sqr() / n).collect()
    }

    /// Signal energy `Σ x_t²` recovered through Parseval's relation.
    pub fn energy(&self) -> f64 {
        let n = self.series_len;
        let nyquist = self.nyquist_index();
        let total: f64 = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(k, c)| {
                // Interior frequencies stand in for their mirrored partner too.
                if k == 0 || Some(k) == nyquist {
                    c.norm_sqr()
                } else {
                    2.0 * c.norm_sqr()
                }
            })
            .sum();
        total / n as f64
    }

    /// Same phases, new magnitudes.
    pub fn with_magnitudes(&self, magnitudes: &[f64]) -> SurrogateResult<Self> {
        Self::from_polar(self.series_len, magnitudes, &self.phases())
    }
}

/// Forward/inverse discrete Fourier transform over real sequences.
///
/// Implementations must satisfy `inverse(forward(x)) ≈ x` and preserve
/// energy (Parseval) to floating-point precision.
pub trait SpectralTransform {
    /// Transform a real series into its one-sided spectrum.
    fn forward(&self, series: &[f64]) -> SurrogateResult<Spectrum>;

    /// Transform a one-sided spectrum back into a real series.
    fn inverse(&self, spectrum: &Spectrum) -> SurrogateResult<Vec<f64>>;
}

/// [`SpectralTransform`] backed by `rustfft` with cached plans.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftTransform;

impl SpectralTransform for RustFftTransform {
    fn forward(&self, series: &[f64]) -> SurrogateResult<Spectrum> {
        let n = series.len();
        let fft = get_cached_fft_plan(n, true)?;

        let mut buffer: Vec<Complex64> = series.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        fft.process(&mut buffer);
        buffer.truncate(Spectrum::coefficient_count(n));

        Spectrum::new(buffer, n)
    }

    fn inverse(&self, spectrum: &Spectrum) -> SurrogateResult<Vec<f64>> {
        let n = spectrum.series_len();
        let fft = get_cached_fft_plan(n, false)?;

        let half = spectrum.coefficients();
        let mut buffer: Vec<Complex64> = (0..n)
            .map(|k| if k < half.len() { half[k] } else { half[n - k].conj() })
            .collect();
        fft.process(&mut buffer);

        // rustfft leaves the inverse unnormalized.
        let normalization = 1.0 / n as f64;
        Ok(buffer.iter().map(|c| c.re * normalization).collect())
    }
}

/// Rescale `series` by a power of two so its largest magnitude is close to 1.
///
/// Returns the scaled copy and the factor to multiply results by. Power-of-two
/// scaling is exact and transforms are linear, so a generator run on the
/// scaled copy matches the unscaled run bit for bit while the unnormalized FFT
/// sums stay far from overflow.
pub(crate) fn normalize_range(series: &[f64]) -> (Vec<f64>, f64) {
    let max_abs = series.iter().fold(0.0_f64, |max, x| max.max(x.abs()));
    if max_abs == 0.0 || !max_abs.is_finite() {
        return (series.to_vec(), 1.0);
    }
    let exponent = (max_abs.log2().floor() as i32).clamp(-1022, 1023);
    let scale = 2.0_f64.powi(exponent);
    (series.iter().map(|x| x / scale).collect(), scale)
}

/// Undo [`normalize_range`], failing if any value leaves the `f64` range.
pub(crate) fn restore_range(
    values: Vec<f64>,
    scale: f64,
    operation: &str,
) -> SurrogateResult<Vec<f64>> {
    let restored: Vec<f64> = values.into_iter().map(|x| x * scale).collect();
    if restored.iter().all(|x| x.is_finite()) {
        Ok(restored)
    } else {
        log::debug!("{}: output overflowed after rescaling by {:e}", operation, scale);
        Err(SurrogateError::NumericalOverflow {
            operation: operation.to_string(),
        })
    }
}

/// Periodogram power summed into `n_window` contiguous frequency bins.
///
/// Only the `n/2` non-DC frequencies take part. Each bin covers
/// `(n/2) / n_window` frequencies and the last bin absorbs the remainder, so
/// the result always has exactly `n_window` entries.
pub fn binned_periodogram(spectrum: &Spectrum, n_window: usize) -> SurrogateResult<Vec<f64>> {
    let usable = spectrum.series_len() / 2;
    validate_parameter(n_window as f64, 1.0, usable as f64, "n_window")?;

    let periodogram = spectrum.periodogram();
    let power = &periodogram[1..=usable];
    let bin_width = usable / n_window;

    Ok((0..n_window)
        .map(|bin| {
            let start = bin * bin_width;
            let end = if bin + 1 == n_window { usable } else { start + bin_width };
            power[start..end].iter().sum()
        })
        .collect())
}
