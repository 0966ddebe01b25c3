//! Iterative amplitude adjusted Fourier transform (IAAFT) surrogates.
//!
//! Starting from an AAFT surrogate, each iteration alternates two projections:
//!
//! 1. **Spectral fit**: keep the candidate's phases, replace its Fourier
//!    magnitudes with those of the original series, invert.
//! 2. **Amplitude fit**: impose the original value distribution onto the
//!    spectrum-matched sequence by rank-order mapping.
//!
//! Progress is measured by the mismatch between the binned periodogram of the
//! candidate and that of the original (`n_window` bins). The loop stops when
//! the relative change in mismatch between consecutive iterations drops below
//! `tolerance`, or after `max_iterations` iterations. Running out of
//! iterations is reported in the outcome, never as an error.
//!
//! The returned surrogate is the lowest-mismatch candidate seen, the initial
//! AAFT candidate included.

use crate::aaft::aaft_unchecked;
use crate::config::IaaftConfig;
use crate::errors::{validate_series, SurrogateError, SurrogateResult};
use crate::fft_ops::{
    binned_periodogram, normalize_range, restore_range, RustFftTransform, SpectralTransform,
};
use crate::math_utils::is_constant;
use crate::rank_order::RankOrderMapper;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of an IAAFT run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IaaftOutcome {
    /// Lowest-mismatch surrogate found
    pub surrogate: Vec<f64>,
    /// Whether the relative-change criterion was met before the iteration cap
    pub converged: bool,
    /// Refinement iterations performed (0 when no refinement was needed)
    pub iterations: usize,
    /// Periodogram mismatch of `surrogate`
    pub mismatch: f64,
    /// Periodogram mismatch of the initial AAFT candidate
    pub initial_mismatch: f64,
    /// Mismatch after each step; entry 0 is the AAFT candidate
    pub mismatch_history: Vec<f64>,
}

/// Normalized RMS distance between two binned periodograms.
///
/// `sqrt(Σ(current - target)² / Σ target²)`, or 0.0 when the target carries
/// no power.
pub fn periodogram_mismatch(current: &[f64], target: &[f64]) -> f64 {
    let (error, total) = current
        .iter()
        .zip(target)
        .fold((0.0, 0.0), |(error, total), (c, t)| {
            (error + (c - t) * (c - t), total + t * t)
        });

    if total > 0.0 {
        (error / total).sqrt()
    } else {
        0.0
    }
}

/// Working state of a single refinement run.
struct ConvergenceState {
    candidate: Vec<f64>,
    best: Vec<f64>,
    best_mismatch: f64,
    previous_mismatch: f64,
    history: Vec<f64>,
}

impl ConvergenceState {
    fn new(candidate: Vec<f64>, mismatch: f64, max_iterations: usize) -> Self {
        let mut history = Vec::with_capacity(max_iterations.min(1024) + 1);
        history.push(mismatch);
        Self {
            best: candidate.clone(),
            candidate,
            best_mismatch: mismatch,
            previous_mismatch: mismatch,
            history,
        }
    }

    /// Record a new candidate; returns the relative change in mismatch.
    fn advance(&mut self, candidate: Vec<f64>, mismatch: f64) -> f64 {
        if mismatch < self.best_mismatch {
            self.best.clone_from(&candidate);
            self.best_mismatch = mismatch;
        }
        self.history.push(mismatch);

        let relative_change = if self.previous_mismatch > 0.0 {
            (self.previous_mismatch - mismatch).abs() / self.previous_mismatch
        } else {
            0.0
        };
        self.previous_mismatch = mismatch;
        self.candidate = candidate;
        relative_change
    }

    fn finish(self, converged: bool, iterations: usize) -> IaaftOutcome {
        IaaftOutcome {
            surrogate: self.best,
            converged,
            iterations,
            mismatch: self.best_mismatch,
            initial_mismatch: self.history[0],
            mismatch_history: self.history,
        }
    }
}

/// Generate an IAAFT surrogate of `series` with the default configuration
/// (200 iterations, tolerance 1e-6, 50 windows).
///
/// The default window count needs a series of at least 100 points; use
/// [`iaaft_with_config`] with [`IaaftConfig::for_length`] for shorter input.
/// This holds for constant series too: parameters are checked before the
/// constant-series shortcut, so `iaaft(&[3.0; 4], rng)` is an
/// `InvalidParameter` error while `for_length(4)` converges at iteration 0.
pub fn iaaft<R: Rng + ?Sized>(series: &[f64], rng: &mut R) -> SurrogateResult<IaaftOutcome> {
    iaaft_with_config(series, &IaaftConfig::default(), rng)
}

/// Generate an IAAFT surrogate of `series` with an explicit configuration.
///
/// # Errors
/// Fails before any computation when the series is shorter than two points,
/// holds non-finite values, or `config` is invalid for its length. The
/// configuration is validated even for a constant series, which otherwise
/// converges at iteration 0 and is returned unchanged.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::{iaaft_with_config, IaaftConfig, SecureRng};
///
/// let series = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0];
/// let config = IaaftConfig { max_iterations: 50, tolerance: 1e-6, n_window: 4 };
/// let outcome = iaaft_with_config(&series, &config, &mut SecureRng::with_seed(7)).unwrap();
/// assert!(outcome.iterations <= 50);
/// assert_eq!(outcome.surrogate.len(), series.len());
/// ```
pub fn iaaft_with_config<R: Rng + ?Sized>(
    series: &[f64],
    config: &IaaftConfig,
    rng: &mut R,
) -> SurrogateResult<IaaftOutcome> {
    iaaft_with_transform(&RustFftTransform, series, config, rng)
}

/// [`iaaft_with_config`] using a caller-supplied spectral transform.
pub fn iaaft_with_transform<T, R>(
    transform: &T,
    series: &[f64],
    config: &IaaftConfig,
    rng: &mut R,
) -> SurrogateResult<IaaftOutcome>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    validate_series(series, "iaaft")?;
    config.validate(series.len())?;

    // Zero variance: nothing to match, the series is its own surrogate.
    if is_constant(series) {
        log::debug!("iaaft: constant series of length {}, converged at iteration 0", series.len());
        return Ok(IaaftOutcome {
            surrogate: series.to_vec(),
            converged: true,
            iterations: 0,
            mismatch: 0.0,
            initial_mismatch: 0.0,
            mismatch_history: vec![0.0],
        });
    }

    let (scaled, scale) = normalize_range(series);
    let mut outcome = refine(transform, &scaled, config, rng)?;
    outcome.surrogate = restore_range(outcome.surrogate, scale, "iaaft")?;
    Ok(outcome)
}

/// Periodogram mismatch of `candidate` against the binned target.
fn candidate_mismatch<T: SpectralTransform + ?Sized>(
    transform: &T,
    candidate: &[f64],
    n_window: usize,
    target_periodogram: &[f64],
) -> SurrogateResult<f64> {
    let binned = binned_periodogram(&transform.forward(candidate)?, n_window)?;
    let mismatch = periodogram_mismatch(&binned, target_periodogram);
    if mismatch.is_finite() {
        Ok(mismatch)
    } else {
        Err(SurrogateError::NumericalOverflow {
            operation: "iaaft periodogram mismatch".to_string(),
        })
    }
}

/// The refinement loop on a validated, non-constant, range-normalized series.
fn refine<T, R>(
    transform: &T,
    series: &[f64],
    config: &IaaftConfig,
    rng: &mut R,
) -> SurrogateResult<IaaftOutcome>
where
    T: SpectralTransform + ?Sized,
    R: Rng + ?Sized,
{
    let mapper = RankOrderMapper::new(series);
    let target_spectrum = transform.forward(series)?;
    let target_magnitudes = target_spectrum.magnitudes();
    let target_periodogram = binned_periodogram(&target_spectrum, config.n_window)?;

    let initial = aaft_unchecked(transform, series, &mapper, rng)?;
    let initial_mismatch =
        candidate_mismatch(transform, &initial, config.n_window, &target_periodogram)?;
    let mut state = ConvergenceState::new(initial, initial_mismatch, config.max_iterations);

    if initial_mismatch == 0.0 {
        log::debug!("iaaft: AAFT candidate already matches the target periodogram");
        return Ok(state.finish(true, 0));
    }

    for iteration in 1..=config.max_iterations {
        let spectrum = transform.forward(&state.candidate)?.with_magnitudes(&target_magnitudes)?;
        let candidate = mapper.apply(&transform.inverse(&spectrum)?)?;
        let mismatch =
            candidate_mismatch(transform, &candidate, config.n_window, &target_periodogram)?;
        let relative_change = state.advance(candidate, mismatch);

        log::trace!(
            "iaaft iteration {}: mismatch {:.3e}, relative change {:.3e}",
            iteration,
            mismatch,
            relative_change
        );

        if relative_change < config.tolerance {
            log::debug!(
                "iaaft: converged after {} iterations (mismatch {:.3e} -> {:.3e})",
                iteration,
                initial_mismatch,
                state.best_mismatch
            );
            return Ok(state.finish(true, iteration));
        }
    }

    log::debug!(
        "iaaft: no convergence within {} iterations (best mismatch {:.3e})",
        config.max_iterations,
        state.best_mismatch
    );
    Ok(state.finish(false, config.max_iterations))
}
