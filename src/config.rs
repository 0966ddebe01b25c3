//! # Generator Configuration
//!
//! Configuration structures for the iterative refiner, ensemble generation
//! and random-amplitude surrogates.

use crate::errors::{validate_parameter, SurrogateError, SurrogateResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for IAAFT refinement.
///
/// Defaults follow the usual literature settings: 200 iterations, a relative
/// tolerance of 1e-6 and 50 periodogram bins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IaaftConfig {
    /// Hard cap on refinement iterations (`n_maxiter`)
    pub max_iterations: usize,
    /// Relative change in periodogram mismatch below which the run has converged (`tol`)
    pub tolerance: f64,
    /// Number of frequency bins used when comparing periodograms (`n_window`)
    pub n_window: usize,
}

impl Default for IaaftConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-6,
            n_window: 50,
        }
    }
}

impl IaaftConfig {
    /// Quick configuration for large ensembles
    pub fn fast() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-4,
            ..Self::default()
        }
    }

    /// Tight configuration for single high-quality surrogates
    pub fn precise() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-10,
            ..Self::default()
        }
    }

    /// Default configuration with `n_window` clamped to what a series of
    /// length `n` supports (at most `n / 2`, at least 1).
    pub fn for_length(n: usize) -> Self {
        let defaults = Self::default();
        Self {
            n_window: defaults.n_window.min(n / 2).max(1),
            ..defaults
        }
    }

    /// Check the configuration against a series of length `n`.
    pub fn validate(&self, n: usize) -> SurrogateResult<()> {
        if self.max_iterations == 0 {
            return Err(SurrogateError::InvalidParameter {
                parameter: "max_iterations".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SurrogateError::InvalidParameter {
                parameter: "tolerance".to_string(),
                value: self.tolerance,
                constraint: "must be finite and greater than 0".to_string(),
            });
        }
        validate_parameter(self.n_window as f64, 1.0, (n / 2) as f64, "n_window")
    }
}

/// How random-amplitude surrogates draw new Fourier magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AmplitudeDistribution {
    /// Each magnitude drawn uniformly between the smallest and largest
    /// non-DC magnitude of the input
    #[default]
    Uniform,
    /// Magnitudes are a random permutation of the input's non-DC magnitudes
    Resampled,
}

/// Configuration for generating an ensemble of surrogates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnsembleConfig {
    /// Number of surrogates to generate
    pub size: usize,
    /// Random seed for reproducible ensembles (OS entropy when `None`)
    pub seed: Option<u64>,
    /// Generate members in parallel when the `parallel` feature is enabled
    pub parallel: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            size: 100,
            seed: None,
            parallel: true,
        }
    }
}

impl EnsembleConfig {
    /// Seeded ensemble of `size` members
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self {
            size,
            seed: Some(seed),
            ..Self::default()
        }
    }
}
