//! Error types and validation functions for surrogate generation.
//!
//! Every generator validates its input before touching the spectral or rank
//! machinery, so a failed call never yields a partial surrogate. Iteration
//! budgets running out (IAAFT) and constant series are not errors; they are
//! reported through the normal result types.

use thiserror::Error;

/// Error types for surrogate generation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SurrogateError {
    /// Series too short for surrogate generation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// Invalid parameter value for a generator or its configuration.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// The input series contains NaN or an infinity.
    #[error("{name} contains non-finite value at index {index}: {value}")]
    NonFiniteInput {
        /// Name of the offending input
        name: String,
        /// Position of the first non-finite value
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Two sequences that must have equal lengths do not.
    #[error("Length mismatch in {operation}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
        /// Operation that detected the mismatch
        operation: String,
    },

    /// A generated value fell outside the range of `f64`.
    #[error("Numerical overflow in {operation}")]
    NumericalOverflow {
        /// Operation whose output overflowed
        operation: String,
    },

    /// FFT computation error.
    #[error("FFT computation failed: input size {size} not supported")]
    FftError {
        /// Input size that caused the FFT failure
        size: usize,
    },
}

/// Result type for surrogate generation.
pub type SurrogateResult<T> = Result<T, SurrogateError>;

/// Smallest series any generator accepts.
pub const MIN_SERIES_LENGTH: usize = 2;

/// Validates that data has sufficient length.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2, "test").is_ok());
/// assert!(validate_data_length(&data, 5, "test").is_err());
/// ```
pub fn validate_data_length(
    data: &[f64],
    min_required: usize,
    operation: &str,
) -> SurrogateResult<()> {
    if data.len() < min_required {
        log::debug!(
            "{} rejected a series of length {} (minimum {})",
            operation,
            data.len(),
            min_required
        );
        return Err(SurrogateError::InsufficientData {
            required: min_required,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first NaN or infinity found.
///
/// # Example
/// ```rust
/// use timeseries_surrogates::errors::validate_all_finite;
///
/// assert!(validate_all_finite(&[1.0, 2.0, 3.0], "test").is_ok());
/// assert!(validate_all_finite(&[1.0, f64::NAN, 3.0], "test").is_err());
/// ```
pub fn validate_all_finite(data: &[f64], name: &str) -> SurrogateResult<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SurrogateError::NonFiniteInput {
            name: name.to_string(),
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

/// Validates that a parameter is within `[min, max]`.
///
/// NaN values are always rejected.
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> SurrogateResult<()> {
    if value.is_nan() {
        return Err(SurrogateError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "must not be NaN".to_string(),
        });
    }

    if value < min || value > max {
        Err(SurrogateError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("[{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Validates a time series handed to a generator: at least
/// [`MIN_SERIES_LENGTH`] points, all finite.
pub fn validate_series(series: &[f64], operation: &str) -> SurrogateResult<()> {
    validate_data_length(series, MIN_SERIES_LENGTH, operation)?;
    validate_all_finite(series, "series")
}
