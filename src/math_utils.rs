//! Small numerical helpers shared by the generators and their tests.

/// Numerical constants.
pub mod constants {
    /// 2π, the width of the phase interval
    pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
}

/// Sort a slice of finite values in ascending order.
///
/// Uses `total_cmp`, so the order is total and the sort is stable.
pub fn sort_f64_slice(slice: &mut [f64]) {
    slice.sort_by(|a, b| a.total_cmp(b));
}

/// Return a sorted copy of `data`.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sort_f64_slice(&mut sorted);
    sorted
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn calculate_mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance via Welford's algorithm; 0.0 for fewer than two points.
pub fn calculate_variance(data: &[f64]) -> f64 {
    if data.len() <= 1 {
        return 0.0;
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in data.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }

    m2 / (data.len() - 1) as f64
}

/// True when every value equals the first one exactly (zero variance).
pub fn is_constant(data: &[f64]) -> bool {
    match data.first() {
        Some(&first) => data.iter().all(|&x| x == first),
        None => true,
    }
}

/// Biased sample autocorrelations for lags `0..=max_lag`.
///
/// Lag 0 is 1.0. A constant series, or one no longer than `max_lag`, instead
/// yields zeros.
pub fn calculate_autocorrelations(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    if n <= max_lag {
        return vec![0.0; max_lag + 1];
    }

    let mean = calculate_mean(data);
    let variance = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
    if variance <= 0.0 {
        return vec![0.0; max_lag + 1];
    }

    let mut autocorrs = Vec::with_capacity(max_lag + 1);
    autocorrs.push(1.0);
    for lag in 1..=max_lag {
        let covariance = (0..n - lag)
            .map(|i| (data[i] - mean) * (data[i + lag] - mean))
            .sum::<f64>()
            / n as f64;
        autocorrs.push(covariance / variance);
    }
    autocorrs
}
