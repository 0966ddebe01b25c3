//! Property tests for the surrogate generators
//!
//! Distribution and spectrum preservation, determinism under a fixed seed, and
//! substitutability of the spectral transform.

use assert_approx_eq::assert_approx_eq;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::StandardNormal;
use timeseries_surrogates::math_utils::{calculate_variance, sorted_copy};
use timeseries_surrogates::{
    aaft, aaft_with_transform, iaaft_with_config, iaaft_with_transform, random_amplitudes,
    random_amplitudes_with, random_phases, random_phases_with_transform, random_shuffle,
    AmplitudeDistribution, IaaftConfig, RustFftTransform, SecureRng, SpectralTransform, Spectrum,
    SurrogateResult,
};

const SCENARIO: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0];

/// O(n²) discrete Fourier transform, independent of rustfft.
struct NaiveDft;

impl SpectralTransform for NaiveDft {
    fn forward(&self, series: &[f64]) -> SurrogateResult<Spectrum> {
        let n = series.len();
        let coefficients = (0..Spectrum::coefficient_count(n))
            .map(|k| {
                series
                    .iter()
                    .enumerate()
                    .map(|(t, &x)| {
                        let angle = -2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                        Complex64::from_polar(x, angle)
                    })
                    .sum::<Complex64>()
            })
            .collect();
        Spectrum::new(coefficients, n)
    }

    fn inverse(&self, spectrum: &Spectrum) -> SurrogateResult<Vec<f64>> {
        let n = spectrum.series_len();
        let half = spectrum.coefficients();
        let full: Vec<Complex64> = (0..n)
            .map(|k| if k < half.len() { half[k] } else { half[n - k].conj() })
            .collect();
        Ok((0..n)
            .map(|t| {
                full.iter()
                    .enumerate()
                    .map(|(k, c)| {
                        let angle = 2.0 * std::f64::consts::PI * (k * t) as f64 / n as f64;
                        (c * Complex64::from_polar(1.0, angle)).re
                    })
                    .sum::<f64>()
                    / n as f64
            })
            .collect())
    }
}

fn ar1(n: usize, phi: f64, seed: u64) -> Vec<f64> {
    let mut rng = SecureRng::with_seed(seed);
    let mut x = 0.0;
    (0..n)
        .map(|_| {
            let shock: f64 = rng.sample(StandardNormal);
            x = phi * x + shock;
            x
        })
        .collect()
}

#[test]
fn test_reference_scenario() {
    let sorted = vec![1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0];
    let mut rng = SecureRng::with_seed(42);

    let shuffled = random_shuffle(&SCENARIO, &mut rng).unwrap();
    assert_eq!(sorted_copy(&shuffled), sorted);

    let adjusted = aaft(&SCENARIO, &mut rng).unwrap();
    assert_eq!(sorted_copy(&adjusted), sorted);

    let config = IaaftConfig { max_iterations: 50, tolerance: 1e-6, n_window: 4 };
    let outcome = iaaft_with_config(&SCENARIO, &config, &mut SecureRng::with_seed(42)).unwrap();
    assert!(outcome.converged);
    assert!(outcome.iterations <= 50);
    assert_eq!(sorted_copy(&outcome.surrogate), sorted);
}

#[test]
fn test_constant_boundary() {
    let series = [3.0, 3.0, 3.0, 3.0];
    let config = IaaftConfig::for_length(4);
    let outcome = iaaft_with_config(&series, &config, &mut SecureRng::with_seed(1)).unwrap();
    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 0);
    assert_eq!(outcome.surrogate, series.to_vec());
}

#[test]
fn test_distribution_preservation() {
    let series = ar1(300, 0.7, 11);
    let expected = sorted_copy(&series);
    let mut rng = SecureRng::with_seed(5);

    assert_eq!(sorted_copy(&random_shuffle(&series, &mut rng).unwrap()), expected);
    assert_eq!(sorted_copy(&aaft(&series, &mut rng).unwrap()), expected);

    let outcome = iaaft_with_config(&series, &IaaftConfig::for_length(300), &mut rng).unwrap();
    assert_eq!(sorted_copy(&outcome.surrogate), expected);
}

#[test]
fn test_length_preservation() {
    let mut rng = SecureRng::with_seed(8);
    for n in [2, 3, 5, 16, 17, 100] {
        let series = ar1(n, 0.5, n as u64);
        assert_eq!(random_shuffle(&series, &mut rng).unwrap().len(), n);
        assert_eq!(random_phases(&series, &mut rng).unwrap().len(), n);
        assert_eq!(random_amplitudes(&series, &mut rng).unwrap().len(), n);
        assert_eq!(aaft(&series, &mut rng).unwrap().len(), n);
        let outcome = iaaft_with_config(&series, &IaaftConfig::for_length(n), &mut rng).unwrap();
        assert_eq!(outcome.surrogate.len(), n);
    }
}

#[test]
fn test_random_phases_preserve_spectrum_and_variance() {
    let series = ar1(257, 0.9, 3);
    let surrogate = random_phases(&series, &mut SecureRng::with_seed(17)).unwrap();

    let original = RustFftTransform.forward(&series).unwrap();
    let randomized = RustFftTransform.forward(&surrogate).unwrap();
    for (a, b) in original.magnitudes().iter().zip(randomized.magnitudes()) {
        assert_approx_eq!(a, b, 1e-8);
    }
    assert_ne!(original.phases(), randomized.phases());
    assert_approx_eq!(calculate_variance(&series), calculate_variance(&surrogate), 1e-9);
}

#[test]
fn test_round_trip_identity() {
    for n in [2, 3, 7, 64, 101] {
        let series = ar1(n, 0.3, 100 + n as u64);
        for transform in [&RustFftTransform as &dyn SpectralTransform, &NaiveDft] {
            let rebuilt = transform.inverse(&transform.forward(&series).unwrap()).unwrap();
            for (a, b) in series.iter().zip(&rebuilt) {
                assert_approx_eq!(a, b, 1e-9);
            }
        }
    }
}

#[test]
fn test_iaaft_improves_on_aaft() {
    for seed in 0..5 {
        let series = ar1(200, 0.8, seed);
        let config = IaaftConfig::for_length(200);
        let outcome = iaaft_with_config(&series, &config, &mut SecureRng::with_seed(seed)).unwrap();

        assert!(outcome.mismatch <= outcome.initial_mismatch);
        assert_eq!(outcome.mismatch_history[0], outcome.initial_mismatch);
        assert_eq!(outcome.mismatch_history.len(), outcome.iterations + 1);
        assert!(outcome.iterations <= config.max_iterations);
    }
}

#[test]
fn test_determinism_under_fixed_seed() {
    let series = ar1(128, 0.6, 21);
    let run = |seed: u64| {
        let mut rng = SecureRng::with_seed(seed);
        (
            random_shuffle(&series, &mut rng).unwrap(),
            random_phases(&series, &mut rng).unwrap(),
            random_amplitudes(&series, &mut rng).unwrap(),
            aaft(&series, &mut rng).unwrap(),
            iaaft_with_config(&series, &IaaftConfig::for_length(128), &mut rng).unwrap(),
        )
    };

    assert_eq!(run(99), run(99));
    assert_ne!(run(99).0, run(100).0);
}

#[test]
fn test_any_rng_can_drive_generators() {
    let series = ar1(64, 0.5, 2);

    let mut std_rng = StdRng::seed_from_u64(4);
    let a = aaft(&series, &mut std_rng).unwrap();
    let b = aaft(&series, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(a, b);

    let dynamic: &mut dyn RngCore = &mut SecureRng::with_seed(4);
    let shuffled = random_shuffle(&series, dynamic).unwrap();
    assert_eq!(sorted_copy(&shuffled), sorted_copy(&series));
}

#[test]
fn test_naive_transform_is_substitutable() {
    let series = ar1(48, 0.7, 6);

    let via_rustfft = random_phases(&series, &mut SecureRng::with_seed(12)).unwrap();
    let via_naive =
        random_phases_with_transform(&NaiveDft, &series, &mut SecureRng::with_seed(12)).unwrap();
    for (a, b) in via_rustfft.iter().zip(&via_naive) {
        assert_approx_eq!(a, b, 1e-8);
    }

    let adjusted = aaft_with_transform(&NaiveDft, &series, &mut SecureRng::with_seed(3)).unwrap();
    assert_eq!(sorted_copy(&adjusted), sorted_copy(&series));

    let config = IaaftConfig { max_iterations: 30, ..IaaftConfig::for_length(48) };
    let outcome =
        iaaft_with_transform(&NaiveDft, &series, &config, &mut SecureRng::with_seed(3)).unwrap();
    assert_eq!(sorted_copy(&outcome.surrogate), sorted_copy(&series));
    assert!(outcome.mismatch <= outcome.initial_mismatch);
}

/// Alternating-sign series with every magnitude in `[0.5, 1)`.
fn bounded_alternating(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            sign * (0.5 + 0.5 * ((i * 7) % 11) as f64 / 11.0)
        })
        .collect()
}

#[test]
fn test_extreme_magnitudes_scale_exactly() {
    // The Nyquist sum of `big` is about 64 * 2^1019, past f64::MAX.
    let base = bounded_alternating(64);
    let factor = 2.0_f64.powi(1020);
    let big: Vec<f64> = base.iter().map(|x| x * factor).collect();
    let rescale = |values: Vec<f64>| values.into_iter().map(|x| x * factor).collect::<Vec<_>>();

    let phases = random_phases(&big, &mut SecureRng::with_seed(31)).unwrap();
    assert!(phases.iter().all(|x| x.is_finite()));
    assert_eq!(phases, rescale(random_phases(&base, &mut SecureRng::with_seed(31)).unwrap()));

    let resampled = AmplitudeDistribution::Resampled;
    let mut rng = SecureRng::with_seed(32);
    let amplitudes = random_amplitudes_with(&big, resampled, &mut rng).unwrap();
    let mut rng = SecureRng::with_seed(32);
    let expected = random_amplitudes_with(&base, resampled, &mut rng).unwrap();
    assert!(amplitudes.iter().all(|x| x.is_finite()));
    assert_eq!(amplitudes, rescale(expected));

    let adjusted = aaft(&big, &mut SecureRng::with_seed(33)).unwrap();
    assert_eq!(sorted_copy(&adjusted), sorted_copy(&big));

    let config = IaaftConfig::for_length(64);
    let large = iaaft_with_config(&big, &config, &mut SecureRng::with_seed(34)).unwrap();
    let small = iaaft_with_config(&base, &config, &mut SecureRng::with_seed(34)).unwrap();
    assert!(large.mismatch.is_finite());
    assert_eq!(large.mismatch_history, small.mismatch_history);
    assert_eq!(large.surrogate, rescale(small.surrogate));
}
