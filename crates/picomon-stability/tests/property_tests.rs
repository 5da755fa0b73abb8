//! Property-based tests for the stability statistics

use approx::assert_relative_eq;
use picomon_core::{AveragingFactor, ReductionParameters, Series};
use picomon_reduce::{downsample, phase_to_frequency};
use picomon_stability::{AllanDeviation, LinearRegression, MeanFrequency, SeriesStatistic};
use proptest::prelude::*;

proptest! {
    // value[i] = a + b i recovers a and b
    #[test]
    fn prop_regression_recovers_line(
        a in -1.0e-6..1.0e-6f64,
        b in -1.0e-9..1.0e-9f64,
        n in 2usize..2000,
        tau in 0.1..100.0f64,
    ) {
        let phase = Series::phase(tau, (1..=n).map(|i| a + b * i as f64));
        let trend = LinearRegression.compute(&phase).unwrap();
        let scale = a.abs().max(b.abs() * n as f64).max(1e-18);
        prop_assert!((trend.frequency_offset * tau - b).abs() <= 1e-6 * scale);
        prop_assert!((trend.intercept - a).abs() <= 1e-6 * scale);
    }

    // No curvature means no Allan deviation
    #[test]
    fn prop_linear_phase_zero_adev(
        a in -1.0..1.0f64,
        b in -1.0..1.0f64,
        n in 3usize..1000,
        tau in 0.1..10.0f64,
    ) {
        let phase = Series::phase(tau, (1..=n).map(|i| a + b * i as f64));
        let sigma = AllanDeviation.compute(&phase).unwrap();
        let scale = a.abs() + b.abs() * n as f64;
        prop_assert!(sigma <= 1e-12 * scale.max(1.0) / tau);
    }

    // The mean of differenced phase telescopes to (last - first) / ((N - 1) tau)
    #[test]
    fn prop_mean_frequency_telescopes(
        values in prop::collection::vec(-1.0e-6..1.0e-6f64, 2..400),
        tau in 0.5..50.0f64,
    ) {
        let phase = Series::phase(tau, values.clone());
        let freq = phase_to_frequency(&phase).unwrap();
        let mean = MeanFrequency.compute(&freq).unwrap();
        let expected = (values[values.len() - 1] - values[0]) / ((values.len() - 1) as f64 * tau);
        prop_assert!((mean - expected).abs() <= 1e-15 + 1e-9 * expected.abs());
    }
}

#[test]
fn test_white_phase_noise_adev_positive() {
    let phase = Series::phase(
        1.0,
        (0..1000).map(|_| 1.0e-9 * (rand::random::<f64>() * 2.0 - 1.0)),
    );
    let sigma = AllanDeviation.compute(&phase).unwrap();
    assert!(sigma > 0.0);
    assert!(sigma.is_finite());
}

#[test]
fn test_statistics_use_effective_tau_after_downsampling() {
    // Quadratic phase: second differences constant, so ADEV depends only on tau
    let raw: Vec<f64> = (0..12_000).map(|i| 1.0e-12 * (i as f64).powi(2)).collect();
    let params = ReductionParameters::new(raw.len(), 5000, AveragingFactor::Auto, 1.0).unwrap();
    let reduced = downsample(&raw, &params).unwrap();
    assert_eq!(reduced.series.tau(), 3.0);

    // x[k] = 1e-12 (3k)^2 -> second difference 2 * 9e-12 = 1.8e-11
    let sigma = AllanDeviation.compute(&reduced.series).unwrap();
    assert_relative_eq!(sigma, 1.8e-11 / (2.0f64.sqrt() * 3.0), max_relative = 1e-6);

    // slope of (3k)^2 sampled at k is not linear, but the offset still divides by tau = 3
    let trend = LinearRegression.compute(&reduced.series).unwrap();
    assert_relative_eq!(
        trend.frequency_offset,
        trend.slope_per_sample / 3.0,
        max_relative = 1e-12
    );
}
