//! Unit selection and legend placement on realistic series

use approx::assert_relative_eq;
use picomon_core::{Series, SeriesKind, Unit};
use picomon_plot::{choose_corner, unit_for_range, LegendCorner, ScaledSeries};
use proptest::prelude::*;

proptest! {
    // Any non-degenerate phase span lands in [1, 1000) display units below a second
    #[test]
    fn prop_phase_range_lands_in_display_window(exp in -12.0..-3.5f64, k in -5.0..5.0f64) {
        let span = 10f64.powf(exp);
        let offset = k * span;
        let phase = Series::phase(1.0, vec![offset, offset + span]);
        let scaled = ScaledSeries::scale(phase, None).unwrap();
        let values = scaled.series().to_values();
        let shown = (values[1] - values[0]).abs();
        prop_assert!(shown >= 1.0 - 1e-9, "span {span} shown as {shown}");
        prop_assert!(shown < 1000.0 + 1e-9, "span {span} shown as {shown}");
    }

    #[test]
    fn prop_frequency_range_lands_in_display_window(exp in -15.0..-6.5f64) {
        let span = 10f64.powf(exp);
        let freq = Series::frequency(1.0, vec![0.0, span]);
        let scaled = ScaledSeries::scale(freq, None).unwrap();
        let shown = scaled.series().to_values()[1];
        prop_assert!(shown >= 1.0 - 1e-9 && shown < 1000.0 + 1e-9);
    }
}

#[test]
fn test_two_hundred_nanosecond_span() {
    let phase = Series::phase(1.0, vec![0.0, 1.0e-7, 2.0e-7]);
    let scaled = ScaledSeries::scale(phase, None).unwrap();
    assert_eq!(scaled.unit(), Unit::Nanoseconds);
    assert_eq!(scaled.scale_factor().factor, 1.0e9);
    assert_relative_eq!(scaled.series().to_values()[2], 200.0, max_relative = 1e-12);
}

#[test]
fn test_constant_series_uses_its_magnitude() {
    assert_eq!(unit_for_range(SeriesKind::Phase, 5.0e-12), Unit::Picoseconds);
    let flat = Series::frequency(1.0, vec![4.0e-11; 10]);
    let scaled = ScaledSeries::scale(flat, None).unwrap();
    assert_eq!(scaled.unit(), Unit::PartsPer1e12);
}

#[test]
fn test_drifting_phase_moves_legend_down() {
    let values: Vec<f64> = (0..500)
        .map(|i| 0.4 * i as f64 + if i % 3 == 0 { 1.0 } else { -0.5 })
        .collect();
    assert_eq!(choose_corner(&values, 3.0), LegendCorner::LowerRight);
    assert_eq!(choose_corner(&values, 1.0e6), LegendCorner::UpperRight);
}
