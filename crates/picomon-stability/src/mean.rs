//! Average fractional frequency

use crate::traits::SeriesStatistic;
use picomon_core::{OverlayLine, Series, SeriesKind};
use statrs::statistics::Statistics;

/// Arithmetic mean of a frequency series
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanFrequency;

impl MeanFrequency {
    pub fn new() -> Self {
        Self
    }

    /// Constant overlay at `mean` across samples 1..=`m`
    pub fn overlay(mean: f64, m: usize) -> OverlayLine {
        OverlayLine::horizontal(1.0, m as f64, mean)
    }
}

impl SeriesStatistic for MeanFrequency {
    type Output = f64;

    fn name(&self) -> &str {
        "Mean frequency"
    }

    fn minimum_samples(&self) -> usize {
        1
    }

    fn accepts(&self) -> SeriesKind {
        SeriesKind::Frequency
    }

    fn compute_unchecked(&self, series: &Series) -> f64 {
        Statistics::mean(series.values())
    }
}
