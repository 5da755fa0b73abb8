//! Least-squares frequency offset from phase

use crate::traits::SeriesStatistic;
use picomon_core::{OverlayLine, Series, SeriesKind};

/// Straight-line fit of phase against sample index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    /// Phase change per sample, seconds
    pub slope_per_sample: f64,
    /// Fitted phase at index 0, seconds
    pub intercept: f64,
    /// `slope_per_sample / tau`, the average fractional frequency offset
    pub frequency_offset: f64,
    /// Tau the fit was made at
    pub tau: f64,
}

impl LinearTrend {
    /// Two-point trend overlay spanning samples 1..=`n`
    ///
    /// Drawn from `(1, intercept)` to `(n, intercept + frequency_offset * tau * n)`.
    pub fn overlay(&self, n: usize) -> OverlayLine {
        let n = n as f64;
        OverlayLine::new(
            (1.0, self.intercept),
            (n, self.intercept + self.frequency_offset * self.tau * n),
        )
    }

    /// Fitted value at a 1-based index
    pub fn value_at(&self, index: f64) -> f64 {
        self.intercept + self.slope_per_sample * index
    }
}

/// Ordinary least squares over `(i, x[i])`, `i = 1..=N`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression;

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }
}

/// Closed-form OLS slope and intercept for 1-based indices
///
/// Returns `None` for fewer than two points, where the denominator vanishes.
pub fn fit_indexed(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = (i + 1) as f64;
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }

    let nf = n as f64;
    let slope = (nf * sxy - sx * sy) / (nf * sxx - sx * sx);
    let intercept = (sy - slope * sx) / nf;
    Some((slope, intercept))
}

impl SeriesStatistic for LinearRegression {
    type Output = LinearTrend;

    fn name(&self) -> &str {
        "Linear regression"
    }

    fn minimum_samples(&self) -> usize {
        2
    }

    fn accepts(&self) -> SeriesKind {
        SeriesKind::Phase
    }

    fn compute_unchecked(&self, series: &Series) -> LinearTrend {
        let values = series.to_values();
        let (slope, intercept) = fit_indexed(&values).unwrap_or((0.0, 0.0));
        LinearTrend {
            slope_per_sample: slope,
            intercept,
            frequency_offset: slope / series.tau(),
            tau: series.tau(),
        }
    }
}
