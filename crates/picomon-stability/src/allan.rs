//! Allan deviation of phase data at the series' own tau
//!
//! With phase readings `x[0..N]` spaced `tau` apart:
//!
//! ```text
//! sigma_y(tau) = sqrt( sum_{i=0}^{N-3} (x[i+2] - 2 x[i+1] + x[i])^2 / (2 (N - 2) tau^2) )
//! ```
//!
//! After downsampling the series tau is already `nominal_tau * af`, so this
//! is the deviation at averaging factor 1 relative to the reduced series,
//! not at the raw measurement interval.

use crate::traits::SeriesStatistic;
use picomon_core::{Series, SeriesKind};
use tracing::trace;

/// Overlapping second-difference Allan deviation
#[derive(Debug, Clone, Copy, Default)]
pub struct AllanDeviation;

impl AllanDeviation {
    pub fn new() -> Self {
        Self
    }
}

/// Sum of squared second differences of `x`
pub fn second_difference_energy(x: &[f64]) -> f64 {
    x.windows(3)
        .map(|w| {
            let d = w[2] - 2.0 * w[1] + w[0];
            d * d
        })
        .sum()
}

impl SeriesStatistic for AllanDeviation {
    type Output = f64;

    fn name(&self) -> &str {
        "Allan deviation"
    }

    /// Two points leave the divisor `2 (N - 2) tau^2` at zero
    fn minimum_samples(&self) -> usize {
        3
    }

    fn accepts(&self) -> SeriesKind {
        SeriesKind::Phase
    }

    fn compute_unchecked(&self, series: &Series) -> f64 {
        let x = series.to_values();
        let tau = series.tau();
        let ss = second_difference_energy(&x);
        let terms = (x.len() - 2) as f64;
        trace!(n = x.len(), tau, ss, "allan second differences");
        (ss / (2.0 * terms * tau * tau)).sqrt()
    }
}
