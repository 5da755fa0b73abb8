//! Phase to fractional-frequency conversion

use picomon_core::{Result, Series, SeriesKind};
use tracing::debug;

/// First differences of phase divided by the series' tau
///
/// Produces `N - 1` frequency samples from `N` phase samples:
/// `y[i] = (x[i + 1] - x[i]) / tau`. The result keeps the input tau.
pub fn phase_to_frequency(phase: &Series) -> Result<Series> {
    phase.require_kind(SeriesKind::Phase)?;
    phase.require(2)?;

    let tau = phase.tau();
    let frequency = Series::frequency(
        tau,
        phase
            .samples()
            .windows(2)
            .map(|pair| (pair[1].value - pair[0].value) / tau),
    );

    debug!(
        phase_points = phase.len(),
        frequency_points = frequency.len(),
        tau,
        "differenced phase"
    );
    Ok(frequency)
}
