//! Mode-dependent bundle of the statistics shown on a plot

use crate::allan::AllanDeviation;
use crate::mean::MeanFrequency;
use crate::regression::{LinearRegression, LinearTrend};
use crate::traits::SeriesStatistic;
use picomon_core::{Error, OverlayLine, PlotMode, Result, Series};
use tracing::{debug, instrument};

/// Statistics for one plot, in SI units
///
/// A statistic that the series is too short for is `None`; its legend line
/// and overlay are left out rather than failing the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilitySummary {
    pub mode: PlotMode,
    /// Regression fit, phase mode only
    pub trend: Option<LinearTrend>,
    /// Mean of the frequency series, frequency mode only
    pub mean_frequency: Option<f64>,
    /// Allan deviation of the phase series at its own tau
    pub allan_deviation: Option<f64>,
    /// Overlay line for the plotted series, unscaled
    pub overlay: Option<OverlayLine>,
}

impl StabilitySummary {
    /// Compute what `mode` needs
    ///
    /// `phase` is always the downsampled phase series. `frequency` must be
    /// supplied in frequency mode.
    #[instrument(skip(phase, frequency), fields(phase_points = phase.len()))]
    pub fn for_mode(mode: PlotMode, phase: &Series, frequency: Option<&Series>) -> Result<Self> {
        let allan_deviation = optional(AllanDeviation.compute(phase), "allan deviation")?;

        let (trend, mean_frequency, overlay) = match mode {
            PlotMode::Phase => {
                let trend = optional(LinearRegression.compute(phase), "regression")?;
                let overlay = trend.map(|t| t.overlay(phase.len()));
                (trend, None, overlay)
            }
            PlotMode::Frequency => {
                let freq = frequency.ok_or_else(|| {
                    Error::InvalidInput("frequency mode needs a frequency series".to_string())
                })?;
                let mean = optional(MeanFrequency.compute(freq), "mean frequency")?;
                let overlay = mean.map(|m| MeanFrequency::overlay(m, freq.len()));
                (None, mean, overlay)
            }
        };

        Ok(Self {
            mode,
            trend,
            mean_frequency,
            allan_deviation,
            overlay,
        })
    }

    /// Frequency offset for the legend
    ///
    /// Regression-derived in phase mode, mean-derived in frequency mode.
    pub fn frequency_estimate(&self) -> Option<f64> {
        match self.mode {
            PlotMode::Phase => self.trend.map(|t| t.frequency_offset),
            PlotMode::Frequency => self.mean_frequency,
        }
    }
}

/// Downgrade `InsufficientData` to `None`, keep every other error
fn optional<T>(result: Result<T>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_insufficient_data() => {
            debug!(statistic = what, error = %e, "statistic skipped");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
