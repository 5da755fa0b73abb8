//! Common interface for the summary statistics
//!
//! Each statistic works on one kind of series, needs a minimum number of
//! samples, and reads the sampling interval from the series itself.

use picomon_core::{Result, Series, SeriesKind};

/// A statistic computed over a whole series
pub trait SeriesStatistic {
    /// Output type of the statistic
    type Output;

    /// Human-readable name of the statistic
    fn name(&self) -> &str;

    /// Fewest samples for which the statistic is defined
    fn minimum_samples(&self) -> usize;

    /// Kind of series this statistic is defined over
    fn accepts(&self) -> SeriesKind;

    /// Compute from a series already checked by [`SeriesStatistic::compute`]
    fn compute_unchecked(&self, series: &Series) -> Self::Output;

    /// Check kind and length, then compute
    fn compute(&self, series: &Series) -> Result<Self::Output> {
        series.require_kind(self.accepts())?;
        series.require(self.minimum_samples())?;
        Ok(self.compute_unchecked(series))
    }

    /// Check if the statistic can handle the given sample size
    fn can_handle_size(&self, size: usize) -> bool {
        size >= self.minimum_samples()
    }
}
