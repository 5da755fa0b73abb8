//! # Phase-data stability statistics
//!
//! The three numbers a monitor plot reports, computed on the already
//! downsampled series at its effective tau:
//!
//! - **Linear regression** of phase against sample index; the slope over tau
//!   is the average fractional frequency offset
//! - **Mean frequency** of the differenced series
//! - **Allan deviation** from second differences of phase
//!
//! Each is a [`SeriesStatistic`]; [`StabilitySummary`] picks the ones a
//! plot mode needs and turns "series too short" into an absent value.

pub mod allan;
pub mod mean;
pub mod regression;
pub mod summary;
pub mod traits;

// Re-exports
pub use allan::AllanDeviation;
pub use mean::MeanFrequency;
pub use regression::{fit_indexed, LinearRegression, LinearTrend};
pub use summary::StabilitySummary;
pub use traits::SeriesStatistic;
