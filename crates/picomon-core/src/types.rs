//! Data model shared by every stage of the reduction pipeline

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// A single point of a series: 1-based sequence index and its value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in the series, starting at 1
    pub index: usize,
    /// Seconds of phase, or fractional frequency offset
    pub value: f64,
}

/// What the values of a series measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Time-interval readings in seconds
    Phase,
    /// Fractional frequency offset derived from phase first differences
    Frequency,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Phase => write!(f, "Phase"),
            SeriesKind::Frequency => write!(f, "Frequency"),
        }
    }
}

/// An ordered run of samples sharing one sampling interval
///
/// Indices are assigned 1..=N at construction, so a `Series` is always
/// contiguous and strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    tau: f64,
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from raw values, numbering them from 1
    pub fn from_values<I>(kind: SeriesKind, tau: f64, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let samples = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Sample { index: i + 1, value })
            .collect();
        Self { kind, tau, samples }
    }

    /// Phase series shorthand
    pub fn phase<I>(tau: f64, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_values(SeriesKind::Phase, tau, values)
    }

    /// Frequency series shorthand
    pub fn frequency<I>(tau: f64, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_values(SeriesKind::Frequency, tau, values)
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Sampling interval of this series in seconds
    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over the values in index order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// Values collected into a vector
    pub fn to_values(&self) -> Vec<f64> {
        self.values().collect()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// (index, value) pairs, the shape chart back ends consume
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.index as f64, s.value))
            .collect()
    }

    /// Fail with `InsufficientData` unless the series has `min` samples
    pub fn require(&self, min: usize) -> Result<()> {
        if self.len() < min {
            return Err(Error::insufficient(min, self.len()));
        }
        Ok(())
    }

    /// Fail with `InvalidInput` unless the series is of `kind`
    pub fn require_kind(&self, kind: SeriesKind) -> Result<()> {
        if self.kind != kind {
            return Err(Error::InvalidInput(format!(
                "expected a {kind} series, got {}",
                self.kind
            )));
        }
        Ok(())
    }

    /// Multiply every value in place, consuming the series
    pub fn rescaled(mut self, factor: f64) -> Self {
        for sample in &mut self.samples {
            sample.value *= factor;
        }
        self
    }
}

/// Which series the plot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    /// Raw phase with a regression trend line
    #[default]
    Phase,
    /// Differenced frequency with an average line
    #[serde(alias = "freq")]
    Frequency,
}

impl PlotMode {
    /// Series kind plotted in this mode
    pub fn series_kind(&self) -> SeriesKind {
        match self {
            PlotMode::Phase => SeriesKind::Phase,
            PlotMode::Frequency => SeriesKind::Frequency,
        }
    }
}

/// Downsampling stride requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum AveragingFactor {
    /// Choose the smallest stride that keeps the output under the cap
    #[default]
    Auto,
    /// Use exactly this stride; the output is not capped
    Manual(NonZeroUsize),
}

impl AveragingFactor {
    /// Interpret a raw integer: 0 means automatic
    pub fn from_raw(raw: u32) -> Self {
        match NonZeroUsize::new(raw as usize) {
            Some(af) => AveragingFactor::Manual(af),
            None => AveragingFactor::Auto,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, AveragingFactor::Auto)
    }
}

impl From<u32> for AveragingFactor {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<AveragingFactor> for u32 {
    fn from(af: AveragingFactor) -> Self {
        match af {
            AveragingFactor::Auto => 0,
            AveragingFactor::Manual(n) => u32::try_from(n.get()).unwrap_or(u32::MAX),
        }
    }
}

/// Inputs to one reduction, fixed for the whole invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionParameters {
    /// Number of raw samples delivered by the source
    pub raw_count: usize,
    /// Maximum number of samples kept in automatic mode
    pub cap: NonZeroUsize,
    /// Requested stride
    pub averaging_factor: AveragingFactor,
    /// Measurement interval of the raw samples in seconds
    pub nominal_tau: f64,
}

impl ReductionParameters {
    /// Validate and bundle reduction inputs
    pub fn new(
        raw_count: usize,
        cap: usize,
        averaging_factor: AveragingFactor,
        nominal_tau: f64,
    ) -> Result<Self> {
        let cap = NonZeroUsize::new(cap).ok_or_else(|| {
            Error::InvalidParameter("Downsampling cap must be at least 1".to_string())
        })?;
        if !(nominal_tau.is_finite() && nominal_tau > 0.0) {
            return Err(Error::invalid_tau(nominal_tau));
        }
        Ok(Self {
            raw_count,
            cap,
            averaging_factor,
            nominal_tau,
        })
    }
}

/// Engineering unit chosen for an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Picoseconds,
    Nanoseconds,
    Microseconds,
    Milliseconds,
    PartsPer1e15,
    PartsPer1e12,
    PartsPer1e9,
    PartsPer1e6,
}

impl Unit {
    /// Axis annotation for this unit
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Picoseconds => "ps",
            Unit::Nanoseconds => "ns",
            Unit::Microseconds => "us",
            Unit::Milliseconds => "ms",
            Unit::PartsPer1e15 => "pp10^15",
            Unit::PartsPer1e12 => "pp10^12",
            Unit::PartsPer1e9 => "pp10^9",
            Unit::PartsPer1e6 => "pp10^6",
        }
    }

    /// Multiplier taking SI values into this unit
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Picoseconds => 1.0e12,
            Unit::Nanoseconds => 1.0e9,
            Unit::Microseconds => 1.0e6,
            Unit::Milliseconds => 1.0e3,
            Unit::PartsPer1e15 => 1.0e15,
            Unit::PartsPer1e12 => 1.0e12,
            Unit::PartsPer1e9 => 1.0e9,
            Unit::PartsPer1e6 => 1.0e6,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit and multiplier picked for one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub unit: Unit,
    pub factor: f64,
}

impl From<Unit> for ScaleFactor {
    fn from(unit: Unit) -> Self {
        Self {
            unit,
            factor: unit.factor(),
        }
    }
}

/// Two-point auxiliary line drawn over the data (trend or average)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLine {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl OverlayLine {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    /// Constant line from `x0` to `x1` at height `y`
    pub fn horizontal(x0: f64, x1: f64, y: f64) -> Self {
        Self::new((x0, y), (x1, y))
    }

    /// Same line with both y values multiplied by `factor`
    pub fn rescaled(self, factor: f64) -> Self {
        Self {
            start: (self.start.0, self.start.1 * factor),
            end: (self.end.0, self.end.1 * factor),
        }
    }

    pub fn points(&self) -> [(f64, f64); 2] {
        [self.start, self.end]
    }

    /// Change in y from start to end
    pub fn rise(&self) -> f64 {
        self.end.1 - self.start.1
    }
}
