//! Engineering-unit auto-scaling
//!
//! One power-of-ten factor is chosen per series from its dynamic range and
//! applied to the series and its overlay line together. The smallest unit
//! whose threshold the range falls under wins:
//!
//! | Phase range | Unit | Frequency range | Unit |
//! |---|---|---|---|
//! | < 1e-9 | ps | < 1e-12 | pp10^15 |
//! | < 1e-6 | ns | < 1e-9 | pp10^12 |
//! | < 1e-3 | us | < 1e-6 | pp10^9 |
//! | otherwise | ms | otherwise | pp10^6 |

use picomon_core::{Error, OverlayLine, Result, ScaleFactor, Series, SeriesKind, Unit};
use tracing::debug;

const PHASE_LADDER: [(f64, Unit); 3] = [
    (1.0e-9, Unit::Picoseconds),
    (1.0e-6, Unit::Nanoseconds),
    (1.0e-3, Unit::Microseconds),
];

const FREQUENCY_LADDER: [(f64, Unit); 3] = [
    (1.0e-12, Unit::PartsPer1e15),
    (1.0e-9, Unit::PartsPer1e12),
    (1.0e-6, Unit::PartsPer1e9),
];

/// Range used to pick a unit: `max - min`, or the first value when flat
///
/// Returns `None` for an empty slice.
pub fn reference_range(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let (min, max) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    Some(if range == 0.0 { first } else { range })
}

/// Unit for a series kind and reference range
pub fn unit_for_range(kind: SeriesKind, range: f64) -> Unit {
    let (ladder, fallback) = match kind {
        SeriesKind::Phase => (&PHASE_LADDER, Unit::Milliseconds),
        SeriesKind::Frequency => (&FREQUENCY_LADDER, Unit::PartsPer1e6),
    };
    let magnitude = range.abs();
    ladder
        .iter()
        .find(|(limit, _)| magnitude < *limit)
        .map(|&(_, unit)| unit)
        .unwrap_or(fallback)
}

/// Scale factor for a whole series
pub fn choose_scale(series: &Series) -> Result<ScaleFactor> {
    let values = series.to_values();
    let range = reference_range(&values).ok_or_else(|| Error::insufficient(1, 0))?;
    Ok(unit_for_range(series.kind(), range).into())
}

/// A series and its overlay after unit scaling
///
/// Only constructed by [`ScaledSeries::scale`], which consumes the SI-unit
/// series, so the factor is applied exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledSeries {
    series: Series,
    overlay: Option<OverlayLine>,
    scale: ScaleFactor,
}

impl ScaledSeries {
    /// Pick a factor for `series` and apply it to it and `overlay`
    pub fn scale(series: Series, overlay: Option<OverlayLine>) -> Result<Self> {
        let scale = choose_scale(&series)?;
        debug!(
            kind = %series.kind(),
            unit = scale.unit.label(),
            factor = scale.factor,
            "scaling series"
        );
        Ok(Self {
            series: series.rescaled(scale.factor),
            overlay: overlay.map(|line| line.rescaled(scale.factor)),
            scale,
        })
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn overlay(&self) -> Option<&OverlayLine> {
        self.overlay.as_ref()
    }

    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale
    }

    pub fn unit(&self) -> Unit {
        self.scale.unit
    }
}
