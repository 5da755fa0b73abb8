//! Legend text and placement

use picomon_stability::fit_indexed;

/// Corner of the plot area holding the legend box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendCorner {
    #[default]
    UpperRight,
    LowerRight,
}

impl LegendCorner {
    /// The corner across the horizontal midline
    pub fn flipped(self) -> Self {
        match self {
            LegendCorner::UpperRight => LegendCorner::LowerRight,
            LegendCorner::LowerRight => LegendCorner::UpperRight,
        }
    }
}

/// Printf-style `%10.3e`
pub fn format_scientific(value: f64) -> String {
    format!("{value:10.3e}")
}

pub fn frequency_line(value: f64) -> String {
    format!("Freq = {}", format_scientific(value))
}

pub fn stability_line(value: f64) -> String {
    format!("ADEV = {}", format_scientific(value))
}

pub fn averaging_line(af: usize) -> String {
    format!("AF = {af}")
}

/// Pick the legend corner for already-scaled values
///
/// The series climbs toward the upper right when its least-squares rise
/// from first to last sample exceeds `multiple` times the standard
/// deviation of the values about that line. Then the legend moves down.
pub fn choose_corner(values: &[f64], multiple: f64) -> LegendCorner {
    let default = LegendCorner::default();
    let Some((slope, intercept)) = fit_indexed(values) else {
        return default;
    };

    let n = values.len() as f64;
    let rise = slope * (n - 1.0);
    let residual_ss: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &y)| {
            let r = y - (intercept + slope * (i + 1) as f64);
            r * r
        })
        .sum();
    let deviation = (residual_ss / n).sqrt();

    if rise > multiple * deviation {
        default.flipped()
    } else {
        default
    }
}
