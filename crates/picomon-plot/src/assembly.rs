//! Composition of everything the chart back end draws

use crate::legend::{self, LegendCorner};
use crate::scale::ScaledSeries;
use picomon_core::{DeviceId, PlotMode, Unit};
use picomon_stability::StabilitySummary;
use tracing::debug;

/// How the primary series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    /// Straight segments between samples
    #[default]
    Lines,
    /// Steps holding each value until the next sample
    Squared,
}

/// Presentation switches for plot assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSettings {
    /// Show the frequency-offset legend line
    pub show_frequency: bool,
    /// Show the Allan-deviation legend line
    pub show_stability: bool,
    /// Rise, in residual deviations, that moves the legend away
    pub legend_flip_multiple: f64,
    /// Frequency plots with fewer points than this are drawn squared
    pub squared_below: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            show_frequency: true,
            show_stability: true,
            legend_flip_multiple: 3.0,
            squared_below: 1000,
        }
    }
}

/// A fully assembled plot, all values already in display units
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Unit of the y values; `None` for a notice
    pub unit: Option<Unit>,
    /// Primary series as (index, value)
    pub points: Vec<(f64, f64)>,
    /// Trend or average line
    pub overlay: Option<[(f64, f64); 2]>,
    /// At most three lines
    pub legend: Vec<String>,
    pub corner: LegendCorner,
    pub style: PlotStyle,
}

impl PlotSpec {
    /// A plot carrying only a message in its title
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            title: message.into(),
            x_label: String::new(),
            y_label: String::new(),
            unit: None,
            points: Vec::new(),
            overlay: None,
            legend: Vec::new(),
            corner: LegendCorner::default(),
            style: PlotStyle::default(),
        }
    }

    /// Whether this plot is a message in place of data
    pub fn is_notice(&self) -> bool {
        self.points.is_empty()
    }
}

/// Plot title for a device and mode
pub fn title(device: &DeviceId, mode: PlotMode) -> String {
    match mode {
        PlotMode::Phase => format!("PicoPak S/N {device} Phase Data"),
        PlotMode::Frequency => format!("PicoPak S/N {device} Frequency Data"),
    }
}

/// Build the plot for a scaled series and its statistics
pub fn assemble(
    device: &DeviceId,
    scaled: &ScaledSeries,
    summary: &StabilitySummary,
    effective_af: usize,
    settings: &PlotSettings,
) -> PlotSpec {
    let mode = summary.mode;
    let unit = scaled.unit();
    let series = scaled.series();

    let y_label = match mode {
        PlotMode::Phase => format!("Phase, {unit}"),
        PlotMode::Frequency => format!("Frequency, {unit}"),
    };

    let mut legend = Vec::with_capacity(3);
    if settings.show_frequency {
        if let Some(freq) = summary.frequency_estimate() {
            legend.push(legend::frequency_line(freq));
        }
    }
    if settings.show_stability {
        if let Some(adev) = summary.allan_deviation {
            legend.push(legend::stability_line(adev));
        }
    }
    if effective_af > 1 {
        legend.push(legend::averaging_line(effective_af));
    }

    let style = match mode {
        PlotMode::Frequency if series.len() < settings.squared_below => PlotStyle::Squared,
        _ => PlotStyle::Lines,
    };

    let corner = legend::choose_corner(&series.to_values(), settings.legend_flip_multiple);

    debug!(
        points = series.len(),
        unit = unit.label(),
        legend_lines = legend.len(),
        ?corner,
        ?style,
        "assembled plot"
    );

    PlotSpec {
        title: title(device, mode),
        x_label: "Data Point".to_string(),
        y_label,
        unit: Some(unit),
        points: series.points(),
        overlay: scaled.overlay().map(|line| line.points()),
        legend,
        corner,
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picomon_core::{Series, Unit};

    fn device() -> DeviceId {
        DeviceId::from_code(-439).unwrap()
    }

    #[test]
    fn test_phase_plot() {
        let phase = Series::phase(1.0, (0..10).map(|i| i as f64 * 1.0e-8));
        let summary = StabilitySummary::for_mode(PlotMode::Phase, &phase, None).unwrap();
        let scaled = ScaledSeries::scale(phase, summary.overlay).unwrap();
        let spec = assemble(&device(), &scaled, &summary, 1, &PlotSettings::default());

        assert_eq!(spec.title, "PicoPak S/N 110B Phase Data");
        assert_eq!(spec.x_label, "Data Point");
        assert_eq!(spec.y_label, "Phase, ns");
        assert_eq!(spec.unit, Some(Unit::Nanoseconds));
        assert_eq!(spec.points.len(), 10);
        assert_eq!(spec.legend.len(), 2);
        assert!(spec.legend[0].starts_with("Freq ="));
        assert!(spec.legend[1].starts_with("ADEV ="));
        assert_eq!(spec.style, PlotStyle::Lines);
        // Clean ramp climbs into the default corner
        assert_eq!(spec.corner, LegendCorner::LowerRight);
        let overlay = spec.overlay.unwrap();
        assert_eq!(overlay[0].0, 1.0);
        assert_eq!(overlay[1].0, 10.0);
        assert!(!spec.is_notice());
    }

    #[test]
    fn test_frequency_plot_is_squared_and_reports_af() {
        let phase = Series::phase(3.0, (0..20).map(|i| (i as f64).sin() * 1.0e-9));
        let freq = picomon_core::Series::frequency(
            3.0,
            phase
                .samples()
                .windows(2)
                .map(|w| (w[1].value - w[0].value) / 3.0),
        );
        let summary = StabilitySummary::for_mode(PlotMode::Frequency, &phase, Some(&freq)).unwrap();
        let scaled = ScaledSeries::scale(freq, summary.overlay).unwrap();
        let spec = assemble(&device(), &scaled, &summary, 3, &PlotSettings::default());

        assert_eq!(spec.title, "PicoPak S/N 110B Frequency Data");
        assert!(spec.y_label.starts_with("Frequency, pp10^"));
        assert_eq!(spec.style, PlotStyle::Squared);
        assert_eq!(spec.legend.last().map(String::as_str), Some("AF = 3"));
        assert_eq!(spec.legend.len(), 3);
    }

    #[test]
    fn test_legend_toggles() {
        let phase = Series::phase(1.0, vec![0.0, 1.0e-9, 3.0e-9, 2.0e-9]);
        let summary = StabilitySummary::for_mode(PlotMode::Phase, &phase, None).unwrap();
        let scaled = ScaledSeries::scale(phase, summary.overlay).unwrap();
        let settings = PlotSettings {
            show_frequency: false,
            show_stability: false,
            ..PlotSettings::default()
        };
        let spec = assemble(&device(), &scaled, &summary, 1, &settings);
        assert!(spec.legend.is_empty());
    }

    #[test]
    fn test_missing_adev_suppresses_legend_line() {
        let phase = Series::phase(1.0, vec![0.0, 1.0e-9]);
        let summary = StabilitySummary::for_mode(PlotMode::Phase, &phase, None).unwrap();
        let scaled = ScaledSeries::scale(phase, summary.overlay).unwrap();
        let spec = assemble(&device(), &scaled, &summary, 1, &PlotSettings::default());
        assert_eq!(spec.legend.len(), 1);
        assert!(spec.legend[0].starts_with("Freq ="));
    }

    #[test]
    fn test_notice() {
        let spec = PlotSpec::notice("No Data");
        assert!(spec.is_notice());
        assert_eq!(spec.title, "No Data");
        assert!(spec.legend.is_empty());
    }
}
