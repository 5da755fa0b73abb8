//! Chart back ends

use crate::assembly::{PlotSpec, PlotStyle};
use picomon_core::Result;
use std::ops::Range;
use tracing::trace;

/// Something that can draw an assembled plot
pub trait PlotRenderer {
    fn render(&self, spec: &PlotSpec) -> Result<()>;
}

/// Discards every plot
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl PlotRenderer for NullRenderer {
    fn render(&self, spec: &PlotSpec) -> Result<()> {
        trace!(title = %spec.title, points = spec.points.len(), "discarding plot");
        Ok(())
    }
}

/// Expand `(x, y)` points into a step trace
///
/// Each value is held flat until the next sample's x, then jumps.
pub fn step_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len().saturating_mul(2));
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, _) = pair[1];
        out.push((x0, y0));
        out.push((x1, y0));
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

/// Axis ranges covering the series and its overlay
///
/// A flat y span is widened so the chart still has height.
pub fn axis_ranges(spec: &PlotSpec) -> (Range<f64>, Range<f64>) {
    let overlay = spec.overlay.iter().flat_map(|line| line.iter());
    let (mut x_lo, mut x_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_lo, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in spec.points.iter().chain(overlay) {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_lo = y_lo.min(y);
        y_hi = y_hi.max(y);
    }

    if x_lo > x_hi {
        return (0.0..1.0, 0.0..1.0);
    }
    if x_hi <= x_lo {
        x_hi = x_lo + 1.0;
    }
    let pad = if y_hi > y_lo {
        (y_hi - y_lo) * 0.05
    } else {
        y_lo.abs().max(1.0) * 0.1
    };
    (x_lo..x_hi, (y_lo - pad)..(y_hi + pad))
}

/// Points to draw for the primary series in its style
pub fn trace_points(spec: &PlotSpec) -> Vec<(f64, f64)> {
    match spec.style {
        PlotStyle::Lines => spec.points.clone(),
        PlotStyle::Squared => step_points(&spec.points),
    }
}

#[cfg(feature = "svg")]
mod svg {
    use super::{axis_ranges, trace_points, PlotRenderer};
    use crate::assembly::PlotSpec;
    use crate::legend::LegendCorner;
    use anyhow::Context;
    use picomon_core::{Error, Result};
    use plotters::coord::Shift;
    use plotters::prelude::*;
    use plotters::style::{FontDesc, FontFamily, FontStyle};
    use std::path::{Path, PathBuf};
    use tracing::debug;

    /// Writes each plot to an SVG file
    #[derive(Debug, Clone)]
    pub struct SvgRenderer {
        path: PathBuf,
        width: u32,
        height: u32,
    }

    impl SvgRenderer {
        pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
            Self {
                path: path.into(),
                width,
                height,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl PlotRenderer for SvgRenderer {
        fn render(&self, spec: &PlotSpec) -> Result<()> {
            let backend = SVGBackend::new(&self.path, (self.width, self.height));
            draw_plot(backend.into_drawing_area(), spec)
                .with_context(|| format!("rendering {}", self.path.display()))
                .map_err(|e| Error::Render(format!("{e:#}")))?;
            debug!(path = %self.path.display(), title = %spec.title, "plot written");
            Ok(())
        }
    }

    fn font(size: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
    }

    /// Draw `spec` onto any plotters back end
    pub fn draw_plot<DB>(area: DrawingArea<DB, Shift>, spec: &PlotSpec) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        area.fill(&WHITE)?;

        if spec.is_notice() {
            area.titled(&spec.title, font(28.0))?;
            area.present()?;
            return Ok(());
        }

        let (x_range, y_range) = axis_ranges(spec);
        let mut chart = ChartBuilder::on(&area)
            .caption(&spec.title, font(24.0))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_label_formatter(&|v| format!("{:.0}", v))
            .label_style(font(14.0))
            .draw()?;

        chart.draw_series(LineSeries::new(trace_points(spec), &RED))?;

        if let Some(line) = spec.overlay {
            chart.draw_series(LineSeries::new(line, BLUE.stroke_width(2)))?;
        }

        if !spec.legend.is_empty() {
            // Text-only entries: an empty series per line carries the label
            for text in &spec.legend {
                chart
                    .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), &WHITE))?
                    .label(text.as_str())
                    .legend(|(x, y)| EmptyElement::at((x, y)));
            }

            let position = match spec.corner {
                LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
                LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
            };
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.4))
                .label_font(font(14.0))
                .position(position)
                .draw()?;
        }

        area.present()?;
        Ok(())
    }
}

#[cfg(feature = "svg")]
pub use svg::{draw_plot, SvgRenderer};
