//! # Monitor plot assembly
//!
//! Turns a reduced series and its statistics into a [`PlotSpec`]: title,
//! axis labels in an auto-selected engineering unit, the series itself,
//! a trend or average overlay and up to three legend lines. A
//! [`PlotRenderer`] then draws it; the `svg` feature adds a plotters back
//! end.
//!
//! ```rust
//! use picomon_core::{DeviceId, PlotMode, Series};
//! use picomon_plot::{assemble, PlotSettings, ScaledSeries};
//! use picomon_stability::StabilitySummary;
//!
//! let device = DeviceId::from_code(110).unwrap();
//! let phase = Series::phase(1.0, (0..100).map(|i| i as f64 * 2.0e-9));
//! let summary = StabilitySummary::for_mode(PlotMode::Phase, &phase, None).unwrap();
//! let scaled = ScaledSeries::scale(phase, summary.overlay).unwrap();
//! let spec = assemble(&device, &scaled, &summary, 1, &PlotSettings::default());
//! assert_eq!(spec.y_label, "Phase, ns");
//! ```

pub mod assembly;
pub mod legend;
pub mod render;
pub mod scale;

pub use assembly::{assemble, title, PlotSettings, PlotSpec, PlotStyle};
pub use legend::{choose_corner, format_scientific, LegendCorner};
pub use render::{NullRenderer, PlotRenderer};
#[cfg(feature = "svg")]
pub use render::{draw_plot, SvgRenderer};
pub use scale::{choose_scale, reference_range, unit_for_range, ScaledSeries};
