//! # picomon
//!
//! Reduction and plotting of phase data from clock-comparison runs.
//!
//! A [`Pipeline`] reads the phase readings of one run from a
//! [`SampleSource`], thins them to a size cap, derives fractional frequency
//! when asked, computes the regression trend, mean frequency and Allan
//! deviation at the effective tau, scales to engineering units and
//! assembles a [`PlotSpec`]. Failures never escape [`Pipeline::run`]; they
//! come back as a notice plot.
//!
//! ## Crates
//!
//! - [`picomon_core`]: data model, device codes, error type
//! - [`picomon_reduce`]: downsampling and differencing
//! - [`picomon_stability`]: regression, mean frequency, Allan deviation
//! - [`picomon_plot`]: unit scaling, plot assembly, rendering
//! - [`picomon_source`]: measurement store access, MJD helpers, phase file
//!
//! ## Example
//!
//! ```rust
//! use picomon::{DeviceId, MemorySource, Pipeline, PlotMode, PlotRequest};
//!
//! let device = DeviceId::from_code(-439).unwrap();
//! let source = MemorySource::new().with_phase_run(
//!     &device,
//!     57000.0,
//!     1.0,
//!     (0..100).map(|i| i as f64 * 1.0e-9),
//! );
//!
//! let request = PlotRequest::new(device, 57000.0, 1.0, 0, PlotMode::Phase);
//! let spec = Pipeline::default().run(&source, &request);
//! assert_eq!(spec.title, "PicoPak S/N 110B Phase Data");
//! assert_eq!(spec.y_label, "Phase, ns");
//! ```

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{PersistTarget, PipelineConfig};
pub use pipeline::{notice_text, Pipeline, PlotRequest, NO_DATA};
pub use report::RunReport;

pub use picomon_core::{
    AveragingFactor, DeviceId, Error, OverlayLine, PlotMode, ReductionParameters, Result, Series,
    SeriesKind, Unit,
};
pub use picomon_plot::{LegendCorner, NullRenderer, PlotRenderer, PlotSettings, PlotSpec, PlotStyle};
#[cfg(feature = "svg")]
pub use picomon_plot::SvgRenderer;
pub use picomon_source::{CsvSource, MeasurementRun, MemorySource, PhaseFileWriter, SampleSource};
pub use picomon_stability::StabilitySummary;

