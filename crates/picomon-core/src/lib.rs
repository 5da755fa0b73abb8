//! Core types for phase-data reduction
//!
//! This crate holds the data model every picomon stage passes along:
//! sample series with their sampling interval, reduction parameters,
//! engineering units, overlay lines, device identities and the shared
//! error type.
//!
//! # Example
//!
//! ```rust
//! use picomon_core::{Series, SeriesKind};
//!
//! let phase = Series::phase(1.0, vec![0.0, 1.0e-9, 2.0e-9]);
//! assert_eq!(phase.len(), 3);
//! assert_eq!(phase.kind(), SeriesKind::Phase);
//! assert_eq!(phase.samples()[0].index, 1);
//! ```

pub mod device;
pub mod error;
pub mod types;

pub use device::DeviceId;
pub use error::{Error, Result};
pub use types::{
    AveragingFactor, OverlayLine, PlotMode, ReductionParameters, Sample, ScaleFactor, Series,
    SeriesKind, Unit,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
