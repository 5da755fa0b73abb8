//! # Measurement store access
//!
//! Everything that touches the outside world on the way into and out of a
//! reduction: the [`SampleSource`] query trait with in-memory and CSV
//! implementations, MJD helpers and the time-tagged [`PhaseFileWriter`].

pub mod mjd;
pub mod persist;
pub mod source;

pub use mjd::{current_mjd, mjd_from_unix, run_end_mjd, RunSpan};
pub use persist::PhaseFileWriter;
pub use source::{CsvSource, MeasurementRun, MemorySource, SampleSource};
