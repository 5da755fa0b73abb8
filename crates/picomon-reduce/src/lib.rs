//! # Phase-data reduction
//!
//! Bounding and converting raw phase readings before analysis:
//!
//! - [`downsample`]: stride decimation to a size cap, returning the
//!   effective averaging factor and tau alongside the thinned series
//! - [`phase_to_frequency`]: first-difference fractional frequency
//!
//! ```rust
//! use picomon_core::{AveragingFactor, ReductionParameters};
//! use picomon_reduce::{downsample, phase_to_frequency};
//!
//! let raw: Vec<f64> = (0..12_000).map(|i| i as f64 * 1e-9).collect();
//! let params = ReductionParameters::new(raw.len(), 5000, AveragingFactor::Auto, 1.0).unwrap();
//! let reduced = downsample(&raw, &params).unwrap();
//! assert_eq!(reduced.effective_af, 3);
//!
//! let freq = phase_to_frequency(&reduced.series).unwrap();
//! assert_eq!(freq.len(), 3999);
//! // 3e-9 s between kept readings over the 3 s effective tau
//! assert!(freq.values().all(|y| (y - 1e-9).abs() < 1e-18));
//! ```

pub mod difference;
pub mod downsample;

pub use difference::phase_to_frequency;
pub use downsample::{downsample, effective_factor, Decimation};
