//! Stride downsampling of raw phase readings
//!
//! Long runs are thinned to keep plots bounded. Every `af`-th reading is
//! kept starting with the first; nothing is averaged. The interval between
//! kept readings becomes `nominal_tau * af`, and that effective tau is
//! returned so later stages never have to re-derive it.

use picomon_core::{AveragingFactor, Error, ReductionParameters, Result, Series};
use tracing::{debug, instrument};

/// Output of the downsampler
#[derive(Debug, Clone, PartialEq)]
pub struct Decimation {
    /// Kept readings, renumbered from 1, carrying `effective_tau`
    pub series: Series,
    /// Stride actually applied
    pub effective_af: usize,
    /// `nominal_tau * effective_af`
    pub effective_tau: f64,
}

impl Decimation {
    /// Whether any readings were dropped
    pub fn is_reduced(&self) -> bool {
        self.effective_af > 1
    }
}

/// Stride that will be applied for these parameters
///
/// Auto mode picks `ceil(raw_count / cap)`, never less than 1.
pub fn effective_factor(params: &ReductionParameters) -> usize {
    match params.averaging_factor {
        AveragingFactor::Manual(af) => af.get(),
        AveragingFactor::Auto => params.raw_count.div_ceil(params.cap.get()).max(1),
    }
}

/// Thin `raw` into a phase series
///
/// `params.raw_count` must equal `raw.len()`.
#[instrument(skip(raw), fields(raw_count = raw.len()))]
pub fn downsample(raw: &[f64], params: &ReductionParameters) -> Result<Decimation> {
    if params.raw_count != raw.len() {
        return Err(Error::InvalidInput(format!(
            "Parameters built for {} readings, got {}",
            params.raw_count,
            raw.len()
        )));
    }
    let effective_af = effective_factor(params);
    let effective_tau = params.nominal_tau * effective_af as f64;

    let series = Series::phase(effective_tau, raw.iter().copied().step_by(effective_af));

    debug!(
        cap = params.cap.get(),
        auto = params.averaging_factor.is_auto(),
        effective_af,
        effective_tau,
        kept = series.len(),
        "downsampled phase readings"
    );

    Ok(Decimation {
        series,
        effective_af,
        effective_tau,
    })
}
