//! One reduction of one run, from stored readings to an assembled plot

use crate::config::PipelineConfig;
use picomon_core::{AveragingFactor, DeviceId, Error, PlotMode, ReductionParameters, Result, Series};
use picomon_plot::{assemble, PlotRenderer, PlotSpec, ScaledSeries};
use picomon_reduce::{downsample, phase_to_frequency, Decimation};
use picomon_source::SampleSource;
use picomon_stability::StabilitySummary;
use tracing::{debug, info, instrument, warn};

/// Notice shown when the source has nothing after the begin MJD
pub const NO_DATA: &str = "No Data";

/// What the caller asks to see
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRequest {
    pub device: DeviceId,
    /// Readings strictly after this MJD are used
    pub begin_mjd: f64,
    /// Nominal measurement interval, seconds
    pub tau: f64,
    /// Stride as supplied; 0 selects it automatically
    pub averaging_factor: u32,
    pub mode: PlotMode,
}

impl PlotRequest {
    pub fn new(
        device: DeviceId,
        begin_mjd: f64,
        tau: f64,
        averaging_factor: u32,
        mode: PlotMode,
    ) -> Self {
        Self {
            device,
            begin_mjd,
            tau,
            averaging_factor,
            mode,
        }
    }
}

/// Batch reduction driven by a fixed [`PipelineConfig`]
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reduce and assemble, turning any failure into a notice plot
    pub fn run<S>(&self, source: &S, request: &PlotRequest) -> PlotSpec
    where
        S: SampleSource + ?Sized,
    {
        match self.try_run(source, request) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(device = %request.device, error = %e, "plot replaced by notice");
                PlotSpec::notice(notice_text(&e))
            }
        }
    }

    /// Reduce and assemble, surfacing the first error
    #[instrument(
        skip(self, source, request),
        fields(device = %request.device, mode = ?request.mode)
    )]
    pub fn try_run<S>(&self, source: &S, request: &PlotRequest) -> Result<PlotSpec>
    where
        S: SampleSource + ?Sized,
    {
        let raw = source.phase_samples(&request.device, request.begin_mjd)?;
        if raw.is_empty() {
            return Err(Error::SourceUnavailable(NO_DATA.to_string()));
        }

        let params = ReductionParameters::new(
            raw.len(),
            self.config.downsample_cap,
            AveragingFactor::from_raw(request.averaging_factor),
            request.tau,
        )?;
        let reduced = downsample(&raw, &params)?;

        if self.config.persist.is_some() {
            if let Err(e) = self.persist(source, request, &reduced) {
                warn!(error = %e, "phase file not written");
            }
        }

        let phase = &reduced.series;
        let frequency = match request.mode {
            PlotMode::Phase => None,
            PlotMode::Frequency => Some(phase_to_frequency(phase)?),
        };
        let summary = StabilitySummary::for_mode(request.mode, phase, frequency.as_ref())?;

        let plotted: Series = frequency.unwrap_or_else(|| reduced.series.clone());
        let scaled = ScaledSeries::scale(plotted, summary.overlay)?;

        let spec = assemble(
            &request.device,
            &scaled,
            &summary,
            reduced.effective_af,
            &self.config.plot_settings(),
        );
        info!(
            points = spec.points.len(),
            effective_af = reduced.effective_af,
            unit = ?spec.unit,
            "plot assembled"
        );
        Ok(spec)
    }

    /// Write the reduced phase series to the configured target
    ///
    /// Time tags start at the first stored epoch, or at the begin MJD when the
    /// source cannot say.
    pub fn persist<S>(
        &self,
        source: &S,
        request: &PlotRequest,
        reduced: &Decimation,
    ) -> Result<usize>
    where
        S: SampleSource + ?Sized,
    {
        let Some(target) = &self.config.persist else {
            return Ok(0);
        };
        let writer = target.writer();
        writer.check_writable()?;

        let first = source
            .first_epoch_after(&request.device, request.begin_mjd)?
            .unwrap_or(request.begin_mjd);
        let lines = writer.write(&reduced.series, first)?;
        debug!(lines, path = %writer.path().display(), "reduced phase persisted");
        Ok(lines)
    }

    /// Run and hand the result to a renderer
    pub fn render<S, R>(&self, source: &S, request: &PlotRequest, renderer: &R) -> Result<PlotSpec>
    where
        S: SampleSource + ?Sized,
        R: PlotRenderer + ?Sized,
    {
        let spec = self.run(source, request);
        renderer.render(&spec)?;
        Ok(spec)
    }

    /// SVG renderer sized by the configuration
    #[cfg(feature = "svg")]
    pub fn svg_renderer(&self, path: impl Into<std::path::PathBuf>) -> picomon_plot::SvgRenderer {
        picomon_plot::SvgRenderer::new(path, self.config.width, self.config.height)
    }
}

/// Plot title used in place of data for an error
pub fn notice_text(error: &Error) -> String {
    match error {
        Error::SourceUnavailable(msg) if msg == NO_DATA => NO_DATA.to_string(),
        Error::SourceUnavailable(msg) => format!("Query failed: {msg}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picomon_source::MemorySource;

    struct FailingSource;

    impl SampleSource for FailingSource {
        fn phase_samples(&self, _: &DeviceId, _: f64) -> Result<Vec<f64>> {
            Err(Error::SourceUnavailable("connection refused".to_string()))
        }

        fn first_epoch_after(&self, _: &DeviceId, _: f64) -> Result<Option<f64>> {
            Ok(None)
        }

        fn measurement_run(&self, _: &DeviceId) -> Result<Option<picomon_source::MeasurementRun>> {
            Ok(None)
        }

        fn active_devices(&self) -> Result<Vec<DeviceId>> {
            Ok(Vec::new())
        }
    }

    fn request(mode: PlotMode) -> PlotRequest {
        PlotRequest::new(DeviceId::from_code(110).unwrap(), 57000.0, 1.0, 1, mode)
    }

    #[test]
    fn test_notice_texts() {
        assert_eq!(
            notice_text(&Error::SourceUnavailable(NO_DATA.to_string())),
            "No Data"
        );
        assert_eq!(
            notice_text(&Error::SourceUnavailable("timeout".to_string())),
            "Query failed: timeout"
        );
    }

    #[test]
    fn test_query_failure_becomes_notice() {
        let spec = Pipeline::default().run(&FailingSource, &request(PlotMode::Phase));
        assert!(spec.is_notice());
        assert_eq!(spec.title, "Query failed: connection refused");
    }

    #[test]
    fn test_empty_source_is_no_data() {
        let spec = Pipeline::default().run(&MemorySource::new(), &request(PlotMode::Phase));
        assert_eq!(spec.title, NO_DATA);
    }

    #[test]
    fn test_single_sample_frequency_plot_is_notice() {
        let device = DeviceId::from_code(110).unwrap();
        let source = MemorySource::new().with_phase_run(&device, 57000.0, 1.0, vec![1.0e-9]);
        let spec = Pipeline::default().run(&source, &request(PlotMode::Frequency));
        assert!(spec.is_notice());

        let spec = Pipeline::default().run(&source, &request(PlotMode::Phase));
        assert!(!spec.is_notice());
        assert_eq!(spec.points.len(), 1);
        assert!(spec.legend.is_empty());
    }

    #[test]
    fn test_invalid_tau_is_notice() {
        let device = DeviceId::from_code(110).unwrap();
        let source = MemorySource::new().with_phase_run(&device, 57000.0, 1.0, vec![1.0, 2.0]);
        let mut req = request(PlotMode::Phase);
        req.tau = 0.0;
        let spec = Pipeline::default().run(&source, &req);
        assert!(spec.is_notice());
        assert!(spec.title.contains("Tau"));
    }
}
