//! Run description shown beside a plot

use picomon_core::{DeviceId, Result};
use picomon_source::{current_mjd, run_end_mjd, MeasurementRun, RunSpan, SampleSource};
use std::fmt;

/// Latest run of a device with its progress so far
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run: MeasurementRun,
    /// Readings stored since the run began
    pub points: usize,
    /// MJD implied by `points` readings at the run's tau
    pub end_mjd: f64,
    pub span: RunSpan,
    /// MJD at which the report was gathered
    pub current_mjd: f64,
}

impl RunReport {
    /// Describe the latest run of `device`, `None` when it has none
    ///
    /// The end MJD is derived from the stored count, so a run that stopped
    /// without being closed is not reported as still growing.
    pub fn gather<S>(source: &S, device: &DeviceId) -> Result<Option<Self>>
    where
        S: SampleSource + ?Sized,
    {
        Self::gather_at(source, device, current_mjd())
    }

    /// [`RunReport::gather`] with the present MJD supplied by the caller
    pub fn gather_at<S>(source: &S, device: &DeviceId, now_mjd: f64) -> Result<Option<Self>>
    where
        S: SampleSource + ?Sized,
    {
        let Some(run) = source.measurement_run(device)? else {
            return Ok(None);
        };
        let points = source.sample_count(device, run.begin_mjd)?;
        let end_mjd = run_end_mjd(run.begin_mjd, run.tau, points);
        let span = RunSpan::between(run.begin_mjd, end_mjd);
        Ok(Some(Self {
            run,
            points,
            end_mjd,
            span,
            current_mjd: now_mjd,
        }))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plot of {} points of phase data from the {} run for {} vs {} with a {} second tau \
             for PicoPak S/N {} from MJD {} to {}, a span of {} at current MJD {}",
            self.points,
            self.run.description,
            self.run.signal_clock,
            self.run.reference_clock,
            self.run.tau,
            self.run.device,
            self.run.begin_mjd,
            self.end_mjd,
            self.span,
            self.current_mjd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picomon_source::MemorySource;

    #[test]
    fn test_gather() {
        let device = DeviceId::from_code(-439).unwrap();
        let run = MeasurementRun {
            device,
            begin_mjd: 57000.0,
            tau: 3600.0,
            description: "Holdover".to_string(),
            signal_clock: "OCXO".to_string(),
            reference_clock: "GPSDO".to_string(),
        };
        let source = MemorySource::new()
            .with_run(run)
            .with_phase_run(&device, 57000.0, 3600.0, vec![0.0; 30]);

        let report = RunReport::gather_at(&source, &device, 57002.5)
            .unwrap()
            .unwrap();
        assert_eq!(report.points, 30);
        assert_eq!(report.end_mjd, 57001.25);
        assert_eq!((report.span.days, report.span.hours), (1, 6));
        assert_eq!(
            report.to_string(),
            "Plot of 30 points of phase data from the Holdover run for OCXO vs GPSDO with a \
             3600 second tau for PicoPak S/N 110B from MJD 57000 to 57001.25, a span of \
             1 days, 6 hours, 0 minutes and 0 seconds at current MJD 57002.5"
        );
    }

    #[test]
    fn test_gather_stamps_present_mjd() {
        let device = DeviceId::from_code(110).unwrap();
        let run = MeasurementRun {
            device,
            begin_mjd: 57000.0,
            tau: 1.0,
            description: "Warmup".to_string(),
            signal_clock: "Rb".to_string(),
            reference_clock: "H-maser".to_string(),
        };
        let source = MemorySource::new()
            .with_run(run)
            .with_phase_run(&device, 57000.0, 1.0, vec![0.0; 4]);

        let before = current_mjd();
        let report = RunReport::gather(&source, &device).unwrap().unwrap();
        assert!(report.current_mjd >= before);
        assert!(report.current_mjd <= current_mjd());
        let text = report.to_string();
        assert!(text.ends_with(&format!("at current MJD {}", report.current_mjd)));
    }

    #[test]
    fn test_no_run() {
        let device = DeviceId::from_code(110).unwrap();
        assert!(RunReport::gather(&MemorySource::new(), &device)
            .unwrap()
            .is_none());
    }
}
