//! Access to stored measurements
//!
//! The measurement store has three tables: raw phase readings keyed by
//! device code and MJD, one row per measurement run, and the list of
//! installed modules with an active flag. [`SampleSource`] is the query
//! surface the pipeline needs; [`MemorySource`] and [`CsvSource`] implement
//! it over in-memory rows and CSV exports of those tables.

use picomon_core::{DeviceId, Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// File names [`CsvSource::open_dir`] expects
pub const MEASUREMENTS_FILE: &str = "measurements.csv";
pub const RUNS_FILE: &str = "measurement_runs.csv";
pub const MODULES_FILE: &str = "measurement_modules.csv";

/// Metadata of one measurement run
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRun {
    pub device: DeviceId,
    /// MJD the run started
    pub begin_mjd: f64,
    /// Nominal measurement interval in seconds
    pub tau: f64,
    pub description: String,
    /// Clock under test
    pub signal_clock: String,
    pub reference_clock: String,
}

/// Query surface over the measurement store
pub trait SampleSource {
    /// Phase readings for `device` strictly after `after_mjd`, in epoch order
    fn phase_samples(&self, device: &DeviceId, after_mjd: f64) -> Result<Vec<f64>>;

    /// Number of readings for `device` after `after_mjd`
    fn sample_count(&self, device: &DeviceId, after_mjd: f64) -> Result<usize> {
        Ok(self.phase_samples(device, after_mjd)?.len())
    }

    /// MJD of the first reading for `device` after `after_mjd`
    fn first_epoch_after(&self, device: &DeviceId, after_mjd: f64) -> Result<Option<f64>>;

    /// Latest run recorded for `device`
    fn measurement_run(&self, device: &DeviceId) -> Result<Option<MeasurementRun>>;

    /// Modules and channels flagged active
    fn active_devices(&self) -> Result<Vec<DeviceId>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct MeasurementRow {
    sn: i32,
    mjd: f64,
    meas: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RunRow {
    sn: i32,
    begin_mjd: f64,
    tau: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    sig_name: String,
    #[serde(default)]
    ref_name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ModuleRow {
    sn: i32,
    #[serde(default)]
    active: bool,
}

/// Store held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    readings: Vec<MeasurementRow>,
    runs: Vec<MeasurementRun>,
    modules: Vec<(DeviceId, bool)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `(mjd, value)` readings for a device
    pub fn with_readings<I>(mut self, device: &DeviceId, readings: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let sn = device.code();
        self.readings.extend(
            readings
                .into_iter()
                .map(|(mjd, meas)| MeasurementRow { sn, mjd, meas }),
        );
        self
    }

    /// Add readings spaced `tau` seconds apart starting after `begin_mjd`
    ///
    /// The first reading lands one interval after `begin_mjd`.
    pub fn with_phase_run<I>(self, device: &DeviceId, begin_mjd: f64, tau: f64, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let step = tau / crate::mjd::SECONDS_PER_DAY;
        self.with_readings(
            device,
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (begin_mjd + step * (i + 1) as f64, v)),
        )
    }

    pub fn with_run(mut self, run: MeasurementRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_module(mut self, device: DeviceId, active: bool) -> Self {
        self.modules.push((device, active));
        self
    }

    fn readings_after(&self, device: &DeviceId, after_mjd: f64) -> Vec<MeasurementRow> {
        let mut rows: Vec<MeasurementRow> = self
            .readings
            .iter()
            .filter(|r| r.sn == device.code() && r.mjd > after_mjd)
            .copied()
            .collect();
        rows.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        rows
    }
}

impl SampleSource for MemorySource {
    #[instrument(skip(self, device), fields(device = %device))]
    fn phase_samples(&self, device: &DeviceId, after_mjd: f64) -> Result<Vec<f64>> {
        let values: Vec<f64> = self
            .readings_after(device, after_mjd)
            .into_iter()
            .map(|r| r.meas)
            .collect();
        debug!(count = values.len(), "phase samples selected");
        Ok(values)
    }

    fn first_epoch_after(&self, device: &DeviceId, after_mjd: f64) -> Result<Option<f64>> {
        Ok(self
            .readings
            .iter()
            .filter(|r| r.sn == device.code() && r.mjd > after_mjd)
            .map(|r| r.mjd)
            .min_by(f64::total_cmp))
    }

    fn measurement_run(&self, device: &DeviceId) -> Result<Option<MeasurementRun>> {
        Ok(self
            .runs
            .iter()
            .filter(|run| run.device == *device)
            .max_by(|a, b| a.begin_mjd.total_cmp(&b.begin_mjd))
            .cloned())
    }

    fn active_devices(&self) -> Result<Vec<DeviceId>> {
        Ok(self
            .modules
            .iter()
            .filter(|(_, active)| *active)
            .map(|(device, _)| *device)
            .collect())
    }
}

/// Store loaded from CSV exports of the measurement tables
///
/// Expected headers:
///
/// - readings: `sn,mjd,meas`
/// - runs: `sn,begin_mjd,tau,description,sig_name,ref_name`
/// - modules: `sn,active`
#[derive(Debug, Clone, Default)]
pub struct CsvSource {
    inner: MemorySource,
}

fn read_rows<T, R>(reader: R, table: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|e| Error::SourceUnavailable(format!("{table}: {e}")))
}

fn open_table(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| Error::SourceUnavailable(format!("{}: {e}", path.display())))
}

impl CsvSource {
    /// Load the three tables from readers
    pub fn from_readers<A, B, C>(readings: A, runs: B, modules: C) -> Result<Self>
    where
        A: Read,
        B: Read,
        C: Read,
    {
        let readings: Vec<MeasurementRow> = read_rows(readings, "measurements")?;
        let runs = read_rows::<RunRow, _>(runs, "measurement runs")?
            .into_iter()
            .map(|row| {
                Ok(MeasurementRun {
                    device: DeviceId::from_code(row.sn)?,
                    begin_mjd: row.begin_mjd,
                    tau: row.tau,
                    description: row.description,
                    signal_clock: row.sig_name,
                    reference_clock: row.ref_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let modules = read_rows::<ModuleRow, _>(modules, "measurement modules")?
            .into_iter()
            .map(|row| Ok((DeviceId::from_code(row.sn)?, row.active)))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            readings = readings.len(),
            runs = runs.len(),
            modules = modules.len(),
            "loaded measurement tables"
        );

        Ok(Self {
            inner: MemorySource {
                readings,
                runs,
                modules,
            },
        })
    }

    /// Load the tables from one directory
    ///
    /// A missing modules file means no module is flagged active.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let readings = open_table(&dir.join(MEASUREMENTS_FILE))?;
        let runs = open_table(&dir.join(RUNS_FILE))?;
        let modules_path = dir.join(MODULES_FILE);
        if modules_path.exists() {
            Self::from_readers(readings, runs, open_table(&modules_path)?)
        } else {
            Self::from_readers(readings, runs, "sn,active\n".as_bytes())
        }
    }
}

impl SampleSource for CsvSource {
    fn phase_samples(&self, device: &DeviceId, after_mjd: f64) -> Result<Vec<f64>> {
        self.inner.phase_samples(device, after_mjd)
    }

    fn first_epoch_after(&self, device: &DeviceId, after_mjd: f64) -> Result<Option<f64>> {
        self.inner.first_epoch_after(device, after_mjd)
    }

    fn measurement_run(&self, device: &DeviceId) -> Result<Option<MeasurementRun>> {
        self.inner.measurement_run(device)
    }

    fn active_devices(&self) -> Result<Vec<DeviceId>> {
        self.inner.active_devices()
    }
}
