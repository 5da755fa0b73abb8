//! Time-tagged phase file
//!
//! The reduced phase series is written as `timetag value` lines, timetag in
//! MJD, for pickup by offline analysis tools.

use crate::mjd::SECONDS_PER_DAY;
use picomon_core::{Error, Result, Series, SeriesKind};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Writes a phase series into a fixed file inside a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseFileWriter {
    folder: PathBuf,
    filename: String,
}

impl PhaseFileWriter {
    pub fn new(folder: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }

    /// Fail with `PersistenceDenied` unless the folder exists and is writable
    pub fn check_writable(&self) -> Result<()> {
        let denied = |why: &str| {
            Error::PersistenceDenied(format!("{}: {why}", self.folder.display()))
        };
        let meta = fs::metadata(&self.folder).map_err(|_| denied("folder not found"))?;
        if !meta.is_dir() {
            return Err(denied("not a directory"));
        }
        if meta.permissions().readonly() {
            return Err(denied("no write permission"));
        }
        Ok(())
    }

    /// Write `phase` with time tags `first_epoch + i * tau / 86400`
    ///
    /// One line per sample, values as stored (seconds, not display units).
    /// Returns the number of lines written.
    #[instrument(skip(self, phase), fields(folder = %self.folder.display(), points = phase.len()))]
    pub fn write(&self, phase: &Series, first_epoch: f64) -> Result<usize> {
        phase.require_kind(SeriesKind::Phase)?;
        self.check_writable()?;

        let file = File::create(self.path()).map_err(|e| self.create_error(e))?;
        let mut out = BufWriter::new(file);
        let step = phase.tau() / SECONDS_PER_DAY;
        for (i, value) in phase.values().enumerate() {
            writeln!(out, "{} {:e}", first_epoch + i as f64 * step, value)?;
        }
        out.flush()?;

        debug!(lines = phase.len(), "phase file written");
        Ok(phase.len())
    }

    /// File-creation failure, permission errors reported as `PersistenceDenied`
    fn create_error(&self, err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                Error::PersistenceDenied(format!("{}: {err}", self.path().display()))
            }
            _ => Error::Io(err),
        }
    }
}
