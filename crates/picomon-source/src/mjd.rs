//! Modified Julian Date bookkeeping

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// MJD of the Unix epoch, 1970-01-01T00:00:00Z
pub const UNIX_EPOCH_MJD: f64 = 40587.0;

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// MJD for a count of seconds since the Unix epoch
pub fn mjd_from_unix(seconds: f64) -> f64 {
    UNIX_EPOCH_MJD + seconds / SECONDS_PER_DAY
}

/// MJD now, from the system clock
pub fn current_mjd() -> f64 {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    mjd_from_unix(seconds)
}

/// MJD reached after `points` samples at `tau` seconds from `begin`
pub fn run_end_mjd(begin: f64, tau: f64, points: usize) -> f64 {
    begin + tau * points as f64 / SECONDS_PER_DAY
}

/// Length of a run split into calendar-style parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSpan {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl RunSpan {
    /// Span between two MJDs, truncated to whole seconds
    ///
    /// A reversed interval gives a zero span.
    pub fn between(begin: f64, end: f64) -> Self {
        let total = ((end - begin) * SECONDS_PER_DAY).max(0.0) as u64;
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for RunSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes and {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
