//! Measurement module identities
//!
//! The measurement table keys rows by a signed integer code. Positive codes
//! are PicoPak serial numbers. Negative codes are PicoScan channels, stored
//! as `(-4 * serial) + channel` with channel 0..=3 (A..=D).

use crate::{Error, Result};
use std::fmt;

/// A PicoPak module or one channel of a PicoScan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId {
    code: i32,
    serial: u32,
    channel: Option<char>,
}

impl DeviceId {
    /// Decode a database code
    pub fn from_code(code: i32) -> Result<Self> {
        if code > 0 {
            return Ok(Self {
                code,
                serial: code as u32,
                channel: None,
            });
        }
        if code == 0 {
            return Err(Error::InvalidParameter(
                "device code 0 does not name a module".to_string(),
            ));
        }

        // ceil(-code / 4) for a positive dividend
        let magnitude = code.unsigned_abs();
        let serial = magnitude.div_ceil(4);
        let channel_number = (serial * 4) - magnitude;
        let channel = match channel_number {
            0 => 'A',
            1 => 'B',
            2 => 'C',
            _ => 'D',
        };

        Ok(Self {
            code,
            serial,
            channel: Some(channel),
        })
    }

    /// The signed code used as the row key
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// PicoScan channel letter, `None` for a PicoPak
    pub fn channel(&self) -> Option<char> {
        self.channel
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Some(ch) => write!(f, "{}{}", self.serial, ch),
            None => write!(f, "{}", self.serial),
        }
    }
}
