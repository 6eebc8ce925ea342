//! Clock times and weekly availability windows.
//!
//! # Time Model
//! Times are wall-clock minutes since midnight, written `"HH:MM"` at the
//! edges of the crate. A window is the half-open interval [start, end) on
//! a named day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

/// Error returned when a string is not a valid `"HH:MM"` time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClockTimeError(pub String);

impl fmt::Display for ParseClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid clock time '{}', expected HH:MM", self.0)
    }
}

impl std::error::Error for ParseClockTimeError {}

impl ClockTime {
    /// Creates a time from hours and minutes.
    pub fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Returns this time shifted forward by `minutes`.
    #[inline]
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0 + minutes)
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockTimeError(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(err)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(err());
        }
        let hours: u32 = h.parse().map_err(|_| err())?;
        let minutes: u32 = m.parse().map_err(|_| err())?;
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(err());
        }
        Ok(Self::from_hm(hours, minutes))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A weekly availability window: [start, end) on `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    /// Day name (matched case-insensitively).
    pub day: String,
    /// Window start (inclusive).
    pub start_time: ClockTime,
    /// Window end (exclusive).
    pub end_time: ClockTime,
}

impl AvailabilityWindow {
    /// Creates a new window.
    pub fn new(day: impl Into<String>, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            day: day.into(),
            start_time,
            end_time,
        }
    }

    /// Whether the period [start, end) on `day` lies entirely inside this window.
    pub fn covers(&self, day: &str, start: ClockTime, end: ClockTime) -> bool {
        self.day.eq_ignore_ascii_case(day) && start >= self.start_time && end <= self.end_time
    }
}
