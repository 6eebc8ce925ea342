//! Generation configuration.
//!
//! Loaded from TOML (or any serde format) by the data supplier. Every field
//! except the time window has a default:
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//!     start_time = "08:00"
//!     end_time = "14:00"
//!     period_duration = 1.0
//!     fill_all_periods = false
//!
//!     [[special_periods]]
//!     day = "Fri"
//!     start_time = "08:00"
//!     end_time = "09:00"
//!     type = "Assembly"
//! "#).unwrap();
//!
//! assert_eq!(config.branching_limit, 5);
//! assert_eq!(config.special_periods.len(), 1);
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{ClockTime, SpecialPeriod};

/// Default number of ranked candidates tried per slot.
pub const DEFAULT_BRANCHING_LIMIT: usize = 5;

/// Default number of times a subject may occur for a class on one day.
pub const DEFAULT_PER_DAY_SUBJECT_CAP: u32 = 1;

/// Longest accepted period, in minutes.
pub const MAX_PERIOD_MINUTES: f64 = 24.0 * 60.0;

/// Timetable generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Ordered day names.
    pub days: Vec<String>,
    /// First period start, `"HH:MM"`.
    pub start_time: String,
    /// Day end, `"HH:MM"`. Periods starting at or after it are not generated.
    pub end_time: String,
    /// Period length in hours.
    pub period_duration: f64,
    /// Non-assignable periods.
    #[serde(default)]
    pub special_periods: Vec<SpecialPeriod>,
    /// Ignore weekly subject quotas so every period can be filled.
    #[serde(default = "default_fill_all_periods")]
    pub fill_all_periods: bool,
    /// Ranked candidates considered per slot.
    #[serde(default = "default_branching_limit")]
    pub branching_limit: usize,
    /// Max occurrences of one subject for one class per day.
    #[serde(default = "default_per_day_subject_cap")]
    pub per_day_subject_cap: u32,
    /// Strict mode: fail when more than this share of regular cells stays free.
    #[serde(default)]
    pub max_free_ratio: Option<f64>,
    /// Upper bound on search nodes visited by the backtracking stage.
    #[serde(default)]
    pub max_search_steps: Option<u64>,
}

fn default_fill_all_periods() -> bool {
    true
}

fn default_branching_limit() -> usize {
    DEFAULT_BRANCHING_LIMIT
}

fn default_per_day_subject_cap() -> u32 {
    DEFAULT_PER_DAY_SUBJECT_CAP
}

/// The time window of a validated configuration, in parsed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    /// First period start.
    pub start: ClockTime,
    /// Day end.
    pub end: ClockTime,
    /// Period length in minutes.
    pub period_minutes: u32,
}

impl TimetableConfig {
    /// Creates a configuration with defaults for everything but the time window.
    pub fn new(
        days: Vec<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        period_duration: f64,
    ) -> Self {
        Self {
            days,
            start_time: start_time.into(),
            end_time: end_time.into(),
            period_duration,
            special_periods: Vec::new(),
            fill_all_periods: default_fill_all_periods(),
            branching_limit: DEFAULT_BRANCHING_LIMIT,
            per_day_subject_cap: DEFAULT_PER_DAY_SUBJECT_CAP,
            max_free_ratio: None,
            max_search_steps: None,
        }
    }

    /// Adds a special period.
    pub fn with_special_period(mut self, period: SpecialPeriod) -> Self {
        self.special_periods.push(period);
        self
    }

    /// Sets fill-all-periods mode.
    pub fn with_fill_all_periods(mut self, fill: bool) -> Self {
        self.fill_all_periods = fill;
        self
    }

    /// Sets the branching limit.
    pub fn with_branching_limit(mut self, limit: usize) -> Self {
        self.branching_limit = limit;
        self
    }

    /// Sets the per-day subject cap.
    pub fn with_per_day_subject_cap(mut self, cap: u32) -> Self {
        self.per_day_subject_cap = cap;
        self
    }

    /// Enables strict mode.
    pub fn with_max_free_ratio(mut self, ratio: f64) -> Self {
        self.max_free_ratio = Some(ratio);
        self
    }

    /// Sets the search step budget.
    pub fn with_max_search_steps(mut self, steps: u64) -> Self {
        self.max_search_steps = Some(steps);
        self
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Checks the configuration and returns the parsed day window.
    ///
    /// # Errors
    /// Empty day list, unparsable times (including special periods),
    /// `end <= start`, a period duration outside one minute to one day, zero branching limit
    /// or subject cap, and a free ratio outside [0, 1].
    pub fn validate(&self) -> Result<DayWindow, ConfigError> {
        if self.days.iter().all(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyDays);
        }
        let mut seen = std::collections::HashSet::new();
        for day in self.days.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
            if !seen.insert(day) {
                return Err(ConfigError::DuplicateDay(day.to_string()));
            }
        }
        let start = parse_time("start_time", &self.start_time)?;
        let end = parse_time("end_time", &self.end_time)?;
        if end <= start {
            return Err(ConfigError::EndNotAfterStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        let period_minutes = (self.period_duration * 60.0).round();
        if !self.period_duration.is_finite()
            || !(1.0..=MAX_PERIOD_MINUTES).contains(&period_minutes)
        {
            return Err(ConfigError::InvalidPeriodDuration(self.period_duration));
        }

        for sp in &self.special_periods {
            parse_time("special_periods.start_time", &sp.start_time)?;
            parse_time("special_periods.end_time", &sp.end_time)?;
        }
        if self.branching_limit == 0 {
            return Err(ConfigError::InvalidBranchingLimit);
        }
        if self.per_day_subject_cap == 0 {
            return Err(ConfigError::InvalidSubjectCap);
        }
        if let Some(r) = self.max_free_ratio {
            if !(0.0..=1.0).contains(&r) {
                return Err(ConfigError::InvalidFreeRatio(r));
            }
        }

        Ok(DayWindow {
            start,
            end,
            period_minutes: period_minutes as u32,
        })
    }

    /// Number of periods generated per day, once validated.
    pub fn periods_per_day(&self) -> Result<usize, ConfigError> {
        let w = self.validate()?;
        let span = w.end.minutes() - w.start.minutes();
        Ok(span.div_ceil(w.period_minutes) as usize)
    }
}

pub(crate) fn parse_time(field: &str, value: &str) -> Result<ClockTime, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}
