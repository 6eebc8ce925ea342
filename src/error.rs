//! Error types for timetable generation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Configuration error, reported before any grid is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid time for {field}: '{value}' (expected HH:MM)")]
    InvalidTime { field: String, value: String },

    #[error("no days configured")]
    EmptyDays,

    #[error("day '{0}' is listed more than once")]
    DuplicateDay(String),

    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: String, end: String },

    #[error("period duration must be between one minute and 24 hours, got {0} hours")]
    InvalidPeriodDuration(f64),

    #[error("branching limit must be at least 1")]
    InvalidBranchingLimit,

    #[error("per-day subject cap must be at least 1")]
    InvalidSubjectCap,

    #[error("max free ratio must be within [0, 1], got {0}")]
    InvalidFreeRatio(f64),
}

/// Main error type for timetable generation.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The configuration is unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input records violate the data-integrity contract.
    #[error("data integrity check failed with {} finding(s): {}", .0.len(), summarize(.0))]
    DataIntegrity(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
