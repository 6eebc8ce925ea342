//! Supplier-side defaulting of raw records.
//!
//! The generator never repairs its input: it validates and refuses. Data
//! suppliers that load loosely-filled sheets can call [`normalize`] first
//! to apply the conventional defaults:
//!
//! | Field | Default when missing / non-positive |
//! |-------|-------------------------------------|
//! | `Teacher::max_daily_hours` | periods per day |
//! | `Subject::credits` | 1 |
//! | `Subject::weekly_sessions` | number of days |
//! | `ClassGroup::total_credits` | sum of its subjects' credits |
//!
//! Teacher availability is left as-is: an empty list already means
//! "available every slot".

use tracing::debug;

use crate::config::TimetableConfig;
use crate::error::ConfigError;
use crate::models::{ClassGroup, Subject, Teacher};

/// Applies defaults in place. Needs a valid configuration to size the day.
pub fn normalize(
    teachers: &mut [Teacher],
    classes: &mut [ClassGroup],
    subjects: &mut [Subject],
    config: &TimetableConfig,
) -> Result<(), ConfigError> {
    let periods_per_day = config.periods_per_day()?.max(1);
    let days = config
        .days
        .iter()
        .filter(|d| !d.trim().is_empty())
        .count()
        .max(1);

    let mut changed = 0usize;
    for t in teachers.iter_mut() {
        if t.max_daily_hours <= 0 {
            t.max_daily_hours = i32::try_from(periods_per_day).unwrap_or(i32::MAX);
            changed += 1;
        }
    }
    for s in subjects.iter_mut() {
        if s.credits == 0 {
            s.credits = 1;
            changed += 1;
        }
        if s.weekly_sessions == 0 {
            s.weekly_sessions = u32::try_from(days).unwrap_or(u32::MAX);
            changed += 1;
        }
    }
    for c in classes.iter_mut() {
        if c.total_credits.unwrap_or(0) == 0 {
            c.total_credits = Some(c.effective_total_credits(subjects));
            changed += 1;
        }
    }

    debug!(event = "normalized", fields_defaulted = changed);
    Ok(())
}
