//! Time grid construction.
//!
//! Expands the configured day list and day window into an ordered slot
//! sequence: for each day, periods start at `start_time` and step by the
//! period duration while the start is before `end_time`. A slot whose
//! (day, start) exactly matches a special-period definition is marked
//! special and carries the definition's label.

use tracing::debug;

use crate::config::{parse_time, TimetableConfig};
use crate::error::ConfigError;
use crate::models::TimeSlot;

/// Builds the slot grid for a configuration.
///
/// Slots are ordered by configured day, then start time. A period's end may
/// run past `end_time` when the window is not a multiple of the duration.
///
/// # Errors
/// Any [`ConfigError`] from [`TimetableConfig::validate`].
pub fn build_time_grid(config: &TimetableConfig) -> Result<Vec<TimeSlot>, ConfigError> {
    let window = config.validate()?;

    let mut specials = Vec::with_capacity(config.special_periods.len());
    for sp in &config.special_periods {
        let start = parse_time("special_periods.start_time", &sp.start_time)?;
        specials.push((sp.day.trim(), start, sp.kind.as_str()));
    }

    let mut slots = Vec::new();
    for (day_index, day) in config.days.iter().map(|d| d.trim()).enumerate() {
        if day.is_empty() {
            continue;
        }
        let mut start = window.start;
        while start < window.end {
            let end = start.plus_minutes(window.period_minutes);
            let slot = TimeSlot::new(day, day_index, start, end);
            let special = specials
                .iter()
                .find(|(d, s, _)| *d == day && *s == start)
                .map(|(_, _, kind)| *kind);
            slots.push(match special {
                Some(kind) => slot.into_special(kind),
                None => slot,
            });
            start = end;
        }
    }

    debug!(
        event = "grid_built",
        days = config.days.len(),
        slots = slots.len(),
        special = slots.iter().filter(|s| s.is_special_period).count()
    );
    Ok(slots)
}
