//! Time slots and special periods.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ClockTime;

/// One teaching period on one day of the week.
///
/// Slots are shared by every class: the grid is `classes × slots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day name.
    pub day: String,
    /// Position of `day` in the configured day list.
    pub day_index: usize,
    /// Period start.
    pub start_time: ClockTime,
    /// Period end.
    pub end_time: ClockTime,
    /// Special periods (assembly, break, ...) are never assignable.
    pub is_special_period: bool,
    /// Label of the special period, if any.
    pub special_type: Option<String>,
}

impl TimeSlot {
    /// Creates a regular (assignable) slot.
    pub fn new(
        day: impl Into<String>,
        day_index: usize,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            day: day.into(),
            day_index,
            start_time,
            end_time,
            is_special_period: false,
            special_type: None,
        }
    }

    /// Marks this slot as a special period.
    pub fn into_special(mut self, special_type: impl Into<String>) -> Self {
        self.is_special_period = true;
        self.special_type = Some(special_type.into());
        self
    }

    /// Lookup key: (day, start time).
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.day.clone(), self.start_time)
    }

    /// `"HH:MM - HH:MM"` range label.
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Identifies a slot by day and start time. Rendered as `Day_HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Day name.
    pub day: String,
    /// Period start.
    pub start_time: ClockTime,
}

impl SlotKey {
    /// Creates a key.
    pub fn new(day: impl Into<String>, start_time: ClockTime) -> Self {
        Self {
            day: day.into(),
            start_time,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.day, self.start_time)
    }
}

/// A configured non-assignable period, matched to slots by exact (day, start).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPeriod {
    /// Day name.
    pub day: String,
    /// Start time; must equal a generated slot start to take effect.
    pub start_time: String,
    /// End time (informational).
    pub end_time: String,
    /// Label carried to the output (e.g. `"Assembly"`).
    #[serde(rename = "type")]
    pub kind: String,
}

impl SpecialPeriod {
    /// Creates a special period definition.
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_key_display() {
        let slot = TimeSlot::new("Mon", 0, ClockTime::from_hm(9, 0), ClockTime::from_hm(10, 0));
        assert_eq!(slot.key().to_string(), "Mon_09:00");
        assert_eq!(slot.time_range(), "09:00 - 10:00");
        assert!(!slot.is_special_period);
    }

    #[test]
    fn test_into_special() {
        let slot = TimeSlot::new("Fri", 4, ClockTime::from_hm(8, 0), ClockTime::from_hm(9, 0))
            .into_special("Assembly");
        assert!(slot.is_special_period);
        assert_eq!(slot.special_type.as_deref(), Some("Assembly"));
    }

    #[test]
    fn test_special_period_type_field() {
        let sp: SpecialPeriod = serde_json::from_str(
            r#"{"day":"Fri","start_time":"08:00","end_time":"09:00","type":"Assembly"}"#,
        )
        .unwrap();
        assert_eq!(sp.kind, "Assembly");
    }
}
