//! Teacher model.
//!
//! Teachers are the resources the generator assigns to class periods.
//! Each teacher has qualified subjects (a subset marked primary), weekly
//! availability windows, a daily workload cap and a rating used for
//! candidate ranking.

use serde::{Deserialize, Serialize};

use super::{AvailabilityWindow, ClockTime};

/// A teacher that can be assigned to class periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Subject IDs this teacher is qualified to teach.
    pub subjects: Vec<String>,
    /// Subset of `subjects` the teacher specializes in (scored higher).
    #[serde(default)]
    pub primary_subjects: Vec<String>,
    /// Weekly availability. Empty = available every slot.
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
    /// Maximum periods per day. `<= 0` = unlimited for the checker.
    pub max_daily_hours: i32,
    /// Non-negative quality rating.
    #[serde(default)]
    pub rating: f64,
}

impl Teacher {
    /// Creates a teacher with no subjects, no declared availability and no workload cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: Vec::new(),
            primary_subjects: Vec::new(),
            availability: Vec::new(),
            max_daily_hours: 0,
            rating: 0.0,
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a qualified subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.push(subject_id.into());
        self
    }

    /// Adds a primary subject (also added as qualified if missing).
    pub fn with_primary_subject(mut self, subject_id: impl Into<String>) -> Self {
        let id = subject_id.into();
        if !self.subjects.contains(&id) {
            self.subjects.push(id.clone());
        }
        self.primary_subjects.push(id);
        self
    }

    /// Adds an availability window.
    pub fn with_availability(
        mut self,
        day: impl Into<String>,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        self.availability
            .push(AvailabilityWindow::new(day, start_time, end_time));
        self
    }

    /// Sets the daily workload cap.
    pub fn with_max_daily_hours(mut self, hours: i32) -> Self {
        self.max_daily_hours = hours;
        self
    }

    /// Sets the rating (clamped to be non-negative).
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.max(0.0);
        self
    }

    /// Whether this teacher may teach the subject.
    pub fn is_qualified(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }

    /// Whether the subject is one of this teacher's primary subjects.
    pub fn is_primary(&self, subject_id: &str) -> bool {
        self.primary_subjects.iter().any(|s| s == subject_id)
    }

    /// Daily cap, or `None` when unlimited.
    pub fn daily_cap(&self) -> Option<u32> {
        u32::try_from(self.max_daily_hours).ok().filter(|&h| h > 0)
    }

    /// Checks availability for the period [start, end) on `day`.
    ///
    /// Returns `true` if no availability is declared (always available)
    /// or if any declared window covers the whole period.
    pub fn is_available(&self, day: &str, start: ClockTime, end: ClockTime) -> bool {
        self.availability.is_empty() || self.availability.iter().any(|w| w.covers(day, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m)
    }

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new("T1")
            .with_name("Ada")
            .with_subject("MATH")
            .with_primary_subject("PHYS")
            .with_max_daily_hours(4)
            .with_rating(4.5);

        assert_eq!(t.id, "T1");
        assert_eq!(t.name, "Ada");
        assert!(t.is_qualified("MATH"));
        assert!(t.is_qualified("PHYS"));
        assert!(!t.is_qualified("CHEM"));
        assert!(t.is_primary("PHYS"));
        assert!(!t.is_primary("MATH"));
        assert_eq!(t.daily_cap(), Some(4));
        assert!((t.rating - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_unlimited_daily_cap() {
        assert_eq!(Teacher::new("T").daily_cap(), None);
        assert_eq!(Teacher::new("T").with_max_daily_hours(-3).daily_cap(), None);
    }

    #[test]
    fn test_availability_no_windows() {
        let t = Teacher::new("T1");
        assert!(t.is_available("Mon", hm(8, 0), hm(9, 0)));
        assert!(t.is_available("Sun", hm(22, 0), hm(23, 0)));
    }

    #[test]
    fn test_availability_any_window() {
        let t = Teacher::new("T1")
            .with_availability("Mon", hm(9, 0), hm(10, 0))
            .with_availability("Mon", hm(13, 0), hm(15, 0));

        assert!(t.is_available("Mon", hm(9, 0), hm(10, 0)));
        assert!(t.is_available("Mon", hm(14, 0), hm(15, 0)));
        assert!(!t.is_available("Mon", hm(10, 0), hm(11, 0)));
        assert!(!t.is_available("Tue", hm(9, 0), hm(10, 0)));
    }

    #[test]
    fn test_rating_clamping() {
        let t = Teacher::new("T1").with_rating(-2.0);
        assert!((t.rating - 0.0).abs() < 1e-10);
    }
}
