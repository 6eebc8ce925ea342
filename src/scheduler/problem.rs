//! Indexed, immutable view of one generation run's input.

use std::collections::HashMap;
use std::ops::Range;

use crate::config::TimetableConfig;
use crate::error::{Result, TimetableError};
use crate::grid::build_time_grid;
use crate::models::{ClassGroup, Subject, Teacher, TimeSlot};
use crate::validation::validate_input;

/// The validated input of a generation run.
///
/// Records are frozen here; the scheduler refers to them by position
/// (input order), which also serves as the deterministic tie-breaker.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    teachers: Vec<Teacher>,
    classes: Vec<ClassGroup>,
    subjects: Vec<Subject>,
    config: TimetableConfig,
    slots: Vec<TimeSlot>,
    day_slots: Vec<Range<usize>>,
    priority_subjects: Vec<Vec<usize>>,
    qualified_teachers: Vec<Vec<usize>>,
    primary: Vec<Vec<bool>>,
    class_credits: Vec<u32>,
    teacher_index: HashMap<String, usize>,
    class_index: HashMap<String, usize>,
    subject_index: HashMap<String, usize>,
}

impl TimetableProblem {
    /// Validates configuration and records, then builds the slot grid and lookups.
    ///
    /// # Errors
    /// [`TimetableError::Config`] for an unusable configuration (checked
    /// first), [`TimetableError::DataIntegrity`] with every finding otherwise.
    pub fn new(
        teachers: Vec<Teacher>,
        classes: Vec<ClassGroup>,
        subjects: Vec<Subject>,
        config: TimetableConfig,
    ) -> Result<Self> {
        let slots = build_time_grid(&config)?;
        validate_input(&teachers, &classes, &subjects).map_err(TimetableError::DataIntegrity)?;

        let mut day_slots = vec![0..0; config.days.len()];
        let mut i = 0;
        while i < slots.len() {
            let day = slots[i].day_index;
            let start = i;
            while i < slots.len() && slots[i].day_index == day {
                i += 1;
            }
            day_slots[day] = start..i;
        }

        let subject_index: HashMap<String, usize> = subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        // Required subjects in subject input order, then by credits (stable).
        let priority_subjects = classes
            .iter()
            .map(|c| {
                let mut subs: Vec<usize> = (0..subjects.len())
                    .filter(|&s| c.requires(&subjects[s].id))
                    .collect();
                subs.sort_by(|&a, &b| subjects[b].credits.cmp(&subjects[a].credits));
                subs
            })
            .collect();

        let qualified_teachers = subjects
            .iter()
            .map(|s| {
                (0..teachers.len())
                    .filter(|&t| teachers[t].is_qualified(&s.id))
                    .collect()
            })
            .collect();

        let primary = teachers
            .iter()
            .map(|t| subjects.iter().map(|s| t.is_primary(&s.id)).collect())
            .collect();

        let class_credits = classes
            .iter()
            .map(|c| c.effective_total_credits(&subjects))
            .collect();

        let teacher_index = teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        let class_index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        Ok(Self {
            teachers,
            classes,
            subjects,
            config,
            slots,
            day_slots,
            priority_subjects,
            qualified_teachers,
            primary,
            class_credits,
            teacher_index,
            class_index,
            subject_index,
        })
    }

    /// Teachers, in input order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Class groups, in input order.
    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    /// Subjects, in input order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Configuration.
    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Generated slots, ordered by day then time.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Slot positions belonging to a day.
    pub fn day_slots(&self, day_index: usize) -> Range<usize> {
        self.day_slots.get(day_index).cloned().unwrap_or(0..0)
    }

    /// Number of configured days.
    pub fn day_count(&self) -> usize {
        self.day_slots.len()
    }

    /// Position of a teacher by ID.
    pub fn teacher_position(&self, id: &str) -> Option<usize> {
        self.teacher_index.get(id).copied()
    }

    /// Position of a class by ID.
    pub fn class_position(&self, id: &str) -> Option<usize> {
        self.class_index.get(id).copied()
    }

    /// Position of a subject by ID.
    pub fn subject_position(&self, id: &str) -> Option<usize> {
        self.subject_index.get(id).copied()
    }

    /// Subjects a class requires, by descending credits (input order on ties).
    pub fn priority_subjects(&self, class: usize) -> &[usize] {
        &self.priority_subjects[class]
    }

    /// Teachers qualified for a subject, in input order.
    pub fn qualified_teachers(&self, subject: usize) -> &[usize] {
        &self.qualified_teachers[subject]
    }

    /// Whether the subject is among the teacher's primary subjects.
    #[inline]
    pub fn is_primary(&self, teacher: usize, subject: usize) -> bool {
        self.primary[teacher][subject]
    }

    /// Effective total credits of a class.
    pub fn class_credits(&self, class: usize) -> u32 {
        self.class_credits[class]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::validation::ValidationErrorKind;

    fn config() -> TimetableConfig {
        TimetableConfig::new(vec!["Mon".into(), "Tue".into()], "09:00", "12:00", 1.0)
    }

    fn subjects() -> Vec<Subject> {
        vec![
            Subject::new("ART").with_credits(1),
            Subject::new("MATH").with_credits(4),
            Subject::new("ENG").with_credits(4),
        ]
    }

    fn teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("T1").with_subject("MATH").with_subject("ART").with_max_daily_hours(3),
            Teacher::new("T2").with_primary_subject("ENG").with_subject("MATH").with_max_daily_hours(3),
        ]
    }

    #[test]
    fn test_indexes() {
        let classes = vec![ClassGroup::new("C1")
            .with_subject("ENG")
            .with_subject("ART")
            .with_subject("MATH")];
        let p = TimetableProblem::new(teachers(), classes, subjects(), config()).unwrap();

        assert_eq!(p.slots().len(), 6);
        assert_eq!(p.day_slots(1), 3..6);
        assert_eq!(p.day_slots(7), 0..0);
        // MATH and ENG tie on credits: subject input order (MATH first), then ART.
        assert_eq!(p.priority_subjects(0), &[1, 2, 0]);
        assert_eq!(p.qualified_teachers(1), &[0, 1]);
        assert!(p.is_primary(1, 2));
        assert!(!p.is_primary(1, 1));
        assert_eq!(p.class_credits(0), 9);
        assert_eq!(p.teacher_position("T2"), Some(1));
        assert_eq!(p.subject_position("ENG"), Some(2));
        assert_eq!(p.class_position("nope"), None);
    }

    #[test]
    fn test_config_checked_before_data() {
        let bad = TimetableConfig::new(vec![], "09:00", "12:00", 1.0);
        let err = TimetableProblem::new(vec![], vec![ClassGroup::new("C")], vec![], bad).unwrap_err();
        assert!(matches!(err, TimetableError::Config(ConfigError::EmptyDays)));
    }

    #[test]
    fn test_refuses_integrity_violations() {
        let lazy = vec![Teacher::new("T1").with_subject("MATH")]; // max_daily_hours = 0
        let classes = vec![ClassGroup::new("C1").with_subject("MATH")];
        let err = TimetableProblem::new(lazy, classes, vec![Subject::new("MATH")], config()).unwrap_err();
        match err {
            TimetableError::DataIntegrity(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDailyHours);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
