//! Input validation for timetabling problems.
//!
//! Checks the data-integrity contract before generation. Detects:
//! - Duplicate IDs
//! - Classes without subjects, or referencing unknown subjects
//! - Subjects no teacher is qualified for
//! - Teachers with a non-positive daily workload cap
//! - Teachers with a negative or non-finite rating
//! - Subjects with zero credits or zero weekly sessions
//!
//! All findings are collected; nothing short-circuits.

use crate::models::{ClassGroup, Subject, Teacher};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A class has no subjects.
    EmptyClass,
    /// A class references a subject that doesn't exist.
    UnknownSubject,
    /// No teacher is qualified for a subject.
    UnstaffedSubject,
    /// A teacher's max daily hours is not positive.
    InvalidDailyHours,
    /// A teacher's rating is negative or not a finite number.
    InvalidRating,
    /// A subject has zero credits or zero weekly sessions.
    InvalidSubjectQuota,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the input records of a generation run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    teachers: &[Teacher],
    classes: &[ClassGroup],
    subjects: &[Subject],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut subject_ids = HashSet::new();
    for s in subjects {
        if !subject_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", s.id),
            ));
        }
        if s.credits == 0 || s.weekly_sessions == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSubjectQuota,
                format!(
                    "Subject {} needs credits >= 1 and weekly sessions >= 1 (got {} / {})",
                    s.label(),
                    s.credits,
                    s.weekly_sessions
                ),
            ));
        }
        if !teachers.iter().any(|t| t.is_qualified(&s.id)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnstaffedSubject,
                format!("Subject {} has no qualified teachers", s.label()),
            ));
        }
    }

    let mut teacher_ids = HashSet::new();
    for t in teachers {
        if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }
        if t.max_daily_hours <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDailyHours,
                format!("Teacher {} has invalid max daily hours", label(&t.name, &t.id)),
            ));
        }
        if !t.rating.is_finite() || t.rating < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRating,
                format!("Teacher {} has invalid rating {}", label(&t.name, &t.id), t.rating),
            ));
        }
    }

    let mut class_ids = HashSet::new();
    for c in classes {
        if !class_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class ID: {}", c.id),
            ));
        }
        if c.subjects.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyClass,
                format!("Class {} has no subjects assigned", c.label()),
            ));
        }
        for sid in &c.subjects {
            if !subject_ids.contains(sid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!("Class {} references unknown subject '{}'", c.label(), sid),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn label<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() {
        id
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_subjects() -> Vec<Subject> {
        vec![
            Subject::new("MATH").with_name("Mathematics").with_credits(4),
            Subject::new("ENG").with_name("English").with_credits(3),
        ]
    }

    fn sample_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("T1").with_subject("MATH").with_max_daily_hours(4),
            Teacher::new("T2").with_subject("ENG").with_max_daily_hours(4),
        ]
    }

    fn sample_classes() -> Vec<ClassGroup> {
        vec![ClassGroup::new("C1")
            .with_name("9A")
            .with_subject("MATH")
            .with_subject("ENG")]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_teachers(), &sample_classes(), &sample_subjects()).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut teachers = sample_teachers();
        teachers.push(Teacher::new("T1").with_subject("ENG").with_max_daily_hours(2));
        let mut classes = sample_classes();
        classes.push(ClassGroup::new("C1").with_subject("MATH"));

        let errors = validate_input(&teachers, &classes, &sample_subjects()).unwrap_err();
        let dupes: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
            .collect();
        assert_eq!(dupes.len(), 2);
        assert!(dupes.iter().any(|e| e.message.contains("teacher")));
        assert!(dupes.iter().any(|e| e.message.contains("class")));
    }

    #[test]
    fn test_empty_class() {
        let classes = vec![ClassGroup::new("C9").with_name("Empty")];
        let errors = validate_input(&sample_teachers(), &classes, &sample_subjects()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::EmptyClass]);
        assert_eq!(errors[0].message, "Class Empty has no subjects assigned");
    }

    #[test]
    fn test_unstaffed_subject() {
        let mut subjects = sample_subjects();
        subjects.push(Subject::new("ART").with_name("Art"));
        let errors = validate_input(&sample_teachers(), &sample_classes(), &subjects).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnstaffedSubject]);
        assert!(errors[0].message.contains("Art"));
    }

    #[test]
    fn test_invalid_daily_hours() {
        let teachers = vec![
            Teacher::new("T1").with_subject("MATH").with_max_daily_hours(0),
            Teacher::new("T2").with_subject("ENG").with_max_daily_hours(-1),
        ];
        let errors = validate_input(&teachers, &sample_classes(), &sample_subjects()).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::InvalidDailyHours,
                ValidationErrorKind::InvalidDailyHours
            ]
        );
    }

    #[test]
    fn test_invalid_rating() {
        let mut teachers = sample_teachers();
        teachers[0].rating = f64::NAN;
        teachers[1].rating = -0.5;
        let errors = validate_input(&teachers, &sample_classes(), &sample_subjects()).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![ValidationErrorKind::InvalidRating, ValidationErrorKind::InvalidRating]
        );
        assert_eq!(errors[1].message, "Teacher T2 has invalid rating -0.5");

        teachers[0].rating = 0.0;
        teachers[1].rating = 4.5;
        assert!(validate_input(&teachers, &sample_classes(), &sample_subjects()).is_ok());
    }

    #[test]
    fn test_unknown_subject_reference() {
        let classes = vec![ClassGroup::new("C1").with_subject("MATH").with_subject("LATIN")];
        let errors = validate_input(&sample_teachers(), &classes, &sample_subjects()).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::UnknownSubject]);
    }

    #[test]
    fn test_invalid_subject_quota() {
        let subjects = vec![
            Subject::new("MATH").with_credits(0),
            Subject::new("ENG").with_weekly_sessions(0),
        ];
        let errors = validate_input(&sample_teachers(), &sample_classes(), &subjects).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidSubjectQuota));
    }

    #[test]
    fn test_multiple_errors() {
        let classes = vec![ClassGroup::new("empty")];
        let teachers = vec![Teacher::new("T1").with_subject("MATH")]; // no daily cap, ENG unstaffed
        let errors = validate_input(&teachers, &classes, &sample_subjects()).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
