//! Class group model.
//!
//! A class group is a cohort of students sharing a room and a list of
//! subjects it must receive each week.

use serde::{Deserialize, Serialize};

use super::Subject;

/// A class group to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGroup {
    /// Unique class identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room the class is taught in (copied onto every cell).
    pub room: String,
    /// Subject IDs this class must receive.
    pub subjects: Vec<String>,
    /// Total credits. `None` = derived from subject credits.
    #[serde(default)]
    pub total_credits: Option<u32>,
}

impl ClassGroup {
    /// Creates a class with no subjects.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            room: String::new(),
            subjects: Vec::new(),
            total_credits: None,
        }
    }

    /// Sets the class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Adds a required subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.push(subject_id.into());
        self
    }

    /// Sets explicit total credits.
    pub fn with_total_credits(mut self, credits: u32) -> Self {
        self.total_credits = Some(credits);
        self
    }

    /// Whether this class requires the subject.
    pub fn requires(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }

    /// Total credits: the explicit value if set (and positive), otherwise
    /// the sum of credits of the known subjects this class requires.
    pub fn effective_total_credits(&self, subjects: &[Subject]) -> u32 {
        match self.total_credits {
            Some(c) if c > 0 => c,
            _ => subjects
                .iter()
                .filter(|s| self.requires(&s.id))
                .map(|s| s.credits)
                .sum(),
        }
    }

    /// Display label: the name, or the ID when unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_builder() {
        let c = ClassGroup::new("C1")
            .with_name("Grade 9A")
            .with_room("R101")
            .with_subject("MATH")
            .with_subject("ENG");
        assert_eq!(c.room, "R101");
        assert!(c.requires("MATH"));
        assert!(!c.requires("ART"));
        assert_eq!(c.label(), "Grade 9A");
    }

    #[test]
    fn test_derived_total_credits() {
        let subjects = vec![
            Subject::new("MATH").with_credits(4),
            Subject::new("ENG").with_credits(3),
            Subject::new("ART").with_credits(1),
        ];
        let c = ClassGroup::new("C1").with_subject("MATH").with_subject("ENG");
        assert_eq!(c.effective_total_credits(&subjects), 7);

        let explicit = c.clone().with_total_credits(20);
        assert_eq!(explicit.effective_total_credits(&subjects), 20);
    }
}
