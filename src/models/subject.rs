//! Subject model.

use serde::{Deserialize, Serialize};

/// A subject taught to class groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Credit weight (>= 1). Higher credits rank first.
    pub credits: u32,
    /// Required occurrences per week (>= 1).
    pub weekly_sessions: u32,
}

impl Subject {
    /// Creates a one-credit, once-a-week subject.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            credits: 1,
            weekly_sessions: 1,
        }
    }

    /// Sets the subject name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the credit weight.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the weekly session requirement.
    pub fn with_weekly_sessions(mut self, sessions: u32) -> Self {
        self.weekly_sessions = sessions;
        self
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
