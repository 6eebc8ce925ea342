//! Timetable (schedule store) model.
//!
//! A timetable is a `classes × slots` grid of cells. Each cell holds an
//! optional (teacher, subject) assignment plus the class room and the
//! special-period marker of its slot. The store owns no business logic:
//! legality is decided by the scheduler, which keeps its caches in step
//! with every mutation made here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ClassGroup, SlotKey, TimeSlot};

/// Label used for unassigned cells in rendered views.
pub const FREE_LABEL: &str = "Free";

/// Room shown for a teacher's idle periods.
pub const STAFF_ROOM: &str = "Staff Room";

/// The content of one (class, slot) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned teacher ID.
    pub teacher_id: Option<String>,
    /// Assigned subject ID.
    pub subject_id: Option<String>,
    /// Room (copied from the class).
    pub room: String,
    /// Whether the slot is a special period.
    pub is_special_period: bool,
    /// Special period label.
    pub special_type: Option<String>,
}

impl Assignment {
    /// An empty regular cell.
    pub fn free(room: impl Into<String>) -> Self {
        Self {
            teacher_id: None,
            subject_id: None,
            room: room.into(),
            is_special_period: false,
            special_type: None,
        }
    }

    /// A special-period cell.
    pub fn special(room: impl Into<String>, special_type: Option<String>) -> Self {
        Self {
            is_special_period: true,
            special_type,
            ..Self::free(room)
        }
    }

    /// Whether a teacher and subject are assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.teacher_id.is_some() && self.subject_id.is_some()
    }

    /// Whether this is a regular cell left without an assignment.
    #[inline]
    pub fn is_free(&self) -> bool {
        !self.is_special_period && !self.is_assigned()
    }
}

/// All cells of one class, aligned with [`Timetable::slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassTimetable {
    /// Class ID.
    pub class_id: String,
    /// One cell per slot.
    pub cells: Vec<Assignment>,
}

/// The schedule store: every class has exactly one cell per generated slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    slots: Vec<TimeSlot>,
    classes: Vec<ClassTimetable>,
    #[serde(skip)]
    slot_index: HashMap<SlotKey, usize>,
    #[serde(skip)]
    class_index: HashMap<String, usize>,
}

/// One rendered row of a class timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScheduleRow {
    /// Day name.
    pub day: String,
    /// `"HH:MM - HH:MM"`.
    pub time: String,
    /// Subject name, special label, or `"Free"`.
    pub subject: String,
    /// Teacher name or `"Free"`.
    pub teacher: String,
    /// Room.
    pub room: String,
    /// Whether the row is a special period.
    pub is_special_period: bool,
}

/// One rendered row of a teacher timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherScheduleRow {
    /// Day name.
    pub day: String,
    /// `"HH:MM - HH:MM"`.
    pub time: String,
    /// Class name or `"Free"`.
    pub class: String,
    /// Subject name or `"Free"`.
    pub subject: String,
    /// Room, or `"Staff Room"` when idle.
    pub room: String,
}

impl Timetable {
    /// Creates an empty grid. Special slots are pre-set on every class.
    pub fn new(classes: &[ClassGroup], slots: Vec<TimeSlot>) -> Self {
        let slot_index = slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.key(), i))
            .collect();
        let class_index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let classes = classes
            .iter()
            .map(|c| ClassTimetable {
                class_id: c.id.clone(),
                cells: slots
                    .iter()
                    .map(|s| {
                        if s.is_special_period {
                            Assignment::special(&c.room, s.special_type.clone())
                        } else {
                            Assignment::free(&c.room)
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            slots,
            classes,
            slot_index,
            class_index,
        }
    }

    /// All slots, ordered by day then start time.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Per-class rows, in class input order.
    pub fn classes(&self) -> &[ClassTimetable] {
        &self.classes
    }

    /// Index of a slot by key.
    pub fn slot_position(&self, key: &SlotKey) -> Option<usize> {
        self.slot_index.get(key).copied()
    }

    /// Index of a class by ID.
    pub fn class_position(&self, class_id: &str) -> Option<usize> {
        self.class_index.get(class_id).copied()
    }

    /// Point lookup by class ID and slot key.
    pub fn get(&self, class_id: &str, key: &SlotKey) -> Option<&Assignment> {
        let c = self.class_position(class_id)?;
        let s = self.slot_position(key)?;
        Some(&self.classes[c].cells[s])
    }

    /// Point lookup by position.
    #[inline]
    pub fn cell(&self, class_idx: usize, slot_idx: usize) -> &Assignment {
        &self.classes[class_idx].cells[slot_idx]
    }

    /// Writes an assignment into a regular cell.
    ///
    /// # Panics
    /// Panics if the cell is a special period.
    pub(crate) fn assign(
        &mut self,
        class_idx: usize,
        slot_idx: usize,
        teacher_id: &str,
        subject_id: &str,
    ) {
        let cell = &mut self.classes[class_idx].cells[slot_idx];
        assert!(!cell.is_special_period, "special periods are never assigned");
        cell.teacher_id = Some(teacher_id.to_string());
        cell.subject_id = Some(subject_id.to_string());
    }

    /// Clears a regular cell back to free.
    pub(crate) fn clear(&mut self, class_idx: usize, slot_idx: usize) {
        let cell = &mut self.classes[class_idx].cells[slot_idx];
        assert!(!cell.is_special_period, "special periods are never cleared");
        cell.teacher_id = None;
        cell.subject_id = None;
    }

    /// All (slot, cell) pairs of a class, ordered by day then time.
    pub fn assignments_for_class(&self, class_id: &str) -> Vec<(&TimeSlot, &Assignment)> {
        match self.class_position(class_id) {
            Some(c) => self.slots.iter().zip(&self.classes[c].cells).collect(),
            None => Vec::new(),
        }
    }

    /// All (slot, class ID, cell) triples taught by a teacher, ordered by day then time.
    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<(&TimeSlot, &str, &Assignment)> {
        let mut out = Vec::new();
        for (s, slot) in self.slots.iter().enumerate() {
            for class in &self.classes {
                let cell = &class.cells[s];
                if cell.teacher_id.as_deref() == Some(teacher_id) {
                    out.push((slot, class.class_id.as_str(), cell));
                }
            }
        }
        out
    }

    /// How many times a class has the subject this week.
    pub fn subject_count(&self, class_id: &str, subject_id: &str) -> usize {
        self.assignments_for_class(class_id)
            .iter()
            .filter(|(_, a)| a.subject_id.as_deref() == Some(subject_id))
            .count()
    }

    /// Number of regular (non-special) cells across all classes.
    pub fn assignable_count(&self) -> usize {
        let per_class = self.slots.iter().filter(|s| !s.is_special_period).count();
        per_class * self.classes.len()
    }

    /// Number of assigned cells.
    pub fn assigned_count(&self) -> usize {
        self.cells().filter(|a| a.is_assigned()).count()
    }

    /// Number of regular cells left free.
    pub fn free_count(&self) -> usize {
        self.cells().filter(|a| a.is_free()).count()
    }

    /// Number of special cells.
    pub fn special_count(&self) -> usize {
        self.cells().filter(|a| a.is_special_period).count()
    }

    fn cells(&self) -> impl Iterator<Item = &Assignment> {
        self.classes.iter().flat_map(|c| c.cells.iter())
    }
}
