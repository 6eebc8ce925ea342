//! Mutable search state: the timetable, its constraint caches and the undo log.
//!
//! Every mutation of the timetable goes through [`SearchState::commit`] or
//! [`SearchState::rollback`], which update the caches in the same step.
//! Rolling back a commit restores the caches exactly: counters that drop
//! to zero are removed, so a snapshot taken before the commit compares
//! equal to the caches after the rollback.

use std::cell::OnceCell;
use std::collections::HashMap;

use tracing::trace;

use super::problem::TimetableProblem;
use crate::models::Timetable;

/// One committed (class, slot) assignment, by input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Class position.
    pub class: usize,
    /// Slot position.
    pub slot: usize,
    /// Teacher position.
    pub teacher: usize,
    /// Subject position.
    pub subject: usize,
}

/// Counters derived from the timetable, kept in step with it.
///
/// | Cache | Key | Value |
/// |-------|-----|-------|
/// | occupancy | (slot, teacher) | class being taught |
/// | teacher hours | (teacher, day) | periods taught |
/// | daily subject count | (class, subject, day) | occurrences |
/// | weekly subject count | (class, subject) | occurrences |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintCaches {
    occupancy: HashMap<(usize, usize), usize>,
    teacher_hours: HashMap<(usize, usize), u32>,
    daily_subjects: HashMap<(usize, usize, usize), u32>,
    weekly_subjects: HashMap<(usize, usize), u32>,
}

impl ConstraintCaches {
    /// Class the teacher is teaching at the slot, if any.
    pub fn class_taught_at(&self, slot: usize, teacher: usize) -> Option<usize> {
        self.occupancy.get(&(slot, teacher)).copied()
    }

    /// Whether the teacher is already teaching at the slot.
    #[inline]
    pub fn is_busy(&self, slot: usize, teacher: usize) -> bool {
        self.occupancy.contains_key(&(slot, teacher))
    }

    /// Periods the teacher teaches on the day.
    #[inline]
    pub fn teacher_hours(&self, teacher: usize, day: usize) -> u32 {
        self.teacher_hours.get(&(teacher, day)).copied().unwrap_or(0)
    }

    /// Occurrences of the subject for the class on the day.
    #[inline]
    pub fn daily_subject_count(&self, class: usize, subject: usize, day: usize) -> u32 {
        self.daily_subjects
            .get(&(class, subject, day))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrences of the subject for the class this week.
    #[inline]
    pub fn weekly_subject_count(&self, class: usize, subject: usize) -> u32 {
        self.weekly_subjects
            .get(&(class, subject))
            .copied()
            .unwrap_or(0)
    }

    /// Number of occupied (slot, teacher) pairs.
    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }

    fn record(&mut self, p: &Placement, day: usize) {
        let previous = self.occupancy.insert((p.slot, p.teacher), p.class);
        assert!(
            previous.is_none(),
            "teacher {} double-booked at slot {}",
            p.teacher,
            p.slot
        );
        *self.teacher_hours.entry((p.teacher, day)).or_insert(0) += 1;
        *self
            .daily_subjects
            .entry((p.class, p.subject, day))
            .or_insert(0) += 1;
        *self.weekly_subjects.entry((p.class, p.subject)).or_insert(0) += 1;
    }

    fn erase(&mut self, p: &Placement, day: usize) {
        let removed = self.occupancy.remove(&(p.slot, p.teacher));
        assert_eq!(removed, Some(p.class), "occupancy out of step with timetable");
        decrement(&mut self.teacher_hours, (p.teacher, day));
        decrement(&mut self.daily_subjects, (p.class, p.subject, day));
        decrement(&mut self.weekly_subjects, (p.class, p.subject));
    }
}

fn decrement<K: std::hash::Hash + Eq>(map: &mut HashMap<K, u32>, key: K) {
    match map.get_mut(&key) {
        Some(n) if *n > 1 => *n -= 1,
        Some(_) => {
            map.remove(&key);
        }
        None => panic!("counter underflow during rollback"),
    }
}

/// Lazily evaluated teacher availability per (teacher, slot).
///
/// Availability depends only on the input, so it is kept apart from the
/// caches that commits and rollbacks touch.
#[derive(Debug)]
pub struct AvailabilityMemo {
    cells: Vec<OnceCell<bool>>,
    slot_count: usize,
}

impl AvailabilityMemo {
    /// Creates an empty memo sized for the problem.
    pub fn new(problem: &TimetableProblem) -> Self {
        let slot_count = problem.slots().len();
        Self {
            cells: (0..problem.teachers().len() * slot_count)
                .map(|_| OnceCell::new())
                .collect(),
            slot_count,
        }
    }

    /// Whether the teacher's declared windows cover the slot.
    pub fn is_available(&self, problem: &TimetableProblem, teacher: usize, slot: usize) -> bool {
        *self.cells[teacher * self.slot_count + slot].get_or_init(|| {
            let s = &problem.slots()[slot];
            problem.teachers()[teacher].is_available(&s.day, s.start_time, s.end_time)
        })
    }
}

/// The timetable being built, with its caches and undo log.
#[derive(Debug, Clone)]
pub struct SearchState {
    timetable: Timetable,
    caches: ConstraintCaches,
    undo_log: Vec<Placement>,
}

impl SearchState {
    /// Creates an empty timetable (special cells pre-set) with empty caches.
    pub fn new(problem: &TimetableProblem) -> Self {
        Self {
            timetable: Timetable::new(problem.classes(), problem.slots().to_vec()),
            caches: ConstraintCaches::default(),
            undo_log: Vec::new(),
        }
    }

    /// The timetable.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The constraint caches.
    pub fn caches(&self) -> &ConstraintCaches {
        &self.caches
    }

    /// Number of commits not yet rolled back.
    pub fn depth(&self) -> usize {
        self.undo_log.len()
    }

    /// Consumes the state, returning the timetable.
    pub fn into_timetable(self) -> Timetable {
        self.timetable
    }

    /// Writes the placement into the timetable and updates every cache.
    ///
    /// # Panics
    /// Panics if the cell is special or already assigned, or if the
    /// teacher is already busy at the slot.
    pub fn commit(&mut self, problem: &TimetableProblem, placement: Placement) {
        let cell = self.timetable.cell(placement.class, placement.slot);
        assert!(cell.is_free(), "commit into a cell that is not free");

        let day = problem.slots()[placement.slot].day_index;
        self.caches.record(&placement, day);
        self.timetable.assign(
            placement.class,
            placement.slot,
            &problem.teachers()[placement.teacher].id,
            &problem.subjects()[placement.subject].id,
        );
        self.undo_log.push(placement);
        trace!(
            event = "commit",
            class = placement.class,
            slot = placement.slot,
            teacher = placement.teacher,
            subject = placement.subject
        );
    }

    /// Reverts the most recent commit. Returns `None` when nothing is left to undo.
    pub fn rollback(&mut self, problem: &TimetableProblem) -> Option<Placement> {
        let placement = self.undo_log.pop()?;
        let cell = self.timetable.cell(placement.class, placement.slot);
        assert_eq!(
            cell.teacher_id.as_deref(),
            Some(problem.teachers()[placement.teacher].id.as_str()),
            "rollback of a cell that was overwritten"
        );

        let day = problem.slots()[placement.slot].day_index;
        self.caches.erase(&placement, day);
        self.timetable.clear(placement.class, placement.slot);
        trace!(event = "rollback", class = placement.class, slot = placement.slot);
        Some(placement)
    }
}
