//! Read-only search context passed to heuristics.

use crate::models::{ClassGroup, TimeSlot};
use crate::scheduler::{AvailabilityMemo, ConstraintCaches, SearchState, TimetableProblem};

/// A regular (class, slot) cell still waiting for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingSlot {
    /// Class position.
    pub class: usize,
    /// Slot position.
    pub slot: usize,
}

impl PendingSlot {
    /// Creates a pending slot.
    pub fn new(class: usize, slot: usize) -> Self {
        Self { class, slot }
    }

    /// The class record.
    pub fn class_group<'a>(&self, problem: &'a TimetableProblem) -> &'a ClassGroup {
        &problem.classes()[self.class]
    }

    /// The slot record.
    pub fn time_slot<'a>(&self, problem: &'a TimetableProblem) -> &'a TimeSlot {
        &problem.slots()[self.slot]
    }
}

/// Snapshot view of a search in progress.
///
/// Borrowed immutably, so heuristics cannot mutate the timetable or its caches.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    problem: &'a TimetableProblem,
    state: &'a SearchState,
    memo: &'a AvailabilityMemo,
}

impl<'a> SearchContext<'a> {
    /// Creates a context.
    pub fn new(
        problem: &'a TimetableProblem,
        state: &'a SearchState,
        memo: &'a AvailabilityMemo,
    ) -> Self {
        Self {
            problem,
            state,
            memo,
        }
    }

    /// The problem being solved.
    pub fn problem(&self) -> &'a TimetableProblem {
        self.problem
    }

    /// The current search state.
    pub fn state(&self) -> &'a SearchState {
        self.state
    }

    /// The current constraint caches.
    pub fn caches(&self) -> &'a ConstraintCaches {
        self.state.caches()
    }

    /// Whether the teacher's availability windows cover the slot (memoized).
    #[inline]
    pub fn is_available(&self, teacher: usize, slot: usize) -> bool {
        self.memo.is_available(self.problem, teacher, slot)
    }

    /// Number of assigned cells of a class on a day.
    pub fn assigned_on_day(&self, class: usize, day_index: usize) -> usize {
        let timetable = self.state.timetable();
        self.problem
            .day_slots(day_index)
            .filter(|&s| timetable.cell(class, s).is_assigned())
            .count()
    }
}
