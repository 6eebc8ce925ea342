//! Timetable quality metrics (KPIs).
//!
//! The search reports success even when cells stay free, so consumers
//! judge a timetable by these indicators instead.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assignable cells | Regular (non-special) class × slot cells |
//! | Free ratio | Free cells / assignable cells |
//! | Remaining sessions | Sum of max(0, weekly sessions - assigned) per class |
//! | Teacher daily load | Periods taught per teacher per day |
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", Sec. 2

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::generator::remaining_for_class;
use super::problem::TimetableProblem;
use crate::models::Timetable;

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Regular cells across all classes.
    pub assignable_cells: usize,
    /// Cells with a teacher and subject.
    pub assigned_cells: usize,
    /// Regular cells left free.
    pub free_cells: usize,
    /// Special-period cells.
    pub special_cells: usize,
    /// Free cells / assignable cells (0.0..1.0).
    pub free_ratio: f64,
    /// Missing weekly sessions per class ID.
    pub remaining_sessions_by_class: HashMap<String, u32>,
    /// Sum of `remaining_sessions_by_class`.
    pub total_remaining_sessions: u32,
    /// Periods taught per teacher ID, one entry per configured day.
    pub teacher_daily_load: HashMap<String, Vec<u32>>,
    /// Largest single-day load of any teacher.
    pub max_teacher_daily_load: u32,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and the problem it solves.
    pub fn calculate(problem: &TimetableProblem, timetable: &Timetable) -> Self {
        let assignable_cells = timetable.assignable_count();
        let assigned_cells = timetable.assigned_count();
        let free_cells = timetable.free_count();
        let special_cells = timetable.special_count();

        let free_ratio = if assignable_cells == 0 {
            0.0
        } else {
            free_cells as f64 / assignable_cells as f64
        };

        let remaining_sessions_by_class: HashMap<String, u32> = problem
            .classes()
            .iter()
            .enumerate()
            .map(|(c, class)| (class.id.clone(), remaining_for_class(problem, timetable, c)))
            .collect();
        let total_remaining_sessions = remaining_sessions_by_class.values().sum();

        let days = problem.day_count();
        let mut teacher_daily_load: HashMap<String, Vec<u32>> = problem
            .teachers()
            .iter()
            .map(|t| (t.id.clone(), vec![0; days]))
            .collect();
        for teacher in problem.teachers() {
            for (slot, _, _) in timetable.assignments_for_teacher(&teacher.id) {
                if let Some(load) = teacher_daily_load.get_mut(&teacher.id) {
                    load[slot.day_index] += 1;
                }
            }
        }
        let max_teacher_daily_load = teacher_daily_load
            .values()
            .flat_map(|loads| loads.iter().copied())
            .max()
            .unwrap_or(0);

        Self {
            assignable_cells,
            assigned_cells,
            free_cells,
            special_cells,
            free_ratio,
            remaining_sessions_by_class,
            total_remaining_sessions,
            teacher_daily_load,
            max_teacher_daily_load,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_free_ratio: f64, max_remaining_sessions: u32) -> bool {
        self.free_ratio <= max_free_ratio && self.total_remaining_sessions <= max_remaining_sessions
    }
}
