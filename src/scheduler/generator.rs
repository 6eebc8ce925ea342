//! Generation pipeline and its result.
//!
//! `validate → grid → greedy pre-fill → backtracking → result`.
//!
//! By default the search never fails: a cell that cannot be filled is left
//! free, so `success` is `true` unless the step budget runs out. Callers
//! judge quality from [`GenerationResult::kpi`] or
//! [`GenerationResult::remaining_required_sessions`]. With
//! `max_free_ratio` set (strict mode) the run reports `success == false`
//! when no timetable within the free-cell allowance is found, and still
//! returns the best-effort grid.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::TimetableConfig;
use crate::error::Result;
use crate::heuristics::{CandidateScorer, Heuristics, SlotSelector};
use crate::models::{
    ClassGroup, ClassScheduleRow, Subject, Teacher, TeacherScheduleRow, Timetable, FREE_LABEL,
    STAFF_ROOM,
};

use super::backtrack::{pending_slots, Backtracker, SearchOutcome, SearchStats};
use super::consistency::audit;
use super::greedy::greedy_prefill;
use super::kpi::TimetableKpi;
use super::problem::TimetableProblem;
use super::state::{AvailabilityMemo, SearchState};

/// Runs the generation pipeline with configurable heuristics.
///
/// # Example
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::models::{ClassGroup, Subject, Teacher};
/// use u_timetable::scheduler::{TimetableGenerator, TimetableProblem};
///
/// let problem = TimetableProblem::new(
///     vec![Teacher::new("T1").with_subject("MATH").with_max_daily_hours(4)],
///     vec![ClassGroup::new("9A").with_subject("MATH")],
///     vec![Subject::new("MATH").with_credits(4)],
///     TimetableConfig::new(vec!["Mon".into()], "09:00", "11:00", 1.0),
/// ).unwrap();
///
/// let result = TimetableGenerator::new().generate(problem);
/// assert!(result.success());
/// assert_eq!(result.timetable().assigned_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    heuristics: Heuristics,
}

impl TimetableGenerator {
    /// Creates a generator with the default heuristics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both heuristics.
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Replaces the slot selector.
    pub fn with_slot_selector<S: SlotSelector + 'static>(mut self, selector: S) -> Self {
        self.heuristics = self.heuristics.with_slot_selector(selector);
        self
    }

    /// Replaces the candidate scorer.
    pub fn with_scorer<S: CandidateScorer + 'static>(mut self, scorer: S) -> Self {
        self.heuristics = self.heuristics.with_scorer(scorer);
        self
    }

    /// The heuristics in use.
    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Generates a timetable for a validated problem.
    pub fn generate(&self, problem: TimetableProblem) -> GenerationResult {
        let started = Instant::now();
        info!(
            event = "generation_start",
            teachers = problem.teachers().len(),
            classes = problem.classes().len(),
            subjects = problem.subjects().len(),
            slots = problem.slots().len(),
            selector = self.heuristics.slot_selector().name(),
            scorer = self.heuristics.scorer().name()
        );

        let memo = AvailabilityMemo::new(&problem);
        let mut state = SearchState::new(&problem);

        let prefilled = greedy_prefill(&problem, &mut state, &memo, self.heuristics.scorer());
        info!(
            event = "prefill_done",
            prefilled,
            elapsed_ms = started.elapsed().as_millis() as u64
        );

        let allowance = problem.config().max_free_ratio.map(|ratio| {
            (ratio * state.timetable().assignable_count() as f64).floor() as usize
        });
        let snapshot = allowance.map(|_| state.clone());

        let mut search = Backtracker::new(&problem, &memo, &self.heuristics);
        let pending = pending_slots(&problem, &state);
        let mut outcome = search.run(&mut state, pending, allowance);

        if outcome == SearchOutcome::Failed {
            // Pre-fill choices are never revisited by the search; retry without them.
            info!(event = "strict_retry", prefilled);
            while state.rollback(&problem).is_some() {}
            let pending = pending_slots(&problem, &state);
            outcome = search.run(&mut state, pending, allowance);
        }
        if outcome == SearchOutcome::Failed {
            warn!(
                event = "strict_failed",
                allowance = allowance.unwrap_or(0),
                "no timetable within the free-cell allowance"
            );
            if let Some(snapshot) = snapshot {
                state = snapshot;
            }
            let pending = pending_slots(&problem, &state);
            let best_effort = search.run(&mut state, pending, None);
            debug!(event = "best_effort", outcome = ?best_effort);
        }

        let mut stats = search.into_stats();
        stats.prefilled = prefilled;
        if stats.budget_exhausted {
            warn!(event = "budget_exhausted", nodes = stats.nodes, "search step budget ran out");
        }
        let success = outcome == SearchOutcome::Solved;

        debug_assert!(
            audit(&problem, state.timetable()).is_empty(),
            "generated timetable violates a hard constraint"
        );
        let timetable = state.into_timetable();
        info!(
            event = "generation_done",
            success,
            assigned = timetable.assigned_count(),
            free = timetable.free_count(),
            nodes = stats.nodes,
            backtracks = stats.backtracks,
            elapsed_ms = started.elapsed().as_millis() as u64
        );
        debug!(event = "search_stats", ?stats);

        GenerationResult {
            problem,
            timetable,
            success,
            stats,
        }
    }
}

/// Validates the input and generates a timetable with default heuristics.
///
/// # Errors
/// Configuration errors and data-integrity findings, before any search.
pub fn generate(
    teachers: Vec<Teacher>,
    classes: Vec<ClassGroup>,
    subjects: Vec<Subject>,
    config: TimetableConfig,
) -> Result<GenerationResult> {
    let problem = TimetableProblem::new(teachers, classes, subjects, config)?;
    Ok(TimetableGenerator::new().generate(problem))
}

/// A generated timetable with the input it was built from.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    problem: TimetableProblem,
    timetable: Timetable,
    success: bool,
    stats: SearchStats,
}

impl GenerationResult {
    /// The generated timetable.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// The input.
    pub fn problem(&self) -> &TimetableProblem {
        &self.problem
    }

    /// Whether the search completed (see the module docs).
    pub fn success(&self) -> bool {
        self.success
    }

    /// Search counters.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Consumes the result, returning the timetable.
    pub fn into_timetable(self) -> Timetable {
        self.timetable
    }

    /// Rows of a class timetable, ordered by day then time.
    ///
    /// Returns `None` for an unknown class.
    pub fn class_schedule(&self, class_id: &str) -> Option<Vec<ClassScheduleRow>> {
        self.problem.class_position(class_id)?;
        let rows = self
            .timetable
            .assignments_for_class(class_id)
            .into_iter()
            .map(|(slot, cell)| {
                let subject = match cell.subject_id.as_deref() {
                    Some(id) => self.subject_name(id),
                    None => cell
                        .special_type
                        .clone()
                        .unwrap_or_else(|| FREE_LABEL.to_string()),
                };
                let teacher = cell
                    .teacher_id
                    .as_deref()
                    .map(|id| self.teacher_name(id))
                    .unwrap_or_else(|| FREE_LABEL.to_string());
                ClassScheduleRow {
                    day: slot.day.clone(),
                    time: slot.time_range(),
                    subject,
                    teacher,
                    room: cell.room.clone(),
                    is_special_period: cell.is_special_period,
                }
            })
            .collect();
        Some(rows)
    }

    /// Rows of a teacher timetable: one per slot, idle slots included.
    ///
    /// Returns `None` for an unknown teacher.
    pub fn teacher_schedule(&self, teacher_id: &str) -> Option<Vec<TeacherScheduleRow>> {
        self.problem.teacher_position(teacher_id)?;
        let taught = self.timetable.assignments_for_teacher(teacher_id);
        let rows = self
            .timetable
            .slots()
            .iter()
            .map(|slot| {
                let lesson = taught.iter().find(|(s, _, _)| *s == slot);
                match lesson {
                    Some((_, class_id, cell)) => TeacherScheduleRow {
                        day: slot.day.clone(),
                        time: slot.time_range(),
                        class: self.class_name(class_id),
                        subject: cell
                            .subject_id
                            .as_deref()
                            .map(|id| self.subject_name(id))
                            .unwrap_or_else(|| FREE_LABEL.to_string()),
                        room: cell.room.clone(),
                    },
                    None => TeacherScheduleRow {
                        day: slot.day.clone(),
                        time: slot.time_range(),
                        class: FREE_LABEL.to_string(),
                        subject: FREE_LABEL.to_string(),
                        room: STAFF_ROOM.to_string(),
                    },
                }
            })
            .collect();
        Some(rows)
    }

    /// Weekly sessions the class still lacks: the sum over its subjects of
    /// `max(0, weekly_sessions - assigned)`.
    ///
    /// Returns `None` for an unknown class.
    pub fn remaining_required_sessions(&self, class_id: &str) -> Option<u32> {
        let class = self.problem.class_position(class_id)?;
        Some(remaining_for_class(&self.problem, &self.timetable, class))
    }

    /// Quality indicators of the timetable.
    pub fn kpi(&self) -> TimetableKpi {
        TimetableKpi::calculate(&self.problem, &self.timetable)
    }

    fn subject_name(&self, id: &str) -> String {
        self.problem
            .subject_position(id)
            .map(|s| self.problem.subjects()[s].label().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    fn teacher_name(&self, id: &str) -> String {
        match self.problem.teacher_position(id) {
            Some(t) if !self.problem.teachers()[t].name.is_empty() => {
                self.problem.teachers()[t].name.clone()
            }
            _ => id.to_string(),
        }
    }

    fn class_name(&self, id: &str) -> String {
        self.problem
            .class_position(id)
            .map(|c| self.problem.classes()[c].label().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

pub(crate) fn remaining_for_class(
    problem: &TimetableProblem,
    timetable: &Timetable,
    class: usize,
) -> u32 {
    let class_id = &problem.classes()[class].id;
    problem
        .priority_subjects(class)
        .iter()
        .map(|&s| {
            let subject = &problem.subjects()[s];
            let assigned = timetable.subject_count(class_id, &subject.id) as u32;
            subject.weekly_sessions.saturating_sub(assigned)
        })
        .sum()
}
