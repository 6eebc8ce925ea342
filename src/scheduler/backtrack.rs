//! Depth-first backtracking over the cells left after pre-fill.
//!
//! # Algorithm
//!
//! 1. No pending cells: solved.
//! 2. The slot selector picks the next cell (MRV by default).
//! 3. Each legal ranked candidate is committed and the rest is searched.
//!    Success propagates at once; failure rolls the commit back and tries
//!    the next candidate.
//! 4. When no candidate succeeds the cell is left free and the search
//!    continues. With a free-cell allowance (strict mode) exceeding it
//!    fails the branch instead.
//!
//! Only one branch is live at a time: the state is mutated in place and
//! restored through its undo log. Open cells are kept on an explicit
//! stack, so depth is bounded by memory rather than the thread stack.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6.3

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::heuristics::{Heuristics, PendingSlot, SearchContext};

use super::candidates::{ranked_candidates, Candidate};
use super::consistency::is_legal;
use super::problem::TimetableProblem;
use super::state::{AvailabilityMemo, Placement, SearchState};

/// How a search (or a branch of it) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every pending cell was resolved (assigned or left free).
    Solved,
    /// No branch satisfies the free-cell allowance.
    Failed,
    /// The node budget ran out; the state holds a consistent partial grid.
    BudgetExhausted,
}

/// Counters collected over a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Cells assigned by the greedy pre-fill.
    pub prefilled: usize,
    /// Cells handed to the search (summed over search passes).
    pub searched_slots: usize,
    /// Search nodes visited.
    pub nodes: u64,
    /// Commits rolled back.
    pub backtracks: u64,
    /// Times a cell was left free by the fallback rule.
    pub free_fallbacks: u64,
    /// Whether the node budget ran out.
    pub budget_exhausted: bool,
}

/// Depth-first search driver.
pub struct Backtracker<'a> {
    problem: &'a TimetableProblem,
    memo: &'a AvailabilityMemo,
    heuristics: &'a Heuristics,
    max_nodes: Option<u64>,
    free_allowance: Option<usize>,
    free_used: usize,
    stats: SearchStats,
}

impl<'a> Backtracker<'a> {
    /// Creates a driver. The node budget comes from the configuration.
    pub fn new(
        problem: &'a TimetableProblem,
        memo: &'a AvailabilityMemo,
        heuristics: &'a Heuristics,
    ) -> Self {
        Self {
            problem,
            memo,
            heuristics,
            max_nodes: problem.config().max_search_steps,
            free_allowance: None,
            free_used: 0,
            stats: SearchStats::default(),
        }
    }

    /// Searches the pending cells, leaving at most `free_allowance` of them free.
    pub fn run(
        &mut self,
        state: &mut SearchState,
        mut pending: Vec<PendingSlot>,
        free_allowance: Option<usize>,
    ) -> SearchOutcome {
        self.free_allowance = free_allowance;
        self.free_used = 0;
        self.stats.searched_slots += pending.len();
        self.search(state, &mut pending)
    }

    /// Counters so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Consumes the driver, returning its counters.
    pub fn into_stats(self) -> SearchStats {
        self.stats
    }

    fn search(&mut self, state: &mut SearchState, pending: &mut Vec<PendingSlot>) -> SearchOutcome {
        let mut open: Vec<Branch> = Vec::new();
        loop {
            if pending.is_empty() {
                return SearchOutcome::Solved;
            }
            if self.max_nodes.is_some_and(|max| self.stats.nodes >= max) {
                self.stats.budget_exhausted = true;
                return SearchOutcome::BudgetExhausted;
            }
            self.stats.nodes += 1;

            let (index, candidates) = {
                let context = SearchContext::new(self.problem, state, self.memo);
                let index = self
                    .heuristics
                    .slot_selector()
                    .select(pending, &context)
                    .min(pending.len() - 1);
                let cell = pending[index];
                let candidates =
                    ranked_candidates(&context, self.heuristics.scorer(), cell.class, cell.slot);
                (index, candidates)
            };
            let cell = pending.remove(index);
            open.push(Branch {
                index,
                cell,
                candidates,
                next: 0,
                freed: false,
            });

            // Move the deepest cell to its next choice, unwinding the ones
            // that have none left.
            loop {
                let advanced = match open.last_mut() {
                    Some(branch) => self.advance(state, branch),
                    None => return SearchOutcome::Failed,
                };
                if advanced {
                    break;
                }
                if let Some(branch) = open.pop() {
                    if branch.freed {
                        self.free_used -= 1;
                    }
                    pending.insert(branch.index, branch.cell);
                }
                if open.last().is_some_and(|parent| !parent.freed) {
                    let undone = state.rollback(self.problem);
                    debug_assert!(undone.is_some());
                    self.stats.backtracks += 1;
                }
            }
        }
    }

    /// Commits the next legal candidate of the cell, or leaves it free once
    /// the candidates are exhausted. Returns `false` when neither is possible.
    fn advance(&mut self, state: &mut SearchState, branch: &mut Branch) -> bool {
        let cell = branch.cell;
        while let Some(&candidate) = branch.candidates.get(branch.next) {
            branch.next += 1;
            let legal = {
                let context = SearchContext::new(self.problem, state, self.memo);
                is_legal(&context, cell.class, cell.slot, candidate.teacher, candidate.subject)
            };
            if legal {
                state.commit(
                    self.problem,
                    Placement {
                        class: cell.class,
                        slot: cell.slot,
                        teacher: candidate.teacher,
                        subject: candidate.subject,
                    },
                );
                return true;
            }
        }

        if branch.freed
            || self
                .free_allowance
                .is_some_and(|allowed| self.free_used >= allowed)
        {
            return false;
        }
        trace!(event = "free_fallback", class = cell.class, slot = cell.slot);
        branch.freed = true;
        self.free_used += 1;
        self.stats.free_fallbacks += 1;
        true
    }
}

/// A cell taken off the pending list, with the choices still to try.
struct Branch {
    /// Position the cell held in the pending list.
    index: usize,
    cell: PendingSlot,
    candidates: Vec<Candidate>,
    next: usize,
    /// The cell is currently left free.
    freed: bool,
}

/// Free regular cells, ordered for the search.
///
/// Classes with more total credits come first, then classes with more
/// subjects; input order and chronological order break ties.
pub fn pending_slots(problem: &TimetableProblem, state: &SearchState) -> Vec<PendingSlot> {
    let timetable = state.timetable();
    let mut classes: Vec<usize> = (0..problem.classes().len()).collect();
    classes.sort_by(|&a, &b| {
        problem
            .class_credits(b)
            .cmp(&problem.class_credits(a))
            .then_with(|| {
                let subjects = |c: usize| problem.classes()[c].subjects.len();
                subjects(b).cmp(&subjects(a))
            })
    });

    classes
        .into_iter()
        .flat_map(|class| {
            (0..problem.slots().len())
                .filter(move |&slot| timetable.cell(class, slot).is_free())
                .map(move |slot| PendingSlot::new(class, slot))
        })
        .collect()
}
