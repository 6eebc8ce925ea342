//! Greedy pre-fill.
//!
//! Class by class, day by day, chronologically: every free regular cell
//! takes the first legal entry of its ranked candidates. Nothing is revisited, so the
//! backtracking search only sees the cells left over.

use tracing::trace;

use crate::heuristics::{CandidateScorer, SearchContext};

use super::candidates::ranked_candidates;
use super::consistency::is_legal;
use super::problem::TimetableProblem;
use super::state::{AvailabilityMemo, Placement, SearchState};

/// Fills what can be filled without search. Returns the number of commits.
pub fn greedy_prefill(
    problem: &TimetableProblem,
    state: &mut SearchState,
    memo: &AvailabilityMemo,
    scorer: &dyn CandidateScorer,
) -> usize {
    let mut committed = 0;
    for class in 0..problem.classes().len() {
        for slot in 0..problem.slots().len() {
            if !state.timetable().cell(class, slot).is_free() {
                continue;
            }
            let best = {
                let context = SearchContext::new(problem, state, memo);
                ranked_candidates(&context, scorer, class, slot)
                    .into_iter()
                    .find(|c| is_legal(&context, class, slot, c.teacher, c.subject))
            };
            match best {
                Some(c) => {
                    state.commit(
                        problem,
                        Placement {
                            class,
                            slot,
                            teacher: c.teacher,
                            subject: c.subject,
                        },
                    );
                    committed += 1;
                }
                None => trace!(event = "prefill_skip", class, slot),
            }
        }
    }
    committed
}
