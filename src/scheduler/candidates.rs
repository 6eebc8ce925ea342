//! Ranked candidate generation for one (class, slot) cell.
//!
//! 1. Walk the class's priority subjects (descending credits).
//! 2. For each, walk the qualified teachers (input order), keeping those
//!    free at the slot: available by their windows and not teaching elsewhere.
//! 3. Score every pair and sort by descending score (stable).
//! 4. Keep the top `branching_limit`.
//! 5. When weekly quotas apply, re-rank the kept set by remaining weekly
//!    sessions (descending), score order breaking ties.
//!
//! Caps (daily hours, per-day and weekly subject counts) are not applied
//! here. Consumers skip the entries that fail [`is_legal`](super::is_legal),
//! so a capped pair still takes one of the `branching_limit` places.

use crate::heuristics::{CandidateScorer, SearchContext};

/// A (teacher, subject) option for a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Teacher position.
    pub teacher: usize,
    /// Subject position.
    pub subject: usize,
    /// Ranking score (higher first).
    pub score: f64,
}

/// Weekly sessions of the subject the class still needs.
pub fn remaining_sessions(context: &SearchContext<'_>, class: usize, subject: usize) -> u32 {
    let quota = context.problem().subjects()[subject].weekly_sessions;
    quota.saturating_sub(context.caches().weekly_subject_count(class, subject))
}

/// Ranked candidates for the class at the slot.
pub fn ranked_candidates(
    context: &SearchContext<'_>,
    scorer: &dyn CandidateScorer,
    class: usize,
    slot: usize,
) -> Vec<Candidate> {
    let problem = context.problem();
    let config = problem.config();

    let mut candidates = Vec::new();
    for &subject in problem.priority_subjects(class) {
        for &teacher in problem.qualified_teachers(subject) {
            if !is_free_at(context, teacher, slot) {
                continue;
            }
            candidates.push(Candidate {
                teacher,
                subject,
                score: scorer.score(
                    &problem.teachers()[teacher],
                    &problem.subjects()[subject],
                    problem.is_primary(teacher, subject),
                ),
            });
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(config.branching_limit.max(1));

    if !config.fill_all_periods {
        candidates.sort_by_key(|c| std::cmp::Reverse(remaining_sessions(context, class, c.subject)));
    }
    candidates
}

/// Number of candidate pairs for the cell, counting at most `cap`.
pub fn count_candidates(context: &SearchContext<'_>, class: usize, slot: usize, cap: usize) -> usize {
    let problem = context.problem();
    let mut count = 0;
    for &subject in problem.priority_subjects(class) {
        for &teacher in problem.qualified_teachers(subject) {
            if is_free_at(context, teacher, slot) {
                count += 1;
                if count >= cap {
                    return count;
                }
            }
        }
    }
    count
}

fn is_free_at(context: &SearchContext<'_>, teacher: usize, slot: usize) -> bool {
    !context.caches().is_busy(slot, teacher) && context.is_available(teacher, slot)
}
