//! Built-in heuristics.
//!
//! # Slot selectors
//!
//! - **MRV**: fewest candidate pairs first (fail-first)
//! - **INPUT_ORDER**: pending slots in priority order
//! - **LEAST_FILLED_DAY**: spread work across a class's days
//!
//! # Scorers
//!
//! - **CREDIT_RATING**: `credits * 10 + rating * 2 + 5 if primary`
//!
//! # Tie-breaking
//! Every selector returns the lowest index among equally good slots.
//!
//! # References
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

use super::{CandidateScorer, PendingSlot, SearchContext, SlotSelector};
use crate::models::{Subject, Teacher};
use crate::scheduler::count_candidates;

/// Counting cap used by [`MinimumRemainingValues`] by default.
///
/// Only "few vs many" matters for ordering, so counting stops here.
pub const MRV_COUNT_CAP: usize = 4;

/// Weight of one subject credit in [`priority_score`].
pub const CREDIT_WEIGHT: f64 = 10.0;

/// Weight of one rating point in [`priority_score`].
pub const RATING_WEIGHT: f64 = 2.0;

/// Bonus for a teacher's primary subject in [`priority_score`].
pub const PRIMARY_BONUS: f64 = 5.0;

/// Ranks a (teacher, subject) pair: `credits*10 + rating*2 + 5 if primary`.
pub fn priority_score(credits: u32, rating: f64, is_primary: bool) -> f64 {
    let bonus = if is_primary { PRIMARY_BONUS } else { 0.0 };
    credits as f64 * CREDIT_WEIGHT + rating * RATING_WEIGHT + bonus
}

// ======================== Slot selectors ========================

/// Minimum Remaining Values.
///
/// Picks the pending slot with the fewest candidate pairs (qualified
/// teachers free at the slot), so dead ends surface early. Counting stops at `cap`.
#[derive(Debug, Clone, Copy)]
pub struct MinimumRemainingValues {
    cap: usize,
}

impl MinimumRemainingValues {
    /// Creates the selector with a custom counting cap (at least 1).
    pub fn with_cap(cap: usize) -> Self {
        Self { cap: cap.max(1) }
    }

    /// The counting cap.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for MinimumRemainingValues {
    fn default() -> Self {
        Self { cap: MRV_COUNT_CAP }
    }
}

impl SlotSelector for MinimumRemainingValues {
    fn name(&self) -> &'static str {
        "MRV"
    }

    fn select(&self, pending: &[PendingSlot], context: &SearchContext<'_>) -> usize {
        let mut best = 0;
        let mut best_count = usize::MAX;
        for (i, p) in pending.iter().enumerate() {
            let count = count_candidates(context, p.class, p.slot, self.cap);
            if count < best_count {
                best = i;
                best_count = count;
                if count == 0 {
                    break;
                }
            }
        }
        best
    }

    fn description(&self) -> &'static str {
        "Minimum Remaining Values"
    }
}

/// Takes pending slots in their priority order.
#[derive(Debug, Clone, Copy)]
pub struct InputOrder;

impl SlotSelector for InputOrder {
    fn name(&self) -> &'static str {
        "INPUT_ORDER"
    }

    fn select(&self, _pending: &[PendingSlot], _context: &SearchContext<'_>) -> usize {
        0
    }

    fn description(&self) -> &'static str {
        "First pending slot in priority order"
    }
}

/// Least-filled class day.
///
/// Picks the pending slot whose (class, day) currently has the fewest
/// assigned periods, interleaving work across days.
#[derive(Debug, Clone, Copy)]
pub struct LeastFilledDay;

impl SlotSelector for LeastFilledDay {
    fn name(&self) -> &'static str {
        "LEAST_FILLED_DAY"
    }

    fn select(&self, pending: &[PendingSlot], context: &SearchContext<'_>) -> usize {
        let slots = context.problem().slots();
        let mut best = 0;
        let mut best_load = usize::MAX;
        for (i, p) in pending.iter().enumerate() {
            let load = context.assigned_on_day(p.class, slots[p.slot].day_index);
            if load < best_load {
                best = i;
                best_load = load;
            }
        }
        best
    }

    fn description(&self) -> &'static str {
        "Least-filled class day"
    }
}

// ======================== Scorers ========================

/// Subject credit weight, teacher rating and primary-subject bonus.
#[derive(Debug, Clone, Copy)]
pub struct CreditRatingScorer;

impl CandidateScorer for CreditRatingScorer {
    fn name(&self) -> &'static str {
        "CREDIT_RATING"
    }

    fn score(&self, teacher: &Teacher, subject: &Subject, is_primary: bool) -> f64 {
        priority_score(subject.credits, teacher.rating, is_primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::models::{ClassGroup, ClockTime};
    use crate::scheduler::{AvailabilityMemo, Placement, SearchState, TimetableProblem};

    fn problem() -> TimetableProblem {
        let config = TimetableConfig::new(vec!["Mon".into(), "Tue".into()], "09:00", "11:00", 1.0);
        TimetableProblem::new(
            vec![
                Teacher::new("T1")
                    .with_subject("MATH")
                    .with_max_daily_hours(5)
                    .with_availability("Mon", ClockTime::from_hm(9, 0), ClockTime::from_hm(10, 0)),
                Teacher::new("T2").with_subject("ENG").with_max_daily_hours(5),
                Teacher::new("T3").with_subject("ENG").with_max_daily_hours(5),
            ],
            vec![ClassGroup::new("C1").with_subject("MATH").with_subject("ENG")],
            vec![Subject::new("MATH").with_credits(4), Subject::new("ENG")],
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_priority_score() {
        assert!((priority_score(4, 0.0, false) - 40.0).abs() < 1e-10);
        assert!((priority_score(3, 4.5, true) - 44.0).abs() < 1e-10);
        assert!(priority_score(1, 0.0, true) > priority_score(1, 2.0, false));
    }

    #[test]
    fn test_credit_rating_scorer() {
        let t = Teacher::new("T").with_rating(1.5);
        let s = Subject::new("S").with_credits(2);
        assert!((CreditRatingScorer.score(&t, &s, false) - 23.0).abs() < 1e-10);
        assert!((CreditRatingScorer.score(&t, &s, true) - 28.0).abs() < 1e-10);
    }

    #[test]
    fn test_mrv_picks_most_constrained() {
        let p = problem();
        let state = SearchState::new(&p);
        let memo = AvailabilityMemo::new(&p);
        let ctx = SearchContext::new(&p, &state, &memo);

        // Mon 09:00 has MATH/T1, ENG/T2, ENG/T3; Mon 10:00 only the ENG teachers.
        let pending = [PendingSlot::new(0, 0), PendingSlot::new(0, 1)];
        assert_eq!(MinimumRemainingValues::default().select(&pending, &ctx), 1);
        assert_eq!(MinimumRemainingValues::with_cap(1).select(&pending, &ctx), 0);
    }

    #[test]
    fn test_mrv_ties_take_first() {
        let p = problem();
        let state = SearchState::new(&p);
        let memo = AvailabilityMemo::new(&p);
        let ctx = SearchContext::new(&p, &state, &memo);

        let pending = [PendingSlot::new(0, 1), PendingSlot::new(0, 3)];
        assert_eq!(MinimumRemainingValues::default().select(&pending, &ctx), 0);
    }

    #[test]
    fn test_least_filled_day() {
        let p = problem();
        let mut state = SearchState::new(&p);
        state.commit(
            &p,
            Placement {
                class: 0,
                slot: 0,
                teacher: 1,
                subject: 1,
            },
        );
        let memo = AvailabilityMemo::new(&p);
        let ctx = SearchContext::new(&p, &state, &memo);

        let pending = [PendingSlot::new(0, 1), PendingSlot::new(0, 2)];
        assert_eq!(LeastFilledDay.select(&pending, &ctx), 1);
        assert_eq!(InputOrder.select(&pending, &ctx), 0);
    }
}
