//! Slot ordering and candidate ranking heuristics.
//!
//! Both the greedy pre-fill and the backtracking search consult two
//! policies: which pending slot to branch on next, and how to rank the
//! (teacher, subject) candidates of a slot. They are traits so that
//! alternatives can be swapped in and benchmarked without touching the
//! search itself.
//!
//! # Usage
//!
//! ```
//! use u_timetable::heuristics::{rules, Heuristics};
//!
//! let heuristics = Heuristics::new()
//!     .with_slot_selector(rules::LeastFilledDay)
//!     .with_scorer(rules::CreditRatingScorer);
//!
//! assert_eq!(heuristics.slot_selector().name(), "LEAST_FILLED_DAY");
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6.3
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod context;
pub mod rules;

pub use context::{PendingSlot, SearchContext};

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{Subject, Teacher};

/// Chooses which pending slot the search branches on next.
pub trait SlotSelector: Send + Sync + Debug {
    /// Selector name (e.g., "MRV").
    fn name(&self) -> &'static str;

    /// Returns the index into `pending` of the slot to resolve next.
    ///
    /// `pending` is never empty. Ties must resolve to the lowest index.
    fn select(&self, pending: &[PendingSlot], context: &SearchContext<'_>) -> usize;

    /// Selector description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Ranks a (teacher, subject) candidate. Higher score = tried first.
///
/// Scorers are pure: they see only the immutable records.
pub trait CandidateScorer: Send + Sync + Debug {
    /// Scorer name.
    fn name(&self) -> &'static str;

    /// Scores a teacher teaching a subject.
    fn score(&self, teacher: &Teacher, subject: &Subject, is_primary: bool) -> f64;
}

/// The pair of policies used by a generation run.
#[derive(Debug, Clone)]
pub struct Heuristics {
    selector: Arc<dyn SlotSelector>,
    scorer: Arc<dyn CandidateScorer>,
}

impl Heuristics {
    /// MRV slot selection with credit/rating scoring.
    pub fn new() -> Self {
        Self {
            selector: Arc::new(rules::MinimumRemainingValues::default()),
            scorer: Arc::new(rules::CreditRatingScorer),
        }
    }

    /// Replaces the slot selector.
    pub fn with_slot_selector<S: SlotSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    /// Replaces the candidate scorer.
    pub fn with_scorer<S: CandidateScorer + 'static>(mut self, scorer: S) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    /// The slot selector.
    pub fn slot_selector(&self) -> &dyn SlotSelector {
        self.selector.as_ref()
    }

    /// The candidate scorer.
    pub fn scorer(&self) -> &dyn CandidateScorer {
        self.scorer.as_ref()
    }
}

impl Default for Heuristics {
    fn default() -> Self {
        Self::new()
    }
}
