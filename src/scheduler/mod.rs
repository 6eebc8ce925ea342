//! Timetable generation: caches, greedy pre-fill, backtracking search and KPIs.
//!
//! # Algorithm
//!
//! 1. [`TimetableProblem`] validates the input and builds the slot grid.
//! 2. The greedy pre-fill gives every cell the first legal entry of its
//!    ranked candidates, when there is one.
//! 3. The backtracking search resolves the remaining cells, branching on
//!    the most constrained cell first (MRV) and leaving unfillable cells
//!    free.
//!
//! Every commit goes through [`SearchState`], which keeps the constraint
//! caches in step with the timetable and rolls back exactly.
//!
//! # KPI
//!
//! [`TimetableKpi`] reports free-cell density, missing weekly sessions and
//! teacher load.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

mod backtrack;
mod candidates;
mod consistency;
mod generator;
mod greedy;
mod kpi;
mod problem;
mod state;

#[cfg(test)]
mod random_instances;

pub use backtrack::{pending_slots, Backtracker, SearchOutcome, SearchStats};
pub use candidates::{count_candidates, ranked_candidates, remaining_sessions, Candidate};
pub use consistency::{audit, is_legal, Violation};
pub use generator::{generate, GenerationResult, TimetableGenerator};
pub use greedy::greedy_prefill;
pub use kpi::TimetableKpi;
pub use problem::TimetableProblem;
pub use state::{AvailabilityMemo, ConstraintCaches, Placement, SearchState};
