//! School timetable generation for the U-Engine ecosystem.
//!
//! Assigns teachers and subjects to the periods of a weekly grid for a set
//! of class groups, under hard constraints (qualification, availability,
//! no double-booking, daily workload caps, per-day and per-week subject
//! caps) and a soft ranking (subject credits, teacher rating, primary
//! subject bonus).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `ClassGroup`, `Subject`,
//!   `TimeSlot`, `Timetable`, `Assignment`
//! - **`config`**: `TimetableConfig`, loadable from TOML
//! - **`grid`**: Time grid construction from the configured day window
//! - **`validation`**: Input integrity checks (duplicate IDs, unstaffed subjects, caps)
//! - **`normalize`**: Supplier-side defaulting of loosely filled records
//! - **`heuristics`**: Pluggable slot selection (MRV) and candidate scoring
//! - **`scheduler`**: Greedy pre-fill, backtracking search, views and KPIs
//!
//! # Example
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//! use u_timetable::models::{ClassGroup, Subject, Teacher};
//!
//! let teachers = vec![
//!     Teacher::new("T1").with_name("Ada").with_primary_subject("MATH").with_max_daily_hours(4),
//!     Teacher::new("T2").with_name("Ben").with_subject("ENG").with_max_daily_hours(4),
//! ];
//! let classes = vec![ClassGroup::new("9A").with_subject("MATH").with_subject("ENG")];
//! let subjects = vec![
//!     Subject::new("MATH").with_credits(4).with_weekly_sessions(3),
//!     Subject::new("ENG").with_credits(3).with_weekly_sessions(2),
//! ];
//! let config = TimetableConfig::new(
//!     vec!["Mon".into(), "Tue".into(), "Wed".into()],
//!     "08:00",
//!     "10:00",
//!     1.0,
//! );
//!
//! let result = u_timetable::generate(teachers, classes, subjects, config).unwrap();
//! assert!(result.success());
//! assert_eq!(result.remaining_required_sessions("9A"), Some(0));
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 6

pub mod config;
pub mod error;
pub mod grid;
pub mod heuristics;
pub mod models;
pub mod normalize;
pub mod scheduler;
pub mod validation;

pub use config::TimetableConfig;
pub use error::{ConfigError, Result, TimetableError};
pub use scheduler::{generate, GenerationResult, TimetableGenerator, TimetableProblem};
