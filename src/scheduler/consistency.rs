//! Legality of a single assignment, and a full audit of a finished timetable.
//!
//! [`is_legal`] answers from the caches in O(1); [`audit`] recomputes every
//! hard constraint from the timetable alone and is independent of them.

use std::collections::HashMap;
use std::fmt;

use crate::heuristics::SearchContext;
use crate::models::Timetable;

use super::problem::TimetableProblem;

/// Whether the teacher may teach the subject to the class at the slot.
///
/// True iff the teacher is available at the slot, not already teaching
/// there, below their daily cap, the class is below the per-day subject cap,
/// the weekly quota is not met (unless every period is to be filled), and
/// the teacher is qualified.
pub fn is_legal(
    context: &SearchContext<'_>,
    class: usize,
    slot: usize,
    teacher: usize,
    subject: usize,
) -> bool {
    let problem = context.problem();
    let caches = context.caches();
    let config = problem.config();
    let day = problem.slots()[slot].day_index;
    let t = &problem.teachers()[teacher];

    if !context.is_available(teacher, slot) || caches.is_busy(slot, teacher) {
        return false;
    }
    if let Some(cap) = t.daily_cap() {
        if caches.teacher_hours(teacher, day) >= cap {
            return false;
        }
    }
    if caches.daily_subject_count(class, subject, day) >= config.per_day_subject_cap {
        return false;
    }
    if !config.fill_all_periods
        && caches.weekly_subject_count(class, subject) >= problem.subjects()[subject].weekly_sessions
    {
        return false;
    }
    t.is_qualified(&problem.subjects()[subject].id)
}

/// A hard-constraint violation found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A teacher is assigned to more than one class in a slot.
    DoubleBooked { teacher: String, slot: String },
    /// A teacher exceeds their daily cap.
    DailyHoursExceeded { teacher: String, day: String, hours: u32 },
    /// A subject occurs too often for a class on a day.
    DailySubjectCapExceeded { class: String, subject: String, day: String },
    /// A subject exceeds its weekly sessions for a class.
    WeeklySessionsExceeded { class: String, subject: String },
    /// A teacher teaches a subject they are not qualified for.
    Unqualified { teacher: String, subject: String },
    /// A teacher is assigned outside their availability.
    Unavailable { teacher: String, slot: String },
    /// A special period carries an assignment.
    SpecialAssigned { class: String, slot: String },
    /// A cell references an unknown teacher or subject, or a subject the class does not take.
    UnknownReference { class: String, slot: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoubleBooked { teacher, slot } => {
                write!(f, "teacher {teacher} double-booked at {slot}")
            }
            Self::DailyHoursExceeded { teacher, day, hours } => {
                write!(f, "teacher {teacher} teaches {hours} periods on {day}")
            }
            Self::DailySubjectCapExceeded { class, subject, day } => {
                write!(f, "class {class} has {subject} too often on {day}")
            }
            Self::WeeklySessionsExceeded { class, subject } => {
                write!(f, "class {class} exceeds weekly sessions of {subject}")
            }
            Self::Unqualified { teacher, subject } => {
                write!(f, "teacher {teacher} is not qualified for {subject}")
            }
            Self::Unavailable { teacher, slot } => {
                write!(f, "teacher {teacher} is unavailable at {slot}")
            }
            Self::SpecialAssigned { class, slot } => {
                write!(f, "special period {slot} of class {class} is assigned")
            }
            Self::UnknownReference { class, slot } => {
                write!(f, "class {class} at {slot} references unknown data")
            }
        }
    }
}

/// Recomputes every hard constraint over a timetable.
pub fn audit(problem: &TimetableProblem, timetable: &Timetable) -> Vec<Violation> {
    let config = problem.config();
    let mut violations = Vec::new();
    let mut occupancy: HashMap<(usize, &str), usize> = HashMap::new();
    let mut hours: HashMap<(&str, usize), u32> = HashMap::new();
    let mut daily: HashMap<(&str, &str, usize), u32> = HashMap::new();
    let mut weekly: HashMap<(&str, &str), u32> = HashMap::new();

    for (c, row) in timetable.classes().iter().enumerate() {
        let class = &problem.classes()[c];
        for (s, cell) in row.cells.iter().enumerate() {
            let slot = &timetable.slots()[s];
            let (Some(tid), Some(sid)) = (cell.teacher_id.as_deref(), cell.subject_id.as_deref())
            else {
                continue;
            };
            if slot.is_special_period {
                violations.push(Violation::SpecialAssigned {
                    class: class.id.clone(),
                    slot: slot.key().to_string(),
                });
            }
            let teacher = problem.teacher_position(tid).map(|t| &problem.teachers()[t]);
            let (Some(teacher), Some(_)) = (teacher, problem.subject_position(sid)) else {
                violations.push(Violation::UnknownReference {
                    class: class.id.clone(),
                    slot: slot.key().to_string(),
                });
                continue;
            };
            if !class.requires(sid) {
                violations.push(Violation::UnknownReference {
                    class: class.id.clone(),
                    slot: slot.key().to_string(),
                });
            }
            if !teacher.is_qualified(sid) {
                violations.push(Violation::Unqualified {
                    teacher: tid.to_string(),
                    subject: sid.to_string(),
                });
            }
            if !teacher.is_available(&slot.day, slot.start_time, slot.end_time) {
                violations.push(Violation::Unavailable {
                    teacher: tid.to_string(),
                    slot: slot.key().to_string(),
                });
            }

            *occupancy.entry((s, tid)).or_insert(0) += 1;
            *hours.entry((tid, slot.day_index)).or_insert(0) += 1;
            *daily.entry((class.id.as_str(), sid, slot.day_index)).or_insert(0) += 1;
            *weekly.entry((class.id.as_str(), sid)).or_insert(0) += 1;
        }
    }

    let slots = timetable.slots();
    let days = &config.days;
    for (&(s, tid), &n) in &occupancy {
        if n > 1 {
            violations.push(Violation::DoubleBooked {
                teacher: tid.to_string(),
                slot: slots[s].key().to_string(),
            });
        }
    }
    for (&(tid, day), &n) in &hours {
        let cap = problem
            .teacher_position(tid)
            .and_then(|t| problem.teachers()[t].daily_cap());
        if cap.is_some_and(|cap| n > cap) {
            violations.push(Violation::DailyHoursExceeded {
                teacher: tid.to_string(),
                day: days[day].trim().to_string(),
                hours: n,
            });
        }
    }
    for (&(cid, sid, day), &n) in &daily {
        if n > config.per_day_subject_cap {
            violations.push(Violation::DailySubjectCapExceeded {
                class: cid.to_string(),
                subject: sid.to_string(),
                day: days[day].trim().to_string(),
            });
        }
    }
    if !config.fill_all_periods {
        for (&(cid, sid), &n) in &weekly {
            let quota = problem
                .subject_position(sid)
                .map(|s| problem.subjects()[s].weekly_sessions);
            if quota.is_some_and(|q| n > q) {
                violations.push(Violation::WeeklySessionsExceeded {
                    class: cid.to_string(),
                    subject: sid.to_string(),
                });
            }
        }
    }

    violations
}
