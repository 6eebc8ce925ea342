//! Timetabling domain models.
//!
//! Provides the records handed to the generator (teachers, class groups,
//! subjects) and the grid it produces (slots and the timetable store).
//! All records are read-only during a generation run except the
//! [`Timetable`], which the scheduler mutates.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Training Center |
//! |-------------|--------|-----------------|
//! | Teacher | Teacher | Instructor |
//! | ClassGroup | Class / Section | Cohort |
//! | Subject | Course | Module |
//! | TimeSlot | Period | Session |

mod class_group;
mod slot;
mod subject;
mod teacher;
mod time;
mod timetable;

pub use class_group::ClassGroup;
pub use slot::{SlotKey, SpecialPeriod, TimeSlot};
pub use subject::Subject;
pub use teacher::Teacher;
pub use time::{AvailabilityWindow, ClockTime, ParseClockTimeError};
pub use timetable::{
    Assignment, ClassScheduleRow, ClassTimetable, TeacherScheduleRow, Timetable, FREE_LABEL,
    STAFF_ROOM,
};
