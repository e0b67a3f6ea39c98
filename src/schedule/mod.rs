//! Calendar projection and program layout.

pub mod program;
pub mod recurrence;

pub use program::{default_base_time, schedule_program, ScheduledProgramItem};
pub use recurrence::{project_occurrences, validate_pattern};
