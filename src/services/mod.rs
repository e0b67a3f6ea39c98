//! Operations composed from the store, the schedule projector, and the
//! statistics core. This is the in-process API the UI layer calls.

pub mod dashboard;
pub mod events;
pub mod groups;
pub mod people;
