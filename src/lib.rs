//! Congregation operations backend: people, families, groups, service teams,
//! event occurrences, assignments, and per-event run-of-show programs.
//!
//! Layout mirrors how the data flows: `store` owns the snapshot and the
//! reducer, `stats` and `schedule` derive from it without mutating anything,
//! and `services` stitches the two together behind the in-process API a UI
//! shell calls. Persistence is a local JSON snapshot plus an optional remote
//! people/family API that degrades to local-only rather than losing input.

pub mod error;
pub mod locale;
pub mod schedule;
pub mod services;
pub mod state;
pub mod stats;
pub mod store;
pub mod types;
pub mod util;
