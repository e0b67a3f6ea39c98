//! Maintenance runner: load the snapshot, report what's in it, and print the
//! dashboard stat block as JSON. Useful for checking a workspace without the
//! UI shell.

use flokk::services::dashboard::{get_dashboard_stats, DashboardResult};
use flokk::state::AppState;
use flokk::types::DashboardFilters;

fn main() {
    env_logger::init();

    let state = match AppState::new() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to load state: {e}");
            std::process::exit(1);
        }
    };

    {
        let guard = state.store.read();
        let db = guard.data();
        log::info!(
            "{} persons, {} families, {} groups, {} occurrences, {} tasks",
            db.persons.len(),
            db.families.len(),
            db.groups.len(),
            db.event_occurrences.len(),
            db.tasks.len()
        );
    }

    match get_dashboard_stats(&state, &DashboardFilters::default()) {
        DashboardResult::Success { data } => match serde_json::to_string_pretty(&data) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize stats: {e}");
                std::process::exit(1);
            }
        },
        DashboardResult::Empty { message } => println!("{message}"),
        DashboardResult::Error { message } => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}
