//! Local snapshot persistence.
//!
//! The whole `Congregation` tree lives in one `congregation.json` under the
//! data directory. Writes go through a temp file + rename so a crash never
//! leaves a truncated snapshot. A missing file loads as an empty snapshot
//! (first run); a file that exists but fails to parse is a hard error —
//! silently replacing someone's data with an empty tree is worse than
//! refusing to start.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::Congregation;
use crate::util::atomic_write_str;

pub const SNAPSHOT_FILE: &str = "congregation.json";

/// Resolve the snapshot path inside a data directory.
pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// Load the snapshot, or an empty one when none has been written yet.
pub fn load_snapshot(data_dir: &Path) -> Result<Congregation, StoreError> {
    let path = snapshot_path(data_dir);
    if !path.exists() {
        log::info!("No snapshot at {} — starting empty", path.display());
        return Ok(Congregation::default());
    }

    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path,
        message: e.to_string(),
    })
}

/// Persist the snapshot atomically.
pub fn save_snapshot(data_dir: &Path, data: &Congregation) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(data)?;
    atomic_write_str(&snapshot_path(data_dir), &content)?;
    log::debug!(
        "Saved snapshot ({} persons, {} groups, {} occurrences)",
        data.persons.len(),
        data.groups.len(),
        data.event_occurrences.len()
    );
    Ok(())
}
