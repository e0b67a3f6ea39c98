//! Shared application state: configuration plus the snapshot store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::store::{local, remote::RemoteApi, Store};
use crate::types::Config;

/// Application state threaded through the service layer.
///
/// The store sits behind a non-poisoning RwLock: derivation code takes read
/// guards, service mutations take the write guard, and a panic while holding
/// either never wedges every later caller.
pub struct AppState {
    pub config: Mutex<Option<Config>>,
    pub store: RwLock<Store>,
}

impl AppState {
    /// Load config and snapshot from disk. Both are optional on first run:
    /// missing config falls back to defaults, missing snapshot to an empty
    /// tree. A corrupt snapshot is the one thing that does not degrade
    /// silently.
    pub fn new() -> Result<Self, StoreError> {
        let config = match load_config() {
            Ok(c) => Some(c),
            Err(e) => {
                log::info!("No usable config ({e}); using defaults");
                None
            }
        };

        let data_dir = resolve_data_dir(config.as_ref())?;
        let data = local::load_snapshot(&data_dir)?;
        log::info!(
            "Loaded snapshot from {}: {} persons, {} groups",
            data_dir.display(),
            data.persons.len(),
            data.groups.len()
        );

        Ok(Self {
            config: Mutex::new(config),
            store: RwLock::new(Store::new(data)),
        })
    }

    /// In-memory state with no disk backing, for embedding and tests.
    pub fn in_memory(config: Option<Config>) -> Self {
        Self {
            config: Mutex::new(config),
            store: RwLock::new(Store::default()),
        }
    }

    /// Current config, or defaults when none is loaded.
    pub fn config_snapshot(&self) -> Config {
        self.config
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// The directory holding congregation.json.
    pub fn data_dir(&self) -> Result<PathBuf, StoreError> {
        let guard = self.config.lock().map_err(|_| {
            StoreError::Io("config lock poisoned".to_string())
        })?;
        resolve_data_dir(guard.as_ref())
    }

    /// Remote API client when a base URL is configured. An unusable URL is
    /// logged and treated as local-only rather than blocking every save.
    pub fn remote_api(&self) -> Option<RemoteApi> {
        let config = self.config_snapshot();
        match RemoteApi::from_config(&config.remote) {
            None => None,
            Some(Ok(api)) => Some(api),
            Some(Err(e)) => {
                log::warn!("Remote API disabled: {e}");
                None
            }
        }
    }

    /// Persist the current snapshot to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let data_dir = self.data_dir()?;
        let guard = self.store.read();
        local::save_snapshot(&data_dir, guard.data())
    }
}

/// Resolve the data directory: config override, else ~/.flokk
fn resolve_data_dir(config: Option<&Config>) -> Result<PathBuf, StoreError> {
    if let Some(dir) = config.and_then(|c| c.data_dir.as_deref()) {
        return Ok(PathBuf::from(dir));
    }
    default_data_dir()
}

/// Get the default data directory (~/.flokk)
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    Ok(home.join(".flokk"))
}

/// Get the canonical config file path (~/.flokk/config.json)
pub fn config_path() -> Result<PathBuf, StoreError> {
    Ok(default_data_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config, StoreError> {
    let path = config_path()?;
    if !path.exists() {
        return Err(StoreError::NotFound(format!(
            "Config file {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path,
        message: e.to_string(),
    })
}

/// Create or update config.json.
///
/// Clones the in-memory config (or defaults on first run), applies the
/// mutator, writes atomically, then updates the in-memory copy.
pub fn create_or_update_config(
    state: &AppState,
    mutator: impl FnOnce(&mut Config),
) -> Result<Config, StoreError> {
    let mut guard = state
        .config
        .lock()
        .map_err(|_| StoreError::Io("config lock poisoned".to_string()))?;

    let mut config = guard.clone().unwrap_or_default();
    mutator(&mut config);

    let path = config_path()?;
    let content = serde_json::to_string_pretty(&config)?;
    crate::util::atomic_write_str(&path, &content)?;

    *guard = Some(config.clone());
    Ok(config)
}
