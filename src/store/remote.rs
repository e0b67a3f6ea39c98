//! Optional remote API for people and families.
//!
//! The remote is best-effort: a failed push never blocks the local save, and
//! the caller always learns which of the three things happened. `Saved`
//! covers both a successful remote write and deliberate local-only mode —
//! running without a remote configured is normal operation, not degradation.

use std::time::Duration;

use url::Url;

use crate::error::SyncError;
use crate::types::{Family, Person, RemoteConfig};

/// Outcome of a save that may involve the remote API.
///
/// `Degraded` means the record is safe locally but the remote did not take
/// it — callers surface the reason (a banner, a log line) instead of
/// swallowing the distinction.
#[derive(Debug)]
pub enum WriteOutcome<T> {
    Saved(T),
    Degraded { record: T, reason: String },
    Failed(SyncError),
}

impl<T> WriteOutcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, WriteOutcome::Failed(_))
    }
}

/// Blocking client for the remote people/family API.
pub struct RemoteApi {
    base: Url,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl RemoteApi {
    /// Build a client from config. `None` when no base URL is set
    /// (local-only mode); `Some(Err)` when the URL is set but unusable.
    pub fn from_config(config: &RemoteConfig) -> Option<Result<Self, SyncError>> {
        let base_url = config.base_url.as_deref()?;
        Some(Self::new(base_url, config.timeout_secs))
    }

    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, SyncError> {
        let mut base = Url::parse(base_url).map_err(|e| SyncError::InvalidBaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(SyncError::InvalidBaseUrl(base_url.to_string()));
        }
        // Url::join treats a path without a trailing slash as a file and
        // would drop its last segment
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;
        Ok(Self {
            base,
            timeout_secs,
            client,
        })
    }

    /// Push a person record. PUTs to `/persons/{id}` — the remote upserts.
    pub fn push_person(&self, person: &Person) -> Result<(), SyncError> {
        self.put(&format!("persons/{}", person.id), person)
    }

    /// Push a family record. PUTs to `/families/{id}`.
    pub fn push_family(&self, family: &Family) -> Result<(), SyncError> {
        self.put(&format!("families/{}", family.id), family)
    }

    /// Delete a person record remotely.
    pub fn delete_person(&self, id: uuid::Uuid) -> Result<(), SyncError> {
        let url = self.endpoint(&format!("persons/{}", id))?;
        let response = self
            .client
            .delete(url)
            .send()
            .map_err(|e| self.classify(e))?;
        self.check_status(response)
    }

    fn put<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), SyncError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .put(url)
            .json(body)
            .send()
            .map_err(|e| self.classify(e))?;
        self.check_status(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base
            .join(path)
            .map_err(|e| SyncError::InvalidBaseUrl(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.timeout_secs)
        } else {
            SyncError::Network(err.to_string())
        }
    }

    fn check_status(&self, response: reqwest::blocking::Response) -> Result<(), SyncError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SyncError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
