//! Persisted resolution state
//!
//! `init` saves the last resolution to `<state_dir>/plan.yaml`, stamped with a
//! SHA-256 digest of the signal set it was computed from. `status` recomputes
//! the digest from a fresh scan to tell whether the saved plan is stale.

use crate::fs::FileSystem;
use crate::plan::Resolution;
use crate::rules::RULE_TABLE_VERSION;
use crate::signals::SignalSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const STATE_FORMAT_VERSION: u32 = 1;
pub const STATE_FILE: &str = "plan.yaml";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to access state at {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to serialize state: {0}")]
    Serialize(String),

    #[error("Corrupt state file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("State file format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub rule_table_version: String,
    /// Hex SHA-256 of the canonical JSON form of the signal set
    pub signals_digest: String,
    pub resolution: Resolution,
}

/// Why a saved record does or does not match the current signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    SignalsChanged,
    RulesChanged,
    Missing,
}

impl Freshness {
    pub fn is_stale(&self) -> bool {
        !matches!(self, Freshness::Fresh)
    }
}

impl StateRecord {
    pub fn freshness(&self, signals: &SignalSet) -> Result<Freshness, StateError> {
        if self.rule_table_version != RULE_TABLE_VERSION {
            return Ok(Freshness::RulesChanged);
        }
        if self.signals_digest != signals_digest(signals)? {
            return Ok(Freshness::SignalsChanged);
        }
        Ok(Freshness::Fresh)
    }
}

/// Digest of a signal set; identical sets always hash identically
pub fn signals_digest(signals: &SignalSet) -> Result<String, StateError> {
    let canonical =
        serde_json::to_vec(signals).map_err(|e| StateError::Serialize(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

pub struct StateStore {
    dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl StateStore {
    /// `state_dir` is joined onto `project_root` unless absolute
    pub fn new(
        project_root: impl AsRef<Path>,
        state_dir: impl AsRef<Path>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            dir: project_root.as_ref().join(state_dir),
            fs,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn save(
        &self,
        resolution: &Resolution,
        signals: &SignalSet,
    ) -> Result<StateRecord, StateError> {
        let record = StateRecord {
            version: STATE_FORMAT_VERSION,
            saved_at: Utc::now(),
            rule_table_version: RULE_TABLE_VERSION.to_string(),
            signals_digest: signals_digest(signals)?,
            resolution: resolution.clone(),
        };

        let yaml =
            serde_yaml::to_string(&record).map_err(|e| StateError::Serialize(e.to_string()))?;

        self.fs
            .create_dir_all(&self.dir)
            .map_err(|e| self.io_error(&self.dir, e))?;
        let path = self.path();
        self.fs
            .write(&path, &yaml)
            .map_err(|e| self.io_error(&path, e))?;

        info!(path = %path.display(), digest = %record.signals_digest, "Saved resolution state");
        Ok(record)
    }

    pub fn load(&self) -> Result<Option<StateRecord>, StateError> {
        let path = self.path();
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "No saved state");
            return Ok(None);
        }

        let yaml = self
            .fs
            .read_to_string(&path)
            .map_err(|e| self.io_error(&path, e))?;
        let record: StateRecord =
            serde_yaml::from_str(&yaml).map_err(|e| StateError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if record.version != STATE_FORMAT_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: record.version,
                expected: STATE_FORMAT_VERSION,
            });
        }
        Ok(Some(record))
    }

    pub fn freshness(&self, signals: &SignalSet) -> Result<Freshness, StateError> {
        match self.load()? {
            Some(record) => record.freshness(signals),
            None => Ok(Freshness::Missing),
        }
    }

    /// True when nothing is saved or the saved plan came from different input
    pub fn is_stale(&self, signals: &SignalSet) -> Result<bool, StateError> {
        Ok(self.freshness(signals)?.is_stale())
    }

    fn io_error(&self, path: &Path, err: anyhow::Error) -> StateError {
        StateError::Io {
            path: path.to_path_buf(),
            message: format!("{:#}", err),
        }
    }
}
