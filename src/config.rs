//! Configuration for the infera CLI
//!
//! Loaded from environment variables with defaults; CLI flags override
//! individual fields afterwards.
//!
//! # Environment Variables
//!
//! - `INFERA_PROVIDER`: target provider (gcp|cloudflare) - default: "gcp"
//! - `INFERA_LOG_LEVEL`: logging level - default: "info"
//! - `INFERA_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `INFERA_STATE_DIR`: state directory, relative to the project - default: ".infera"
//! - `INFERA_TEMPLATES_DIR`: template definitions directory - optional
//! - `INFERA_SCAN_MAX_DEPTH`: scan depth limit - default: "10"
//! - `INFERA_SCAN_MAX_FILES`: scanned file limit - default: "5000"
//! - `INFERA_SCAN_MAX_FILE_BYTES`: files above this size are not read - default: "1048576"

use crate::detect::ScanConfig;
use crate::provider::{select_provider, Provider};
use crate::util::logging::{parse_level, VALID_LEVELS};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PROVIDER: &str = "gcp";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_STATE_DIR: &str = ".infera";
const DEFAULT_SCAN_MAX_DEPTH: usize = 10;
const DEFAULT_SCAN_MAX_FILES: usize = 5000;
const DEFAULT_SCAN_MAX_FILE_BYTES: u64 = 1_048_576;

const MAX_SCAN_DEPTH: usize = 64;
const MAX_SCAN_FILES: usize = 1_000_000;
const MAX_FILE_BYTES: u64 = 104_857_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider '{value}' in INFERA_PROVIDER: {message}")]
    InvalidProvider { value: String, message: String },

    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct InferaConfig {
    /// Provider name as configured; validated by `validate()`
    pub provider: String,
    pub log_level: String,
    pub state_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub scan_max_depth: usize,
    pub scan_max_files: usize,
    pub scan_max_file_bytes: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Default for InferaConfig {
    fn default() -> Self {
        let provider = env::var("INFERA_PROVIDER")
            .unwrap_or_else(|_| DEFAULT_PROVIDER.to_string())
            .to_lowercase();

        let log_level = env::var("INFERA_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let state_dir = env::var("INFERA_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR));

        let templates_dir = env::var("INFERA_TEMPLATES_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            provider,
            log_level,
            state_dir,
            templates_dir,
            scan_max_depth: env_or("INFERA_SCAN_MAX_DEPTH", DEFAULT_SCAN_MAX_DEPTH),
            scan_max_files: env_or("INFERA_SCAN_MAX_FILES", DEFAULT_SCAN_MAX_FILES),
            scan_max_file_bytes: env_or("INFERA_SCAN_MAX_FILE_BYTES", DEFAULT_SCAN_MAX_FILE_BYTES),
        }
    }
}

impl InferaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider()?;

        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        if self.scan_max_depth == 0 || self.scan_max_depth > MAX_SCAN_DEPTH {
            return Err(ConfigError::ValidationFailed(format!(
                "Scan depth must be between 1 and {}",
                MAX_SCAN_DEPTH
            )));
        }
        if self.scan_max_files == 0 || self.scan_max_files > MAX_SCAN_FILES {
            return Err(ConfigError::ValidationFailed(format!(
                "Scan file limit must be between 1 and {}",
                MAX_SCAN_FILES
            )));
        }
        if self.scan_max_file_bytes < 1024 || self.scan_max_file_bytes > MAX_FILE_BYTES {
            return Err(ConfigError::ValidationFailed(
                "Max file size must be between 1KB and 100MB".to_string(),
            ));
        }
        if self.state_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "State directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn provider(&self) -> Result<Provider, ConfigError> {
        select_provider(&self.provider).map_err(|e| ConfigError::InvalidProvider {
            value: self.provider.clone(),
            message: e.to_string(),
        })
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            max_depth: Some(self.scan_max_depth),
            max_files: Some(self.scan_max_files),
            max_file_bytes: self.scan_max_file_bytes,
        }
    }

    /// State directory resolved against a project root
    pub fn state_dir_for(&self, project_root: &std::path::Path) -> PathBuf {
        if self.state_dir.is_absolute() {
            self.state_dir.clone()
        } else {
            project_root.join(&self.state_dir)
        }
    }
}

impl fmt::Display for InferaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Infera Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(f, "  Log Level: {} (valid: {})", self.log_level, VALID_LEVELS.join(", "))?;
        writeln!(f, "  State Dir: {}", self.state_dir.display())?;
        if let Some(ref dir) = self.templates_dir {
            writeln!(f, "  Templates Dir: {}", dir.display())?;
        }
        writeln!(
            f,
            "  Scan Limits: depth {}, {} files, {} bytes per file",
            self.scan_max_depth, self.scan_max_files, self.scan_max_file_bytes
        )?;
        Ok(())
    }
}
