//! Structured logging setup
//!
//! Logs go to stderr so that `--format json` / `--format yaml` output on stdout
//! stays machine-readable. `RUST_LOG` is respected; without it the filter is
//! `infera=<level>`.
//!
//! ```no_run
//! use infera::util::logging;
//!
//! logging::init_from_env();
//! tracing::debug!(provider = "gcp", "Resolving architecture");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,

    /// One JSON object per event
    pub use_json: bool,

    /// Include the module target (e.g., infera::rules::decision)
    pub include_target: bool,

    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with targets and source locations
    pub fn structured(level: Level) -> Self {
        Self {
            level,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level name, case-insensitive
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Like [`parse_level`], falling back to INFO with a note on stderr
pub fn parse_level_or_default(level_str: &str) -> Level {
    parse_level(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to info. Valid levels: {}",
            level_str,
            VALID_LEVELS.join(", ")
        );
        Level::INFO
    })
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::try_new(format!("infera={}", level)).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `INFERA_LOG_LEVEL` and `INFERA_LOG_JSON`
pub fn init_from_env() {
    let level = env::var("INFERA_LOG_LEVEL")
        .map(|v| parse_level_or_default(&v))
        .unwrap_or(Level::INFO);
    init_logging(config_for(level));
}

/// Config for an explicit level, honoring `INFERA_LOG_JSON`
pub fn config_for(level: Level) -> LoggingConfig {
    if json_requested() {
        LoggingConfig::structured(level)
    } else {
        LoggingConfig::with_level(level)
    }
}

fn json_requested() -> bool {
    env::var("INFERA_LOG_JSON")
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" INFO "), Some(Level::INFO));
        assert_eq!(parse_level("warning"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_parse_level_or_default() {
        assert_eq!(parse_level_or_default("debug"), Level::DEBUG);
        assert_eq!(parse_level_or_default(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
    }

    #[test]
    #[serial]
    fn test_json_from_env() {
        env::set_var("INFERA_LOG_JSON", "true");
        assert!(config_for(Level::WARN).use_json);
        env::set_var("INFERA_LOG_JSON", "0");
        assert!(!config_for(Level::WARN).use_json);
        env::remove_var("INFERA_LOG_JSON");
        assert_eq!(config_for(Level::WARN).level, Level::WARN);
    }
}
