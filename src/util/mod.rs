//! Shared helpers: logging setup and "did you mean" suggestions

pub mod logging;
pub mod suggest;

pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
