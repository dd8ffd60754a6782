//! infera - architecture inference from codebase signals
//!
//! Given a set of signals observed in a repository (frameworks, containerization
//! markers, database clients, provider configuration) and an explicit cloud
//! provider, infera deterministically selects one primary architecture template
//! and any supplementary managed resources, with a rationale trace naming every
//! rule it considered.
//!
//! # Example
//!
//! ```
//! use infera::{resolve, SignalId, SignalSet, TemplateId};
//!
//! let signals = SignalSet::with_present(&[SignalId::FastApi, SignalId::SqlAlchemyClient]).unwrap();
//! let resolution = resolve(&signals, "gcp").unwrap();
//! let plan = resolution.plan().unwrap();
//!
//! assert_eq!(plan.primary_template(), TemplateId::ApiService);
//! assert_eq!(plan.additional_resources().len(), 1);
//! ```
//!
//! # Project Structure
//!
//! - [`signals`]: signal catalog, `SignalSet` and the detection table
//! - [`rules`]: capability limits, decision tables and combination rules
//! - [`plan`]: plan, suggestion and rationale types
//! - [`resolver`]: the `resolve` entry point
//! - [`detect`], [`templates`], [`state`]: filesystem collaborators used by the CLI

#[macro_use]
mod id_enum_macro;

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod fs;
pub mod plan;
pub mod provider;
pub mod resolver;
pub mod rules;
pub mod signals;
pub mod state;
pub mod templates;
pub mod util;

pub use config::{ConfigError, InferaConfig};
pub use error::ResolveError;
pub use plan::{ArchitecturePlan, CapabilitySuggestion, RationaleEntry, ResourceId, Resolution, TemplateId};
pub use provider::{select_provider, Provider};
pub use resolver::{resolve, resolve_for};
pub use rules::RULE_TABLE_VERSION;
pub use signals::{RawSignal, Signal, SignalId, SignalSet};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_infera() {
        assert_eq!(NAME, "infera");
    }
}
