//! Resolution output types
//!
//! - [`ids`]: template and resource identifiers
//! - [`rationale`]: per-rule trace entries
//! - [`types`]: `ArchitecturePlan`, `CapabilitySuggestion`, `Resolution`
//! - [`assembler`]: builds the immutable plan

pub mod assembler;
pub mod ids;
pub mod rationale;
pub mod types;

pub use assembler::PlanAssembler;
pub use ids::{ResourceId, TemplateId};
pub use rationale::{RationaleEntry, Stage};
pub use types::{ArchitecturePlan, CapabilitySuggestion, Resolution};
