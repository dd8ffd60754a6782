//! Fixed, versioned rule tables
//!
//! - [`capability`]: provider hard limits, checked first
//! - [`decision`]: first-match-wins primary template tables
//! - [`combination`]: additive resource rules

pub mod capability;
pub mod combination;
pub mod decision;
pub mod predicates;

pub use capability::{CapabilityGuard, GuardOutcome, HardLimit};
pub use combination::{CombinationOutcome, CombinationResolver, CombinationRule};
pub use decision::{DecisionOutcome, DecisionRule, DecisionTree, RULE_TABLE_VERSION};
