use super::ids::{ResourceId, TemplateId};
use super::rationale::{RationaleEntry, Stage};
use crate::provider::Provider;
use crate::signals::SignalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Resolved architecture for one `(SignalSet, Provider)` pair
///
/// Fields are private: a plan is only built by the assembler and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitecturePlan {
    provider: Provider,
    primary_template: TemplateId,
    additional_resources: BTreeSet<ResourceId>,
    /// Capability checks, then decision rules up to and including the winner
    rationale: Vec<RationaleEntry>,
    /// One entry per combination rule, fired or not
    combinations: Vec<RationaleEntry>,
}

impl ArchitecturePlan {
    pub(crate) fn new(
        provider: Provider,
        primary_template: TemplateId,
        additional_resources: BTreeSet<ResourceId>,
        rationale: Vec<RationaleEntry>,
        combinations: Vec<RationaleEntry>,
    ) -> Self {
        Self {
            provider,
            primary_template,
            additional_resources,
            rationale,
            combinations,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn primary_template(&self) -> TemplateId {
        self.primary_template
    }

    pub fn additional_resources(&self) -> &BTreeSet<ResourceId> {
        &self.additional_resources
    }

    /// Trace that selected the primary template; its last matched entry is the winner
    pub fn rationale(&self) -> &[RationaleEntry] {
        &self.rationale
    }

    pub fn combination_trace(&self) -> &[RationaleEntry] {
        &self.combinations
    }

    pub fn decision_trace(&self) -> impl Iterator<Item = &RationaleEntry> {
        self.rationale.iter().filter(|e| e.stage == Stage::Decision)
    }

    /// The decision rule that selected the primary template
    pub fn winning_rule(&self) -> Option<&RationaleEntry> {
        self.decision_trace().filter(|e| e.matched).last()
    }

    pub fn fired_combinations(&self) -> impl Iterator<Item = &RationaleEntry> {
        self.combinations.iter().filter(|e| e.matched)
    }
}

/// Returned instead of a plan when the provider cannot host the codebase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySuggestion {
    pub requested_provider: Provider,
    pub recommended_provider: Provider,
    pub reason: String,
    pub triggering_signal: SignalId,
    /// Capability checks only; the decision tree is never reached
    pub rationale: Vec<RationaleEntry>,
}

/// Terminal output of `resolve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Plan(ArchitecturePlan),
    Suggestion(CapabilitySuggestion),
}

impl Resolution {
    pub fn plan(&self) -> Option<&ArchitecturePlan> {
        match self {
            Resolution::Plan(plan) => Some(plan),
            Resolution::Suggestion(_) => None,
        }
    }

    pub fn suggestion(&self) -> Option<&CapabilitySuggestion> {
        match self {
            Resolution::Plan(_) => None,
            Resolution::Suggestion(s) => Some(s),
        }
    }

    pub fn is_plan(&self) -> bool {
        matches!(self, Resolution::Plan(_))
    }

    pub fn rationale(&self) -> &[RationaleEntry] {
        match self {
            Resolution::Plan(plan) => plan.rationale(),
            Resolution::Suggestion(s) => &s.rationale,
        }
    }
}
