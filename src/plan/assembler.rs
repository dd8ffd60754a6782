use super::rationale::RationaleEntry;
use super::types::ArchitecturePlan;
use crate::provider::Provider;
use crate::rules::{CombinationOutcome, DecisionOutcome};

/// Merges the guard, decision and combination results into a plan
///
/// Rationale order: capability checks, then decision entries up to and
/// including the winner. Combination entries are kept in their own trace so
/// the winner stays the last matched rationale entry.
pub struct PlanAssembler {
    provider: Provider,
    capability: Vec<RationaleEntry>,
}

impl PlanAssembler {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            capability: Vec::new(),
        }
    }

    pub fn with_capability_checks(mut self, checks: Vec<RationaleEntry>) -> Self {
        self.capability = checks;
        self
    }

    pub fn assemble(
        self,
        decision: DecisionOutcome,
        combination: CombinationOutcome,
    ) -> ArchitecturePlan {
        let mut rationale = self.capability;
        rationale.extend(decision.trace);

        ArchitecturePlan::new(
            self.provider,
            decision.template,
            combination.resources,
            rationale,
            combination.trace,
        )
    }
}
