//! Resolution entry point
//!
//! SignalSet + Provider -> capability guard -> decision tree -> combination
//! rules -> assembled plan. Pure and synchronous: the same input always yields
//! the same `Resolution`.

use crate::error::ResolveError;
use crate::plan::{PlanAssembler, Resolution};
use crate::provider::{select_provider, Provider};
use crate::rules::{CapabilityGuard, CombinationResolver, DecisionTree, GuardOutcome};
use crate::signals::SignalSet;
use tracing::debug;

/// Resolves an architecture for an explicit provider name
pub fn resolve(signals: &SignalSet, provider: &str) -> Result<Resolution, ResolveError> {
    let provider = select_provider(provider)?;
    resolve_for(signals, provider)
}

/// Resolves an architecture for an already validated provider
pub fn resolve_for(signals: &SignalSet, provider: Provider) -> Result<Resolution, ResolveError> {
    debug!(
        provider = %provider,
        signals = signals.len(),
        present = signals.present_ids().count(),
        "Resolving architecture"
    );

    let checks = match CapabilityGuard::for_provider(provider).check(signals) {
        GuardOutcome::Clear(checks) => checks,
        GuardOutcome::Exceeded(suggestion) => return Ok(Resolution::Suggestion(suggestion)),
    };

    let decision = DecisionTree::for_provider(provider).evaluate(signals)?;
    let combination = CombinationResolver::for_provider(provider).resolve(signals);

    let plan = PlanAssembler::new(provider)
        .with_capability_checks(checks)
        .assemble(decision, combination);

    debug!(
        provider = %provider,
        template = %plan.primary_template(),
        resources = plan.additional_resources().len(),
        "Architecture resolved"
    );

    Ok(Resolution::Plan(plan))
}
