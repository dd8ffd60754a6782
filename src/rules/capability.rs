//! Provider hard limits
//!
//! Runs before template resolution. When a limit trips, resolution stops with
//! a `CapabilitySuggestion`; the caller always sees it and decides what to do.

use super::predicates::{CONTAINERIZATION, TRADITIONAL_RELATIONAL_CLIENTS};
use crate::plan::{CapabilitySuggestion, RationaleEntry, Stage};
use crate::provider::Provider;
use crate::signals::{SignalId, SignalSet};
use tracing::{debug, info};

/// A structural limit of a provider, tripped by any of its signals
#[derive(Debug, Clone, Copy)]
pub struct HardLimit {
    pub description: &'static str,
    pub signals: &'static [SignalId],
    pub reason: &'static str,
    pub recommended_provider: Provider,
}

const GCP_LIMITS: &[HardLimit] = &[];

const CLOUDFLARE_LIMITS: &[HardLimit] = &[
    HardLimit {
        description: "Containerized workload",
        signals: CONTAINERIZATION,
        reason: "Cloudflare Workers and Pages cannot run containers",
        recommended_provider: Provider::Gcp,
    },
    HardLimit {
        description: "Traditional relational database client",
        signals: TRADITIONAL_RELATIONAL_CLIENTS,
        reason: "Cloudflare offers no managed PostgreSQL or MySQL instance",
        recommended_provider: Provider::Gcp,
    },
];

pub enum GuardOutcome {
    /// No limit tripped; carries the checks performed
    Clear(Vec<RationaleEntry>),
    Exceeded(CapabilitySuggestion),
}

pub struct CapabilityGuard {
    provider: Provider,
    limits: &'static [HardLimit],
}

impl CapabilityGuard {
    pub fn for_provider(provider: Provider) -> Self {
        let limits = match provider {
            Provider::Gcp => GCP_LIMITS,
            Provider::Cloudflare => CLOUDFLARE_LIMITS,
        };
        Self { provider, limits }
    }

    pub fn limits(&self) -> &'static [HardLimit] {
        self.limits
    }

    pub fn check(&self, signals: &SignalSet) -> GuardOutcome {
        let mut trace = Vec::with_capacity(self.limits.len());

        for (index, limit) in self.limits.iter().enumerate() {
            let tripped = signals.present_in(limit.signals);
            let Some(&trigger) = tripped.first() else {
                trace.push(RationaleEntry::new(
                    Stage::Capability,
                    index,
                    limit.description,
                    false,
                ));
                continue;
            };

            let reason = describe_trigger(limit, trigger, signals);
            info!(
                provider = %self.provider,
                signal = %trigger,
                recommended = %limit.recommended_provider,
                "Capability limit exceeded"
            );

            trace.push(
                RationaleEntry::new(Stage::Capability, index, limit.description, true)
                    .with_outcome(limit.recommended_provider)
                    .with_signals(tripped)
                    .with_detail(Some(reason.clone())),
            );

            return GuardOutcome::Exceeded(CapabilitySuggestion {
                requested_provider: self.provider,
                recommended_provider: limit.recommended_provider,
                reason,
                triggering_signal: trigger,
                rationale: trace,
            });
        }

        debug!(provider = %self.provider, checks = trace.len(), "Capability guard clear");
        GuardOutcome::Clear(trace)
    }
}

fn describe_trigger(limit: &HardLimit, trigger: SignalId, signals: &SignalSet) -> String {
    let mut reason = format!("{}: signal '{}'", limit.reason, trigger);
    if let Some(signal) = signals.get(trigger) {
        if !signal.source.as_os_str().is_empty() {
            reason.push_str(&format!(" in {}", signal.source.display()));
        }
        if !signal.evidence.is_empty() {
            reason.push_str(&format!(" ({})", signal.evidence));
        }
    }
    reason
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::Signal;

    #[test]
    fn test_gcp_guard_is_noop() {
        let signals = SignalSet::with_present(&[
            SignalId::DockerfileExposePort,
            SignalId::PostgresClient,
        ])
        .unwrap();
        match CapabilityGuard::for_provider(Provider::Gcp).check(&signals) {
            GuardOutcome::Clear(trace) => assert!(trace.is_empty()),
            GuardOutcome::Exceeded(_) => panic!("GCP has no hard limits"),
        }
    }

    #[test]
    fn test_cloudflare_clear_records_every_check() {
        let signals = SignalSet::with_present(&[SignalId::ReactDependency]).unwrap();
        match CapabilityGuard::for_provider(Provider::Cloudflare).check(&signals) {
            GuardOutcome::Clear(trace) => {
                assert_eq!(trace.len(), 2);
                assert!(trace.iter().all(|e| !e.matched && e.stage == Stage::Capability));
            }
            GuardOutcome::Exceeded(s) => panic!("Unexpected suggestion: {}", s.reason),
        }
    }

    #[test]
    fn test_cloudflare_container_cites_signal_source() {
        let signals = SignalSet::from_signals(vec![Signal::present(
            SignalId::DockerfileExposePort,
            "Dockerfile",
            "EXPOSE 8080",
        )])
        .unwrap();

        match CapabilityGuard::for_provider(Provider::Cloudflare).check(&signals) {
            GuardOutcome::Exceeded(suggestion) => {
                assert_eq!(suggestion.recommended_provider, Provider::Gcp);
                assert_eq!(suggestion.requested_provider, Provider::Cloudflare);
                assert_eq!(suggestion.triggering_signal, SignalId::DockerfileExposePort);
                assert!(suggestion.reason.contains("dockerfile-expose-port"));
                assert!(suggestion.reason.contains("Dockerfile"));
                assert!(suggestion.reason.contains("EXPOSE 8080"));
                assert_eq!(suggestion.rationale.len(), 1);
            }
            GuardOutcome::Clear(_) => panic!("Expected capability suggestion"),
        }
    }

    #[test]
    fn test_cloudflare_relational_client_trips_second_limit() {
        let signals = SignalSet::with_present(&[SignalId::MysqlClient]).unwrap();
        match CapabilityGuard::for_provider(Provider::Cloudflare).check(&signals) {
            GuardOutcome::Exceeded(suggestion) => {
                assert_eq!(suggestion.triggering_signal, SignalId::MysqlClient);
                assert_eq!(suggestion.rationale.len(), 2);
                assert!(!suggestion.rationale[0].matched);
                assert!(suggestion.rationale[1].matched);
            }
            GuardOutcome::Clear(_) => panic!("Expected capability suggestion"),
        }
    }

    #[test]
    fn test_document_store_is_not_a_hard_limit() {
        let signals = SignalSet::with_present(&[SignalId::MongoDbClient]).unwrap();
        assert!(matches!(
            CapabilityGuard::for_provider(Provider::Cloudflare).check(&signals),
            GuardOutcome::Clear(_)
        ));
    }
}
