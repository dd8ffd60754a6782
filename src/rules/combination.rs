//! Additive resource rules
//!
//! Evaluated in full after the primary template is chosen. Every rule whose
//! signals are present adds its resource; the result is a set, so two rules
//! naming the same resource add it once. These rules never look at or change
//! the primary template.

use crate::plan::{RationaleEntry, ResourceId, Stage};
use crate::provider::Provider;
use crate::signals::{SignalId, SignalSet};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct CombinationRule {
    pub description: &'static str,
    /// Fires when any of these is present
    pub signals: &'static [SignalId],
    pub resource: ResourceId,
}

pub const GCP_COMBINATIONS: &[CombinationRule] = &[
    CombinationRule {
        description: "PostgreSQL-compatible client",
        signals: &[
            SignalId::PostgresClient,
            SignalId::SqlAlchemyClient,
            SignalId::PrismaClient,
        ],
        resource: ResourceId::ManagedRelationalDatabase,
    },
    CombinationRule {
        description: "MySQL client",
        signals: &[SignalId::MysqlClient],
        resource: ResourceId::ManagedRelationalDatabase,
    },
    CombinationRule {
        description: "Document database client",
        signals: &[SignalId::MongoDbClient],
        resource: ResourceId::ManagedDocumentDatabase,
    },
    CombinationRule {
        description: "Redis client",
        signals: &[SignalId::RedisClient],
        resource: ResourceId::ManagedCache,
    },
];

pub const CLOUDFLARE_COMBINATIONS: &[CombinationRule] = &[
    CombinationRule {
        description: "KV namespace binding",
        signals: &[SignalId::KvNamespaces],
        resource: ResourceId::KvNamespace,
    },
    CombinationRule {
        description: "D1 database binding",
        signals: &[SignalId::D1Databases],
        resource: ResourceId::D1Database,
    },
];

#[derive(Debug, Clone, Default)]
pub struct CombinationOutcome {
    pub resources: BTreeSet<ResourceId>,
    /// One entry per rule, in table order
    pub trace: Vec<RationaleEntry>,
}

impl CombinationOutcome {
    pub fn fired(&self) -> impl Iterator<Item = &RationaleEntry> {
        self.trace.iter().filter(|e| e.matched)
    }
}

pub struct CombinationResolver {
    provider: Provider,
    rules: &'static [CombinationRule],
}

impl CombinationResolver {
    pub fn for_provider(provider: Provider) -> Self {
        let rules = match provider {
            Provider::Gcp => GCP_COMBINATIONS,
            Provider::Cloudflare => CLOUDFLARE_COMBINATIONS,
        };
        Self { provider, rules }
    }

    pub fn rules(&self) -> &'static [CombinationRule] {
        self.rules
    }

    pub fn resolve(&self, signals: &SignalSet) -> CombinationOutcome {
        let mut outcome = CombinationOutcome::default();

        for (index, rule) in self.rules.iter().enumerate() {
            let matched = signals.present_in(rule.signals);
            let entry = RationaleEntry::new(
                Stage::Combination,
                index,
                rule.description,
                !matched.is_empty(),
            )
            .with_outcome(rule.resource);

            if matched.is_empty() {
                outcome.trace.push(entry);
                continue;
            }

            let added = outcome.resources.insert(rule.resource);
            debug!(
                provider = %self.provider,
                resource = %rule.resource,
                duplicate = !added,
                "Combination rule fired"
            );

            let detail = (!added).then(|| "already added by an earlier rule".to_string());
            outcome
                .trace
                .push(entry.with_signals(matched).with_detail(detail));
        }

        outcome
    }
}
