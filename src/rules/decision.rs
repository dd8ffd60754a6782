//! Decision tree evaluation
//!
//! Each provider owns an ordered table of `(predicate, template)` rules. The
//! evaluator folds over the table and stops at the first predicate that holds;
//! lower index means higher priority. The last rule of every table is an
//! unconditional default.

use super::predicates::{self, CONTAINERIZATION};
use crate::error::ResolveError;
use crate::plan::{RationaleEntry, Stage, TemplateId};
use crate::provider::Provider;
use crate::signals::{SignalId, SignalSet};
use tracing::{debug, error};

/// Version of the decision and combination tables. Bumped on any change to rule order or predicates.
pub const RULE_TABLE_VERSION: &str = "2";

#[derive(Clone, Copy)]
pub struct DecisionRule {
    pub description: &'static str,
    pub predicate: fn(&SignalSet) -> bool,
    pub outcome: TemplateId,
    /// Signals cited in the rationale when the rule fires
    pub cites: &'static [SignalId],
    /// Extra context for the rationale; never affects which rule fires
    pub annotate: fn(&SignalSet) -> Option<String>,
}

impl std::fmt::Debug for DecisionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionRule")
            .field("description", &self.description)
            .field("outcome", &self.outcome)
            .finish()
    }
}

fn no_detail(_signals: &SignalSet) -> Option<String> {
    None
}

fn container_variant(signals: &SignalSet) -> Option<String> {
    if signals.is_present(SignalId::DockerfileExposePort) {
        Some("http variant (port exposed)".to_string())
    } else {
        Some("worker variant (no exposed port)".to_string())
    }
}

fn frontend_detail(signals: &SignalSet) -> Option<String> {
    let frameworks = predicates::frontend_frameworks(signals);
    if frameworks.is_empty() {
        None
    } else {
        Some(format!("frameworks: {}", frameworks.join(", ")))
    }
}

const SSR: &[SignalId] = &[SignalId::SsrConfig];
const FRONTEND: &[SignalId] = &[
    SignalId::ReactDependency,
    SignalId::VueDependency,
    SignalId::AngularDependency,
    SignalId::SvelteDependency,
    SignalId::NextDependency,
    SignalId::SsrConfig,
    SignalId::StaticExport,
];
const API: &[SignalId] = predicates::API_BACKENDS;
const TEMPLATED: &[SignalId] = &[
    SignalId::Django,
    SignalId::ServerTemplates,
    SignalId::FastApi,
    SignalId::Flask,
    SignalId::Express,
    SignalId::NestJs,
];
const WORKER: &[SignalId] = &[SignalId::BackgroundWorker];
const NONE: &[SignalId] = &[];
const CF_WORKER: &[SignalId] = predicates::WORKER_MARKERS;
const CF_PAGES: &[SignalId] = &[
    SignalId::ReactDependency,
    SignalId::VueDependency,
    SignalId::AngularDependency,
    SignalId::SvelteDependency,
    SignalId::NextDependency,
    SignalId::SsrConfig,
    SignalId::StaticExport,
    SignalId::PagesFunctions,
];

pub const GCP_RULES: &[DecisionRule] = &[
    DecisionRule {
        description: "Containerization signal present",
        predicate: predicates::has_containerization,
        outcome: TemplateId::Containerized,
        cites: CONTAINERIZATION,
        annotate: container_variant,
    },
    DecisionRule {
        description: "Server-rendered frontend",
        predicate: predicates::has_ssr_frontend,
        outcome: TemplateId::FullstackApp,
        cites: SSR,
        annotate: frontend_detail,
    },
    DecisionRule {
        description: "Frontend without backend",
        predicate: predicates::is_static_frontend,
        outcome: TemplateId::StaticSite,
        cites: FRONTEND,
        annotate: frontend_detail,
    },
    DecisionRule {
        description: "API backend without server-side templates",
        predicate: predicates::is_api_backend,
        outcome: TemplateId::ApiService,
        cites: API,
        annotate: no_detail,
    },
    DecisionRule {
        description: "Full web framework or server-side templates with backend",
        predicate: predicates::is_templated_web_app,
        outcome: TemplateId::FullstackApp,
        cites: TEMPLATED,
        annotate: no_detail,
    },
    DecisionRule {
        description: "Background processing only",
        predicate: predicates::is_background_only,
        outcome: TemplateId::Containerized,
        cites: WORKER,
        annotate: container_variant,
    },
    DecisionRule {
        description: "Default",
        predicate: predicates::always,
        outcome: TemplateId::StaticSite,
        cites: NONE,
        annotate: no_detail,
    },
];

pub const CLOUDFLARE_RULES: &[DecisionRule] = &[
    DecisionRule {
        description: "Worker configuration or entrypoint",
        predicate: predicates::has_worker_marker,
        outcome: TemplateId::CloudflareWorker,
        cites: CF_WORKER,
        annotate: no_detail,
    },
    DecisionRule {
        description: "Frontend or Pages Functions",
        predicate: predicates::is_pages_site,
        outcome: TemplateId::CloudflarePages,
        cites: CF_PAGES,
        annotate: frontend_detail,
    },
    DecisionRule {
        description: "Simple API or function backend",
        predicate: predicates::has_api_backend,
        outcome: TemplateId::CloudflareWorker,
        cites: API,
        annotate: no_detail,
    },
    DecisionRule {
        description: "Default",
        predicate: predicates::always,
        outcome: TemplateId::CloudflarePages,
        cites: NONE,
        annotate: no_detail,
    },
];

/// Result of a decision fold
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub template: TemplateId,
    pub winning_index: usize,
    /// Entries for every rule considered, the winner last
    pub trace: Vec<RationaleEntry>,
}

pub struct DecisionTree {
    provider: Provider,
    rules: &'static [DecisionRule],
}

impl DecisionTree {
    pub fn for_provider(provider: Provider) -> Self {
        let rules = match provider {
            Provider::Gcp => GCP_RULES,
            Provider::Cloudflare => CLOUDFLARE_RULES,
        };
        Self { provider, rules }
    }

    #[cfg(test)]
    fn with_rules(provider: Provider, rules: &'static [DecisionRule]) -> Self {
        Self { provider, rules }
    }

    pub fn rules(&self) -> &'static [DecisionRule] {
        self.rules
    }

    pub fn evaluate(&self, signals: &SignalSet) -> Result<DecisionOutcome, ResolveError> {
        let mut trace = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if !(rule.predicate)(signals) {
                trace.push(
                    RationaleEntry::new(Stage::Decision, index, rule.description, false)
                        .with_outcome(rule.outcome),
                );
                continue;
            }

            debug!(
                provider = %self.provider,
                rule = index + 1,
                description = rule.description,
                template = %rule.outcome,
                "Decision rule matched"
            );

            trace.push(
                RationaleEntry::new(Stage::Decision, index, rule.description, true)
                    .with_outcome(rule.outcome)
                    .with_signals(signals.present_in(rule.cites))
                    .with_detail((rule.annotate)(signals)),
            );

            return Ok(DecisionOutcome {
                template: rule.outcome,
                winning_index: index,
                trace,
            });
        }

        error!(
            provider = %self.provider,
            rules = self.rules.len(),
            "Decision table exhausted without a match"
        );
        Err(ResolveError::NoMatchingTemplate {
            provider: self.provider,
        })
    }
}
