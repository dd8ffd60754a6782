//! Output formatting for the CLI
//!
//! JSON and YAML render the serde form of each value unchanged; the human
//! format is a terminal summary.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::plan::{ArchitecturePlan, CapabilitySuggestion, RationaleEntry, Resolution, TemplateId};
use crate::provider::Provider;
use crate::rules::{CapabilityGuard, CombinationResolver, DecisionTree, RULE_TABLE_VERSION};
use crate::signals::SignalSet;
use crate::state::{Freshness, StateRecord};
use crate::templates::TemplateDefinition;

const SEPARATOR: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// What `status` reports
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub state_path: PathBuf,
    pub freshness: Freshness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<StateRecord>,
}

#[derive(Debug, Serialize)]
pub struct RuleView {
    pub index: usize,
    pub description: &'static str,
    pub outcome: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderRules {
    pub provider: Provider,
    pub capability: Vec<RuleView>,
    pub decision: Vec<RuleView>,
    pub combination: Vec<RuleView>,
}

/// Serializable view of the fixed rule tables
#[derive(Debug, Serialize)]
pub struct RulesReport {
    pub version: &'static str,
    pub providers: Vec<ProviderRules>,
}

impl RulesReport {
    pub fn for_providers(providers: &[Provider]) -> Self {
        let providers = providers
            .iter()
            .map(|&provider| ProviderRules {
                provider,
                capability: CapabilityGuard::for_provider(provider)
                    .limits()
                    .iter()
                    .enumerate()
                    .map(|(index, limit)| RuleView {
                        index,
                        description: limit.description,
                        outcome: format!("suggest {}", limit.recommended_provider),
                    })
                    .collect(),
                decision: DecisionTree::for_provider(provider)
                    .rules()
                    .iter()
                    .enumerate()
                    .map(|(index, rule)| RuleView {
                        index,
                        description: rule.description,
                        outcome: rule.outcome.to_string(),
                    })
                    .collect(),
                combination: CombinationResolver::for_provider(provider)
                    .rules()
                    .iter()
                    .enumerate()
                    .map(|(index, rule)| RuleView {
                        index,
                        description: rule.description,
                        outcome: rule.resource.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: RULE_TABLE_VERSION,
            providers,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn serialized<T: Serialize>(&self, value: &T, what: &str) -> Result<Option<String>> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)
                .map(Some)
                .with_context(|| format!("Failed to serialize {} to JSON", what)),
            OutputFormat::Yaml => serde_yaml::to_string(value)
                .map(Some)
                .with_context(|| format!("Failed to serialize {} to YAML", what)),
            OutputFormat::Human => Ok(None),
        }
    }

    pub fn format_signals(&self, signals: &SignalSet) -> Result<String> {
        if let Some(out) = self.serialized(signals, "signals")? {
            return Ok(out);
        }

        let mut output = String::new();
        writeln!(output, "Detected Signals")?;
        writeln!(output, "{}\n", SEPARATOR)?;

        let present: Vec<_> = signals.iter().filter(|s| s.present).collect();
        if present.is_empty() {
            writeln!(output, "No signals detected.")?;
            return Ok(output);
        }

        for signal in present {
            writeln!(
                output,
                "\u{2713} {:<24} {:<18} {}",
                signal.id,
                signal.id.category(),
                signal.source.display()
            )?;
            if !signal.evidence.is_empty() {
                writeln!(output, "  \u{2514}\u{2500} {}", signal.evidence)?;
            }
        }
        Ok(output)
    }

    pub fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        if let Some(out) = self.serialized(resolution, "resolution")? {
            return Ok(out);
        }
        match resolution {
            Resolution::Plan(plan) => Ok(human_plan(plan)),
            Resolution::Suggestion(suggestion) => Ok(human_suggestion(suggestion)),
        }
    }

    pub fn format_status(&self, report: &StatusReport) -> Result<String> {
        if let Some(out) = self.serialized(report, "status")? {
            return Ok(out);
        }

        let mut output = String::new();
        writeln!(output, "infera Status")?;
        writeln!(output, "{}\n", SEPARATOR)?;
        writeln!(output, "State file:  {}", report.state_path.display())?;

        let Some(record) = &report.record else {
            writeln!(output, "No saved plan. Run 'infera init' first.")?;
            return Ok(output);
        };

        writeln!(output, "Saved at:    {}", record.saved_at.to_rfc3339())?;
        writeln!(output, "Rules:       v{}", record.rule_table_version)?;
        let freshness = match report.freshness {
            Freshness::Fresh => "\u{2713} up to date",
            Freshness::SignalsChanged => "\u{26A0} stale: repository signals changed",
            Freshness::RulesChanged => "\u{26A0} stale: rule tables changed",
            Freshness::Missing => "\u{26A0} missing",
        };
        writeln!(output, "Freshness:   {}\n", freshness)?;
        output.push_str(&match &record.resolution {
            Resolution::Plan(plan) => human_plan(plan),
            Resolution::Suggestion(suggestion) => human_suggestion(suggestion),
        });
        Ok(output)
    }

    pub fn format_rules(&self, report: &RulesReport) -> Result<String> {
        if let Some(out) = self.serialized(report, "rule tables")? {
            return Ok(out);
        }

        let mut output = String::new();
        writeln!(output, "Rule Tables (version {})", report.version)?;
        writeln!(output, "{}", SEPARATOR)?;

        for rules in &report.providers {
            writeln!(output, "\n{} ({})", rules.provider.name(), rules.provider)?;
            for (title, views) in [
                ("Capability limits", &rules.capability),
                ("Decision rules (first match wins)", &rules.decision),
                ("Combination rules (all that match)", &rules.combination),
            ] {
                if views.is_empty() {
                    continue;
                }
                writeln!(output, "  {}:", title)?;
                for view in views {
                    writeln!(
                        output,
                        "    {}. {} \u{2192} {}",
                        view.index + 1,
                        view.description,
                        view.outcome
                    )?;
                }
            }
        }
        Ok(output)
    }

    pub fn format_template_list(&self, templates: &[TemplateId]) -> Result<String> {
        if let Some(out) = self.serialized(&templates, "templates")? {
            return Ok(out);
        }

        let mut output = String::new();
        writeln!(output, "Architecture Templates")?;
        writeln!(output, "{}\n", SEPARATOR)?;
        for id in templates {
            writeln!(output, "  {:<20} {}", id, id.name())?;
        }
        Ok(output)
    }

    pub fn format_template(&self, definition: &TemplateDefinition) -> Result<String> {
        if let Some(out) = self.serialized(definition, "template")? {
            return Ok(out);
        }

        let mut output = String::new();
        writeln!(output, "{} ({})", definition.title, definition.id)?;
        writeln!(output, "{}", SEPARATOR)?;
        if let Some(source) = &definition.source {
            writeln!(output, "Source: {}\n", source.display())?;
        }
        output.push_str(&definition.body);
        if !definition.body.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }
}

fn push_rationale(output: &mut String, rationale: &[RationaleEntry]) {
    output.push_str("Rationale:\n");
    for entry in rationale {
        output.push_str("  ");
        output.push_str(&entry.to_string());
        output.push('\n');
    }
}

fn human_plan(plan: &ArchitecturePlan) -> String {
    let mut output = String::new();
    output.push_str("\u{2713} Architecture Plan\n");
    output.push_str(SEPARATOR);
    output.push_str("\n\n");

    output.push_str(&format!("Provider:  {}\n", plan.provider().name()));
    output.push_str(&format!(
        "Template:  {} ({})\n",
        plan.primary_template(),
        plan.primary_template().name()
    ));
    if let Some(winner) = plan.winning_rule() {
        output.push_str(&format!(
            "Rule:      #{} {}\n",
            winner.index + 1,
            winner.rule
        ));
    }

    let resources = plan.additional_resources();
    if resources.is_empty() {
        output.push_str("Resources: (none)\n\n");
    } else {
        output.push_str("Resources:\n");
        for (i, resource) in resources.iter().enumerate() {
            let connector = if i == resources.len() - 1 {
                "\u{2514}"
            } else {
                "\u{251C}"
            };
            output.push_str(&format!(
                "{}\u{2500} {} ({})\n",
                connector,
                resource,
                resource.name()
            ));
        }
        output.push('\n');
    }

    push_rationale(&mut output, plan.rationale());
    if !plan.combination_trace().is_empty() {
        output.push_str("Combination rules:\n");
        for entry in plan.combination_trace() {
            output.push_str("  ");
            output.push_str(&entry.to_string());
            output.push('\n');
        }
    }
    output
}

fn human_suggestion(suggestion: &CapabilitySuggestion) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\u{26A0} {} cannot host this codebase\n",
        suggestion.requested_provider.name()
    ));
    output.push_str(SEPARATOR);
    output.push_str("\n\n");
    output.push_str(&format!("Reason:      {}\n", suggestion.reason));
    output.push_str(&format!("Signal:      {}\n", suggestion.triggering_signal));
    output.push_str(&format!(
        "Suggestion:  re-run with --provider {}\n\n",
        suggestion.recommended_provider
    ));
    push_rationale(&mut output, &suggestion.rationale);
    output
}
