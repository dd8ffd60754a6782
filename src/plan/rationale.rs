//! Rationale trace records
//!
//! One entry per rule considered, in evaluation order. The trace is what makes
//! a resolution auditable: it names the exact rule that chose the template and
//! every combination rule that added a resource.

use crate::signals::SignalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage that produced a rationale entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Capability,
    Decision,
    Combination,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Capability => write!(f, "capability"),
            Stage::Decision => write!(f, "decision"),
            Stage::Combination => write!(f, "combination"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleEntry {
    pub stage: Stage,
    /// Position of the rule in its stage's table
    pub index: usize,
    pub rule: String,
    pub matched: bool,
    /// Template, resource or recommended provider the rule leads to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    /// Signals that satisfied the rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RationaleEntry {
    pub fn new(stage: Stage, index: usize, rule: impl Into<String>, matched: bool) -> Self {
        Self {
            stage,
            index,
            rule: rule.into(),
            matched,
            outcome: None,
            signals: Vec::new(),
            detail: None,
        }
    }

    pub fn with_outcome(mut self, outcome: impl fmt::Display) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_signals(mut self, signals: Vec<SignalId>) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

impl fmt::Display for RationaleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.matched { "\u{2713}" } else { "\u{00B7}" };
        write!(f, "{} [{} #{}] {}", mark, self.stage, self.index + 1, self.rule)?;
        if self.matched {
            if let Some(ref outcome) = self.outcome {
                write!(f, " \u{2192} {}", outcome)?;
            }
        }
        if !self.signals.is_empty() {
            let ids: Vec<&str> = self.signals.iter().map(|s| s.as_str()).collect();
            write!(f, " ({})", ids.join(", "))?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, " - {}", detail)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::TemplateId;

    #[test]
    fn test_display_matched_entry() {
        let entry = RationaleEntry::new(Stage::Decision, 0, "Containerization signal present", true)
            .with_outcome(TemplateId::Containerized)
            .with_signals(vec![SignalId::DockerfileExposePort])
            .with_detail(Some("http variant".to_string()));

        assert_eq!(
            entry.to_string(),
            "\u{2713} [decision #1] Containerization signal present \u{2192} containerized (dockerfile-expose-port) - http variant"
        );
    }

    #[test]
    fn test_display_unmatched_entry_hides_outcome() {
        let entry = RationaleEntry::new(Stage::Decision, 2, "Static frontend", false)
            .with_outcome(TemplateId::StaticSite);
        assert_eq!(entry.to_string(), "\u{00B7} [decision #3] Static frontend");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = RationaleEntry::new(Stage::Combination, 1, "MySQL client", false);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["stage"], "combination");
        assert!(json.get("outcome").is_none());
        assert!(json.get("signals").is_none());
    }
}
