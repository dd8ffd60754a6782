//! Error taxonomy for architecture resolution
//!
//! Capability conflicts are deliberately absent here: they are a first-class
//! result (`Resolution::Suggestion`), not a failure.

use crate::provider::Provider;
use thiserror::Error;

/// Errors returned by signal validation and `resolve`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Provider value outside the supported set
    #[error("Invalid provider '{value}'. Valid options: gcp, cloudflare{}", did_you_mean(suggestion))]
    InvalidProvider {
        value: String,
        suggestion: Option<String>,
    },

    /// Signal id outside the shared catalog, usually a detector bug
    #[error("Invalid signal id '{id}' is not in the signal catalog{}", did_you_mean(suggestion))]
    InvalidSignal {
        id: String,
        suggestion: Option<String>,
    },

    /// A raw signal list carries the same id twice
    #[error("Duplicate signal id '{id}' in signal set")]
    DuplicateSignal { id: String },

    /// The provider's rule chain ended without a match; the rule table is broken
    #[error("No template rule matched for provider {provider}: rule table is missing its default")]
    NoMatchingTemplate { provider: Provider },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

impl ResolveError {
    /// True for errors the caller can fix by changing its input
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ResolveError::NoMatchingTemplate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_provider_message_with_suggestion() {
        let err = ResolveError::InvalidProvider {
            value: "gpc".to_string(),
            suggestion: Some("gcp".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("'gpc'"));
        assert!(msg.contains("did you mean 'gcp'"));
    }

    #[test]
    fn test_invalid_signal_message_without_suggestion() {
        let err = ResolveError::InvalidSignal {
            id: "quantum-db".to_string(),
            suggestion: None,
        };
        assert_eq!(
            err.to_string(),
            "Invalid signal id 'quantum-db' is not in the signal catalog"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        let broken = ResolveError::NoMatchingTemplate {
            provider: Provider::Gcp,
        };
        assert!(!broken.is_caller_error());
        assert!(ResolveError::DuplicateSignal { id: "fastapi".into() }.is_caller_error());
    }
}
