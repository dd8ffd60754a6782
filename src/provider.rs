//! Cloud provider selection
//!
//! The provider is always an explicit input. Nothing in the signal set can
//! change it, and it stays fixed for the whole resolution.

use crate::error::ResolveError;
use crate::util::suggest::closest_match;
use std::str::FromStr;

crate::define_id_enum! {
    /// Target cloud provider
    Provider ("provider") {
        Gcp => "gcp" : "Google Cloud Platform",
        Cloudflare => "cloudflare" : "Cloudflare",
    }
}

impl FromStr for Provider {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        select_provider(s)
    }
}

/// Validates an explicit provider choice
pub fn select_provider(value: &str) -> Result<Provider, ResolveError> {
    let normalized = value.trim().to_lowercase();
    Provider::from_id(&normalized).ok_or_else(|| ResolveError::InvalidProvider {
        value: value.to_string(),
        suggestion: closest_match(
            &normalized,
            Provider::all_variants().iter().map(|p| p.as_str()),
        )
        .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_known_providers() {
        assert_eq!(select_provider("gcp").unwrap(), Provider::Gcp);
        assert_eq!(select_provider("cloudflare").unwrap(), Provider::Cloudflare);
    }

    #[test]
    fn test_select_is_case_and_whitespace_insensitive() {
        assert_eq!(select_provider(" GCP ").unwrap(), Provider::Gcp);
        assert_eq!("Cloudflare".parse::<Provider>().unwrap(), Provider::Cloudflare);
    }

    #[test]
    fn test_select_rejects_unsupported_provider() {
        let err = select_provider("aws").unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidProvider {
                value: "aws".to_string(),
                suggestion: None,
            }
        );
    }

    #[test]
    fn test_select_suggests_close_match() {
        match select_provider("cloudflar") {
            Err(ResolveError::InvalidProvider { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("cloudflare"));
            }
            other => panic!("Expected InvalidProvider, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_serialization() {
        assert_eq!(serde_json::to_string(&Provider::Gcp).unwrap(), "\"gcp\"");
        let parsed: Provider = serde_json::from_str("\"cloudflare\"").unwrap();
        assert_eq!(parsed, Provider::Cloudflare);
        assert!(serde_json::from_str::<Provider>("\"azure\"").is_err());
    }
}
