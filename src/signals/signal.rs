use super::catalog::{SignalCategory, SignalId};
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One observed fact about a codebase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    pub present: bool,
    /// File the evidence was found in, relative to the repository root
    pub source: PathBuf,
    pub evidence: String,
}

impl Signal {
    pub fn present(id: SignalId, source: impl Into<PathBuf>, evidence: impl Into<String>) -> Self {
        Self {
            id,
            present: true,
            source: source.into(),
            evidence: evidence.into(),
        }
    }

    pub fn absent(id: SignalId) -> Self {
        Self {
            id,
            present: false,
            source: PathBuf::new(),
            evidence: String::new(),
        }
    }
}

/// Signal as produced by an external detector, before catalog validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSignal {
    pub id: String,
    #[serde(default = "default_present")]
    pub present: bool,
    #[serde(default)]
    pub source: PathBuf,
    #[serde(default)]
    pub evidence: String,
}

fn default_present() -> bool {
    true
}

impl TryFrom<RawSignal> for Signal {
    type Error = ResolveError;

    fn try_from(raw: RawSignal) -> Result<Self, Self::Error> {
        Ok(Signal {
            id: SignalId::parse(&raw.id)?,
            present: raw.present,
            source: raw.source,
            evidence: raw.evidence,
        })
    }
}

/// Complete, read-only collection of signals for one resolution
///
/// Keyed by `SignalId`, so iteration follows catalog order regardless of the
/// order signals were produced in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Signal>", try_from = "Vec<RawSignal>")]
pub struct SignalSet {
    signals: BTreeMap<SignalId, Signal>,
}

impl SignalSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from validated signals; repeated ids are rejected
    pub fn from_signals(signals: impl IntoIterator<Item = Signal>) -> Result<Self, ResolveError> {
        let mut map = BTreeMap::new();
        for signal in signals {
            let id = signal.id;
            if map.insert(id, signal).is_some() {
                return Err(ResolveError::DuplicateSignal {
                    id: id.as_str().to_string(),
                });
            }
        }
        Ok(Self { signals: map })
    }

    /// Builds a set from detector output, validating every id against the catalog
    pub fn from_raw(raw: impl IntoIterator<Item = RawSignal>) -> Result<Self, ResolveError> {
        let signals = raw
            .into_iter()
            .map(Signal::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_signals(signals)
    }

    /// Convenience constructor for present signals without file evidence
    pub fn with_present(ids: &[SignalId]) -> Result<Self, ResolveError> {
        Self::from_signals(
            ids.iter()
                .map(|id| Signal::present(*id, PathBuf::new(), String::new())),
        )
    }

    pub fn get(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(&id)
    }

    /// A recorded signal with `present = false` counts as absent
    pub fn is_present(&self, id: SignalId) -> bool {
        self.signals.get(&id).map_or(false, |s| s.present)
    }

    pub fn any_present(&self, ids: &[SignalId]) -> bool {
        ids.iter().any(|id| self.is_present(*id))
    }

    pub fn present_in(&self, ids: &[SignalId]) -> Vec<SignalId> {
        ids.iter().copied().filter(|id| self.is_present(*id)).collect()
    }

    pub fn has_category(&self, category: SignalCategory) -> bool {
        self.present_ids().any(|id| id.category() == category)
    }

    pub fn present_ids(&self) -> impl Iterator<Item = SignalId> + '_ {
        self.signals
            .values()
            .filter(|s| s.present)
            .map(|s| s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Returns a copy without the given ids
    pub fn without(&self, ids: &[SignalId]) -> Self {
        Self {
            signals: self
                .signals
                .iter()
                .filter(|(id, _)| !ids.contains(id))
                .map(|(id, s)| (*id, s.clone()))
                .collect(),
        }
    }
}

impl From<SignalSet> for Vec<Signal> {
    fn from(set: SignalSet) -> Self {
        set.signals.into_values().collect()
    }
}

impl TryFrom<Vec<RawSignal>> for SignalSet {
    type Error = ResolveError;

    fn try_from(raw: Vec<RawSignal>) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawSignal {
        RawSignal {
            id: id.to_string(),
            present: true,
            source: PathBuf::from("package.json"),
            evidence: format!("\"{}\"", id),
        }
    }

    #[test]
    fn test_from_raw_orders_by_catalog() {
        let set = SignalSet::from_raw(vec![raw("redis-client"), raw("react-dependency")]).unwrap();
        let ids: Vec<_> = set.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SignalId::ReactDependency, SignalId::RedisClient]);
    }

    #[test]
    fn test_from_raw_rejects_unknown_id() {
        let err = SignalSet::from_raw(vec![raw("fastapi"), raw("zope")]).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSignal { ref id, .. } if id == "zope"));
    }

    #[test]
    fn test_from_raw_rejects_duplicate_id() {
        let err = SignalSet::from_raw(vec![raw("fastapi"), raw("fastapi")]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DuplicateSignal {
                id: "fastapi".to_string()
            }
        );
    }

    #[test]
    fn test_absent_signal_is_not_present() {
        let set = SignalSet::from_signals(vec![Signal::absent(SignalId::Dockerfile)]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_present(SignalId::Dockerfile));
        assert!(!set.has_category(SignalCategory::Containerization));
    }

    #[test]
    fn test_deserialize_defaults_present_and_validates() {
        let set: SignalSet =
            serde_json::from_str(r#"[{"id": "fastapi"}, {"id": "mysql-client", "present": false}]"#)
                .unwrap();
        assert!(set.is_present(SignalId::FastApi));
        assert!(!set.is_present(SignalId::MysqlClient));

        let bad = serde_json::from_str::<SignalSet>(r#"[{"id": "nope"}]"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_is_catalog_ordered_list() {
        let set = SignalSet::with_present(&[SignalId::RedisClient, SignalId::FastApi]).unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[0]["id"], "fastapi");
        assert_eq!(json[1]["id"], "redis-client");
    }

    #[test]
    fn test_without_removes_ids() {
        let set = SignalSet::with_present(&[SignalId::FastApi, SignalId::PostgresClient]).unwrap();
        let reduced = set.without(&[SignalId::FastApi]);
        assert!(!reduced.is_present(SignalId::FastApi));
        assert!(reduced.is_present(SignalId::PostgresClient));
    }
}
