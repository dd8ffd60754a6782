use crate::fs::FileSystem;
use crate::signals::{MatchSpec, Signal, SignalId, SignalSet, DETECTION_TABLE};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

pub const MAX_EVIDENCE_CHARS: usize = 120;

struct CompiledRow {
    spec: &'static MatchSpec,
    content: Option<Regex>,
}

/// Applies the detection table to a list of repository files
pub struct SignalDetector {
    fs: Arc<dyn FileSystem>,
    rows: Vec<CompiledRow>,
    max_file_bytes: u64,
}

impl SignalDetector {
    pub fn new(fs: Arc<dyn FileSystem>) -> Result<Self> {
        let rows = DETECTION_TABLE
            .iter()
            .map(|spec| {
                let content = spec
                    .content
                    .map(Regex::new)
                    .transpose()
                    .with_context(|| format!("Invalid content pattern for {}", spec.signal))?;
                Ok(CompiledRow { spec, content })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fs,
            rows,
            max_file_bytes: 1_048_576,
        })
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Detects signals in `files` (relative to `root`); the first file in
    /// sorted order wins for each signal id
    pub fn detect(&self, root: &Path, files: &[PathBuf]) -> Result<SignalSet> {
        let mut sorted: Vec<&PathBuf> = files.iter().collect();
        sorted.sort();

        let mut found: BTreeMap<SignalId, Signal> = BTreeMap::new();

        for relative in sorted {
            let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let extension = relative.extension().and_then(|e| e.to_str());
            let dirs: Vec<&str> = relative
                .parent()
                .map(|p| p.iter().filter_map(|c| c.to_str()).collect())
                .unwrap_or_default();

            let mut content: Option<Option<String>> = None;

            for row in &self.rows {
                if found.contains_key(&row.spec.signal) {
                    continue;
                }
                if !row
                    .spec
                    .files
                    .iter()
                    .any(|p| p.matches(file_name, extension, &dirs))
                {
                    continue;
                }

                let evidence = match &row.content {
                    None => format!("{} present", file_name),
                    Some(pattern) => {
                        let text = content.get_or_insert_with(|| self.read(&root.join(relative)));
                        let Some(text) = text.as_deref() else {
                            continue;
                        };
                        match first_matching_line(pattern, text) {
                            Some(line) => line,
                            None => continue,
                        }
                    }
                };

                trace!(
                    signal = %row.spec.signal,
                    file = %relative.display(),
                    "Detection row matched"
                );
                found.insert(
                    row.spec.signal,
                    Signal::present(row.spec.signal, relative.clone(), evidence),
                );
            }
        }

        info!(
            files = files.len(),
            signals = found.len(),
            "Signal detection complete"
        );

        Ok(SignalSet::from_signals(found.into_values())?)
    }

    fn read(&self, path: &Path) -> Option<String> {
        match self.fs.metadata(path) {
            Ok(meta) if meta.len() > self.max_file_bytes => {
                debug!(path = %path.display(), size = meta.len(), "Skipping large file");
                return None;
            }
            Ok(_) => {}
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Cannot stat file");
                return None;
            }
        }

        match self.fs.read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Skipping unreadable file");
                None
            }
        }
    }
}

/// The trimmed line containing the first match, bounded in length
fn first_matching_line(pattern: &Regex, text: &str) -> Option<String> {
    let m = pattern.find(text)?;
    let start = text[..m.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[m.start()..]
        .find('\n')
        .map(|i| m.start() + i)
        .unwrap_or(text.len());

    let line = text[start..end].trim();
    Some(line.chars().take(MAX_EVIDENCE_CHARS).collect())
}
