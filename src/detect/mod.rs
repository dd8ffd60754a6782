//! Filesystem signal detection
//!
//! Runs outside the resolution core: walks a repository, applies the static
//! detection table and hands the resulting `SignalSet` to `resolve`.

mod detector;
mod scanner;

pub use detector::{SignalDetector, MAX_EVIDENCE_CHARS};
pub use scanner::{collect_files, ScanConfig, EXCLUDED_DIRS};

use crate::fs::RealFileSystem;
use crate::signals::SignalSet;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Walks `root` and detects signals from the real filesystem
pub fn scan_repository(root: &Path, config: &ScanConfig) -> Result<SignalSet> {
    let files = collect_files(root, config)?;
    let detector = SignalDetector::new(Arc::new(RealFileSystem::new()))?
        .with_max_file_bytes(config.max_file_bytes);
    detector.detect(root, &files)
}
