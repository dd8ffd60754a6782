use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".venv",
    "venv",
    "__pycache__",
    "dist",
    "build",
    "target",
    ".infera",
];

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_depth: Option<usize>,
    pub max_files: Option<usize>,
    /// Files above this size are listed but never read
    pub max_file_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(10),
            max_files: Some(5000),
            max_file_bytes: 1_048_576,
        }
    }
}

fn is_excluded_dir(entry: &ignore::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Lists repository files relative to `root`, sorted, honoring `.gitignore`
pub fn collect_files(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Repository path is not a directory: {:?}", root);
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize repository path {:?}", root))?;

    let mut files = Vec::new();
    let walker = WalkBuilder::new(&root)
        .max_depth(config.max_depth)
        .hidden(false)
        .git_ignore(true)
        .filter_entry(|entry| !is_excluded_dir(entry))
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        if let Some(max_files) = config.max_files {
            if files.len() >= max_files {
                warn!(max_files, "Reached file limit, stopping scan");
                break;
            }
        }

        let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
        files.push(relative.to_path_buf());
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "Collected repository files");
    Ok(files)
}
