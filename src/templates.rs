//! Template definitions
//!
//! The resolver only names a `TemplateId`; what the template contains lives
//! outside the core. A directory of `<template_id>.md` files is the usual
//! source, with short built-in descriptions when no directory is configured.

use crate::fs::FileSystem;
use crate::plan::TemplateId;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{id}' not found at {path:?}")]
    NotFound { id: TemplateId, path: PathBuf },

    #[error("Failed to read template '{id}': {message}")]
    Read { id: TemplateId, message: String },

    #[error("Template '{id}' at {path:?} is empty")]
    Empty { id: TemplateId, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDefinition {
    pub id: TemplateId,
    /// First markdown heading, or the id's display name
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl TemplateDefinition {
    fn parse(id: TemplateId, body: String, source: Option<PathBuf>) -> Self {
        let title = body
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix('#'))
            .map(|heading| heading.trim_start_matches('#').trim().to_string())
            .filter(|heading| !heading.is_empty())
            .unwrap_or_else(|| id.name().to_string());

        Self {
            id,
            title,
            body,
            source,
        }
    }
}

pub trait TemplateLoader {
    fn load(&self, id: TemplateId) -> Result<TemplateDefinition, TemplateError>;
}

/// Every template the rule tables can select
pub fn available_templates() -> &'static [TemplateId] {
    TemplateId::all_variants()
}

/// Reads `<dir>/<template_id>.md`
pub struct DirectoryTemplateLoader {
    dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl DirectoryTemplateLoader {
    pub fn new(dir: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: TemplateId) -> PathBuf {
        self.dir.join(format!("{}.md", id.as_str()))
    }
}

impl TemplateLoader for DirectoryTemplateLoader {
    fn load(&self, id: TemplateId) -> Result<TemplateDefinition, TemplateError> {
        let path = self.path_for(id);
        if !self.fs.is_file(&path) {
            return Err(TemplateError::NotFound { id, path });
        }

        let body = self
            .fs
            .read_to_string(&path)
            .map_err(|e| TemplateError::Read {
                id,
                message: e.to_string(),
            })?;
        if body.trim().is_empty() {
            return Err(TemplateError::Empty { id, path });
        }

        debug!(template = %id, path = %path.display(), "Loaded template definition");
        Ok(TemplateDefinition::parse(id, body, Some(path)))
    }
}

/// Short built-in descriptions, used when no template directory is set
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplateLoader;

fn builtin_description(id: TemplateId) -> &'static str {
    match id {
        TemplateId::StaticSite => {
            "Static assets served from object storage behind a CDN. No server runtime."
        }
        TemplateId::ApiService => {
            "A stateless HTTP API on a managed container runtime with autoscaling."
        }
        TemplateId::FullstackApp => {
            "Server-rendered web application: one service renders pages and serves the API."
        }
        TemplateId::Containerized => {
            "A container image run as a long-lived service. The http variant exposes a port; \
             the worker variant processes jobs without inbound traffic."
        }
        TemplateId::CloudflareWorker => "A Worker script handling requests at the edge.",
        TemplateId::CloudflarePages => {
            "A Pages project serving a static build, with optional Pages Functions."
        }
    }
}

impl TemplateLoader for BuiltinTemplateLoader {
    fn load(&self, id: TemplateId) -> Result<TemplateDefinition, TemplateError> {
        let body = format!("# {}\n\n{}\n", id.name(), builtin_description(id));
        Ok(TemplateDefinition::parse(id, body, None))
    }
}
