//! Subcommand handlers
//!
//! Each handler returns the process exit code. Failures are logged and
//! mapped to `EXIT_ERROR`; a capability suggestion from `init` is not a
//! failure and gets its own code.

use super::commands::{DetectArgs, InitArgs, RulesArgs, StatusArgs, TemplatesArgs};
use super::output::{OutputFormat, OutputFormatter, RulesReport, StatusReport};
use crate::config::InferaConfig;
use crate::detect::scan_repository;
use crate::fs::RealFileSystem;
use crate::plan::{Resolution, TemplateId};
use crate::provider::{select_provider, Provider};
use crate::resolver::resolve;
use crate::signals::SignalSet;
use crate::state::{Freshness, StateStore};
use crate::templates::{
    available_templates, BuiltinTemplateLoader, DirectoryTemplateLoader, TemplateLoader,
};
use crate::util::suggest::closest_match;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
/// The provider cannot host the codebase; a different provider is suggested
pub const EXIT_SUGGESTION: i32 = 3;

fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            EXIT_ERROR
        }
    }
}

fn repository_root(path: Option<&PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    if !path.is_dir() {
        return Err(anyhow!(
            "Repository path is not a directory: {}",
            path.display()
        ));
    }
    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize repository path {}", path.display()))
}

fn read_signal_file(path: &Path) -> Result<SignalSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read signal file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid signal list in {}", path.display()))
}

fn state_store(root: &Path, config: &InferaConfig) -> StateStore {
    StateStore::new(root, config.state_dir_for(root), Arc::new(RealFileSystem::new()))
}

pub fn handle_detect(args: &DetectArgs, config: &InferaConfig) -> i32 {
    exit_code(run_detect(args, config))
}

fn run_detect(args: &DetectArgs, config: &InferaConfig) -> Result<i32> {
    let root = repository_root(args.repository_path.as_ref())?;
    info!(repo = %root.display(), "Detecting signals");

    let signals = scan_repository(&root, &config.scan_config())?;
    let output = OutputFormatter::new(args.format.into()).format_signals(&signals)?;
    println!("{}", output);
    Ok(EXIT_OK)
}

pub fn handle_init(args: &InitArgs, config: &InferaConfig) -> i32 {
    exit_code(run_init(args, config))
}

fn run_init(args: &InitArgs, config: &InferaConfig) -> Result<i32> {
    let root = repository_root(args.repository_path.as_ref())?;
    let provider = args.provider.as_deref().unwrap_or(&config.provider);

    let signals = match &args.signals {
        Some(file) => {
            debug!(file = %file.display(), "Reading signals from file");
            read_signal_file(file)?
        }
        None => scan_repository(&root, &config.scan_config())?,
    };

    let resolution = resolve(&signals, provider)?;

    if args.no_save {
        debug!("State not saved (--no-save)");
    } else {
        let store = state_store(&root, config);
        store.save(&resolution, &signals)?;
    }

    let output = OutputFormatter::new(args.format.into()).format_resolution(&resolution)?;
    println!("{}", output);

    match resolution {
        Resolution::Plan(_) => Ok(EXIT_OK),
        Resolution::Suggestion(ref s) => {
            warn!(
                requested = %s.requested_provider,
                recommended = %s.recommended_provider,
                "Provider cannot host this codebase"
            );
            Ok(EXIT_SUGGESTION)
        }
    }
}

pub fn handle_status(args: &StatusArgs, config: &InferaConfig) -> i32 {
    exit_code(run_status(args, config))
}

fn run_status(args: &StatusArgs, config: &InferaConfig) -> Result<i32> {
    let root = repository_root(args.repository_path.as_ref())?;
    let store = state_store(&root, config);

    let record = store.load()?;
    let freshness = match &record {
        Some(record) => {
            let signals = scan_repository(&root, &config.scan_config())?;
            record.freshness(&signals)?
        }
        None => Freshness::Missing,
    };

    let report = StatusReport {
        state_path: store.path(),
        freshness,
        record,
    };
    let output = OutputFormatter::new(args.format.into()).format_status(&report)?;
    println!("{}", output);

    if report.record.is_none() {
        error!(path = %report.state_path.display(), "No saved plan; run 'infera init' first");
        return Ok(EXIT_ERROR);
    }
    Ok(EXIT_OK)
}

pub fn handle_rules(args: &RulesArgs) -> i32 {
    exit_code(run_rules(args))
}

fn run_rules(args: &RulesArgs) -> Result<i32> {
    let providers: Vec<Provider> = match &args.provider {
        Some(name) => vec![select_provider(name)?],
        None => Provider::all_variants().to_vec(),
    };
    let report = RulesReport::for_providers(&providers);
    let output = OutputFormatter::new(args.format.into()).format_rules(&report)?;
    println!("{}", output);
    Ok(EXIT_OK)
}

pub fn handle_templates(args: &TemplatesArgs, config: &InferaConfig) -> i32 {
    exit_code(run_templates(args, config))
}

fn parse_template_id(id: &str) -> Result<TemplateId> {
    TemplateId::from_id(id.trim()).ok_or_else(|| {
        let hint = closest_match(id, available_templates().iter().map(|t| t.as_str()))
            .map(|s| format!(" (did you mean '{}'?)", s))
            .unwrap_or_default();
        anyhow!("Unknown template id '{}'{}", id, hint)
    })
}

fn run_templates(args: &TemplatesArgs, config: &InferaConfig) -> Result<i32> {
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));

    let Some(id) = &args.id else {
        println!("{}", formatter.format_template_list(available_templates())?);
        return Ok(EXIT_OK);
    };
    let id = parse_template_id(id)?;

    let definition = match args.dir.as_ref().or(config.templates_dir.as_ref()) {
        Some(dir) => DirectoryTemplateLoader::new(dir, Arc::new(RealFileSystem::new())).load(id)?,
        None => BuiltinTemplateLoader.load(id)?,
    };

    println!("{}", formatter.format_template(&definition)?);
    Ok(EXIT_OK)
}
