pub mod apply;
pub mod check;
pub mod config;
pub mod init;

pub use apply::{handle_apply, ApplyOptions};
pub use check::handle_check;
pub use config::handle_config;
pub use init::handle_init;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::{OutputFormat, SourceArgs};
use path_labeler::config::{load_settings, Settings};
use path_labeler::labels::{compile_labels, evaluate_compiled};
use path_labeler::output::{format_table_output, LabelReport};
use path_labeler::rules::TracingObserver;
use path_labeler::sources::{ChangedFileLister, ConfigLoader, FileListLister, GitDiffLister, YamlConfigLoader};
use path_labeler::LabelEvaluation;

/// Outcome of evaluating the rules against one review unit
pub struct Evaluated {
    pub review_unit: String,
    pub changed_files: usize,
    pub evaluation: LabelEvaluation,
}

pub fn resolve_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_settings(&dir, settings_path).with_context(|| match settings_path {
        Some(path) => format!("Failed to load settings: {}", path.display()),
        None => "Failed to load labeler.toml".to_string(),
    })
}

pub fn rules_path(settings: &Settings, config: Option<&Path>) -> PathBuf {
    config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.configuration_path.clone())
}

/// Load and compile the rules, then list and evaluate the changed files.
///
/// Rules are compiled before any file is listed so configuration and pattern
/// errors abort the run before any label decision exists.
pub fn evaluate_source(settings: &Settings, source: &SourceArgs) -> Result<Evaluated> {
    let path = rules_path(settings, source.config.as_deref());
    let rules = YamlConfigLoader
        .load_label_rules(&path)
        .with_context(|| format!("Failed to load label rules: {}", path.display()))?;

    let mut options = settings.pattern_options();
    if source.no_dot {
        options.dot = false;
    }
    let labels = compile_labels(&rules, options).context("Failed to compile label rules")?;

    let (lister, review_unit): (Box<dyn ChangedFileLister>, String) = match (&source.files, &source.git) {
        (Some(files), None) if files.as_os_str() == "-" => {
            (Box::new(FileListLister::stdin()) as Box<dyn ChangedFileLister>, "stdin".to_string())
        }
        (Some(files), None) => (
            Box::new(FileListLister::from_path(files)) as Box<dyn ChangedFileLister>,
            files.display().to_string(),
        ),
        (None, Some(range)) => (
            Box::new(GitDiffLister::new(&source.repo)) as Box<dyn ChangedFileLister>,
            range.clone(),
        ),
        _ => bail!("Pass either --files <PATH> or --git <RANGE>"),
    };

    let files = lister
        .list_changed_files(&review_unit)
        .with_context(|| format!("Failed to list changed files for {}", review_unit))?;

    let evaluation = evaluate_compiled(&files, &labels, &TracingObserver);

    Ok(Evaluated {
        review_unit,
        changed_files: files.len(),
        evaluation,
    })
}

pub fn resolve_format(format: Option<OutputFormat>, settings: &Settings) -> OutputFormat {
    format.unwrap_or_else(|| match settings.format.as_str() {
        "json" => OutputFormat::Json,
        "table" => OutputFormat::Table,
        other => {
            warn!(format = other, "unknown output format in settings, using table");
            OutputFormat::Table
        }
    })
}

pub fn render(report: &LabelReport, format: &OutputFormat, verbose: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Table => format_table_output(report, verbose),
    })
}
