use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{evaluate_source, render, resolve_format, resolve_settings};
use crate::cli::{OutputFormat, SourceArgs};
use path_labeler::output::create_report;

pub fn handle_check(
    settings_path: Option<&Path>,
    source: &SourceArgs,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let settings = resolve_settings(settings_path)?;

    let evaluated = evaluate_source(&settings, source)?;
    info!(
        review_unit = %evaluated.review_unit,
        matched = evaluated.evaluation.to_add.len(),
        "label rules evaluated"
    );

    let report = create_report(&evaluated.review_unit, evaluated.changed_files, evaluated.evaluation);
    let format = resolve_format(format, &settings);
    let output_content = render(&report, &format, verbose)?;

    match output {
        Some(path) => fs::write(&path, output_content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?,
        None => {
            if !quiet {
                println!("{}", output_content);
            }
        }
    }

    Ok(())
}
