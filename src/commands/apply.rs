use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::{evaluate_source, render, resolve_format, resolve_settings};
use crate::cli::{OutputFormat, SourceArgs};
use path_labeler::labels::plan_labels;
use path_labeler::output::create_report;
use path_labeler::sources::{apply_plan, DryRunMutator, LabelMutator, LabelStore};

pub struct ApplyOptions {
    pub unit: Option<String>,
    pub sync_labels: bool,
    pub dry_run: bool,
    pub store: Option<PathBuf>,
}

pub fn handle_apply(
    settings_path: Option<&Path>,
    source: &SourceArgs,
    options: ApplyOptions,
    format: Option<OutputFormat>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let mut settings = resolve_settings(settings_path)?;
    // CLI flags override settings
    settings.sync_labels = settings.sync_labels || options.sync_labels;
    let store_path = options.store.unwrap_or_else(|| settings.label_store.clone());

    // Every label is decided before the store is touched.
    let evaluated = evaluate_source(&settings, source)?;
    let review_unit = options.unit.unwrap_or_else(|| evaluated.review_unit.clone());

    let store = LabelStore::open(&store_path)
        .with_context(|| format!("Failed to open label store: {}", store_path.display()))?;
    let current = store.current_labels(&review_unit)?;
    let plan = plan_labels(&evaluated.evaluation, &current, settings.plan_options());

    let mut mutator: Box<dyn LabelMutator> = if options.dry_run {
        Box::new(DryRunMutator::new(store))
    } else {
        Box::new(store)
    };
    apply_plan(mutator.as_mut(), &review_unit, &plan)
        .with_context(|| format!("Failed to update labels of {}", review_unit))?;

    let mut report = create_report(&review_unit, evaluated.changed_files, evaluated.evaluation);
    report.plan = Some(plan);

    if !quiet {
        let format = resolve_format(format, &settings);
        println!("{}", render(&report, &format, verbose)?);
        if options.dry_run {
            eprintln!("Dry run: no labels were changed");
        }
    }

    Ok(())
}
