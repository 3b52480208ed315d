use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::resolve_settings;
use crate::cli::InitPreset;
use path_labeler::init;

pub fn handle_init(settings_path: Option<&Path>, preset: InitPreset, path: Option<PathBuf>, quiet: bool) -> Result<()> {
    let init_preset = match preset {
        InitPreset::Minimal => init::InitPreset::Minimal,
        InitPreset::Monorepo => init::InitPreset::Monorepo,
    };

    let path = match path {
        Some(path) => path,
        None => resolve_settings(settings_path)?.configuration_path,
    };

    init::generate_rules_at_path(&path, init_preset)
        .with_context(|| format!("Failed to write label rules: {}", path.display()))?;

    if !quiet {
        println!("✅ Wrote label rules to {}", path.display());
    }

    Ok(())
}
