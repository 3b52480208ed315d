use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use super::{resolve_settings, rules_path};
use path_labeler::labels::compile_labels;
use path_labeler::sources::{ConfigLoader, YamlConfigLoader};

pub fn handle_config(
    settings_path: Option<&Path>,
    show: bool,
    validate: bool,
    config: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    if !show && !validate {
        bail!("Use --show or --validate");
    }

    let settings = resolve_settings(settings_path)?;

    if show && !quiet {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    }

    if validate {
        let path = rules_path(&settings, config.as_deref());
        let rules = YamlConfigLoader
            .load_label_rules(&path)
            .with_context(|| format!("❌ Configuration validation failed: {}", path.display()))?;
        compile_labels(&rules, settings.pattern_options())
            .with_context(|| format!("❌ Configuration validation failed: {}", path.display()))?;

        if !quiet {
            println!("✅ Configuration is valid ({} labels)", rules.len());
        }
    }

    Ok(())
}
