use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub enum InitPreset {
    Minimal,
    Monorepo,
}

/// Write a starter rule document to `path`. An existing file is never overwritten.
pub fn generate_rules_at_path<P: AsRef<Path>>(path: P, preset: InitPreset) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists, refusing to overwrite it", path.display()),
        )
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, preset_rules(preset))?;
    info!(path = %path.display(), ?preset, "wrote starter label rules");
    Ok(())
}

fn preset_rules(preset: InitPreset) -> &'static str {
    match preset {
        InitPreset::Minimal => MINIMAL_RULES,
        InitPreset::Monorepo => MONOREPO_RULES,
    }
}

const MINIMAL_RULES: &str = r#"# Label -> glob rules. A label is applied when any of its entries matches.
documentation:
  - any: ["docs/**", "**/*.md"]

ci:
  - ".github/**"

dependencies:
  - any: ["Cargo.lock", "package-lock.json", "go.sum"]
"#;

const MONOREPO_RULES: &str = r#"# Label -> glob rules. A label is applied when any of its entries matches.
#
#   any: some changed file matches every listed glob
#   all: every changed file matches every listed glob
#   {and, or}: match every `and` glob and at least one `or` glob
documentation:
  - any: ["docs/**", "**/*.md"]

docs-only:
  - all: ["**/*.md"]

backend:
  - any:
      and: ["services/**"]
      or: ["**/*.go", "**/*.rs"]

frontend:
  - any: ["web/**", "!web/**/*.snap"]

module-a:
  - all:
      or: ["pkg/modules/a/**", "go.mod", "go.sum"]

ci:
  - ".github/**"
"#;
