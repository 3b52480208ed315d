use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LabelerError, Result};
use crate::labels::{PlanOptions, DEFAULT_MAX_LABELS};
use crate::rules::{LabelRuleMap, PatternOptions, RuleSpec};

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "labeler.toml";

/// Default location of the label rule document
pub const DEFAULT_RULES_PATH: &str = ".github/labeler.yml";

/// Default location of the local label store
pub const DEFAULT_LABEL_STORE: &str = ".labeler-state.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label rule document (YAML or JSON)
    pub configuration_path: PathBuf,

    /// Remove configured labels that no longer match
    pub sync_labels: bool,

    /// Let wildcards match hidden path segments
    pub dot: bool,

    /// Output format (table, json)
    pub format: String,

    /// Maximum number of labels a review unit may carry
    pub max_labels: usize,

    /// JSON file holding the labels of each review unit
    pub label_store: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            configuration_path: PathBuf::from(DEFAULT_RULES_PATH),
            sync_labels: false,
            dot: true,
            format: "table".to_string(),
            max_labels: DEFAULT_MAX_LABELS,
            label_store: PathBuf::from(DEFAULT_LABEL_STORE),
        }
    }
}

impl Settings {
    pub fn pattern_options(&self) -> PatternOptions {
        PatternOptions { dot: self.dot }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            sync_labels: self.sync_labels,
            max_labels: self.max_labels,
        }
    }
}

/// Load settings from `path`, or from `labeler.toml` under `dir` when no path is given.
///
/// A missing default file yields `Settings::default()`; a missing explicit file is an error.
pub fn load_settings(dir: &Path, path: Option<&Path>) -> Result<Settings> {
    let settings_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = dir.join(SETTINGS_FILE);
            if !default_path.exists() {
                debug!(path = %default_path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&settings_path)?;
    let settings: Settings = toml::from_str(&content)?;
    debug!(path = %settings_path.display(), "loaded settings");
    Ok(settings)
}

/// Read and parse a label rule document
pub fn load_label_rules(path: &Path) -> Result<LabelRuleMap> {
    let content = fs::read_to_string(path)?;
    parse_label_rules(&content)
}

/// Parse a label rule document.
///
/// Each label maps to a glob string or a sequence of entries; anything else is
/// rejected with an error naming the label.
pub fn parse_label_rules(content: &str) -> Result<LabelRuleMap> {
    if content.trim().is_empty() {
        return Ok(LabelRuleMap::new());
    }
    let document: Value = serde_yaml::from_str(content)?;
    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(LabelRuleMap::new()),
        other => {
            return Err(LabelerError::Document(format!(
                "expected a mapping of label names, found {}",
                describe(&other)
            )))
        }
    };

    let mut rules = LabelRuleMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let label = match key {
            Value::String(label) => label,
            other => {
                return Err(LabelerError::config(
                    render_key(&other),
                    "label names must be strings",
                ))
            }
        };

        let specs = match value {
            Value::String(glob) => vec![RuleSpec::Glob(glob)],
            Value::Sequence(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| parse_entry(&label, index, entry))
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(LabelerError::config(
                    label,
                    format!("expected a string or a sequence, found {}", describe(&other)),
                ))
            }
        };

        rules.insert(label, specs);
    }

    debug!(labels = rules.len(), "parsed label rules");
    Ok(rules)
}

fn parse_entry(label: &str, index: usize, entry: Value) -> Result<RuleSpec> {
    let kind = describe(&entry);
    serde_yaml::from_value(entry).map_err(|_| {
        LabelerError::config(
            label,
            format!(
                "entry {} must be a glob, a list of globs or an all/any object, found {}",
                index + 1,
                kind
            ),
        )
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn render_key(key: &Value) -> String {
    match key {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => describe(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GlobCondition, MatchSpec, SplitCondition};
    use tempfile::tempdir;

    #[test]
    fn test_settings_default_when_missing() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path(), None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.configuration_path, PathBuf::from(".github/labeler.yml"));
        assert!(!settings.sync_labels);
        assert!(settings.dot);
        assert_eq!(settings.max_labels, 100);
    }

    #[test]
    fn test_settings_from_file() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join(SETTINGS_FILE),
            r#"
configuration_path = "ci/labels.yml"
sync_labels = true
dot = false
format = "json"
"#,
        )
        .unwrap();

        let settings = load_settings(temp_dir.path(), None).unwrap();
        assert_eq!(settings.configuration_path, PathBuf::from("ci/labels.yml"));
        assert!(settings.sync_labels);
        assert!(!settings.dot);
        assert_eq!(settings.format, "json");
        // Unset fields keep their defaults
        assert_eq!(settings.max_labels, 100);
        assert_eq!(settings.label_store, PathBuf::from(".labeler-state.json"));
        assert!(settings.plan_options().sync_labels);
        assert!(!settings.pattern_options().dot);
    }

    #[test]
    fn test_explicit_settings_file_must_exist() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(matches!(
            load_settings(temp_dir.path(), Some(missing.as_path())),
            Err(LabelerError::Io(_))
        ));
    }

    #[test]
    fn test_parse_all_rule_shapes() {
        let rules = parse_label_rules(
            r#"
docs: "docs/**"
rust:
  - "**/*.rs"
  - any: ["Cargo.toml", "Cargo.lock"]
frontend:
  - all:
      and: ["web/**"]
      or: ["**/*.ts", "**/*.css"]
    any: ["web/src/**"]
pair:
  - ["src/**", "!src/gen/**"]
"#,
        )
        .unwrap();

        assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["docs", "rust", "frontend", "pair"]);
        assert_eq!(rules["docs"], vec![RuleSpec::Glob("docs/**".to_string())]);
        assert_eq!(
            rules["rust"],
            vec![
                RuleSpec::Glob("**/*.rs".to_string()),
                RuleSpec::any(&["Cargo.toml", "Cargo.lock"]),
            ]
        );
        assert_eq!(
            rules["frontend"],
            vec![RuleSpec::Match(MatchSpec {
                all: Some(GlobCondition::Split(SplitCondition {
                    and: Some(vec!["web/**".to_string()]),
                    or: Some(vec!["**/*.ts".to_string(), "**/*.css".to_string()]),
                })),
                any: Some(GlobCondition::Globs(vec!["web/src/**".to_string()])),
            })]
        );
        assert_eq!(
            rules["pair"],
            vec![RuleSpec::Globs(vec!["src/**".to_string(), "!src/gen/**".to_string()])]
        );
    }

    #[test]
    fn test_parse_json_document() {
        let rules = parse_label_rules(r#"{"go": [{"all": {"or": ["go.mod", "**/*.go"]}}]}"#).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(matches!(rules["go"][0], RuleSpec::Match(_)));
    }

    #[test]
    fn test_number_value_names_label() {
        let err = parse_label_rules("docs: docs/**\nbroken: 42\n").unwrap_err();
        match &err {
            LabelerError::Config { label, reason } => {
                assert_eq!(label, "broken");
                assert!(reason.contains("a number"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("'broken'"));
    }

    #[test]
    fn test_mapping_value_is_rejected() {
        let err = parse_label_rules("docs:\n  any: [\"docs/**\"]\n").unwrap_err();
        assert!(matches!(err, LabelerError::Config { ref label, .. } if label == "docs"));
    }

    #[test]
    fn test_bad_entry_names_label() {
        let err = parse_label_rules("docs:\n  - true\n").unwrap_err();
        assert!(matches!(err, LabelerError::Config { ref label, .. } if label == "docs"));

        let err = parse_label_rules("docs:\n  - all: 3\n").unwrap_err();
        assert!(matches!(err, LabelerError::Config { ref label, .. } if label == "docs"));

        // Misspelled keys are rejected rather than silently matching everything
        let err = parse_label_rules("docs:\n  - anyy: [\"docs/**\"]\n").unwrap_err();
        assert!(matches!(err, LabelerError::Config { ref label, .. } if label == "docs"));

        let err = parse_label_rules("docs:\n  - all:\n      nor: [\"docs/**\"]\n").unwrap_err();
        assert!(matches!(err, LabelerError::Config { ref label, .. } if label == "docs"));
    }

    #[test]
    fn test_non_mapping_document() {
        assert!(matches!(
            parse_label_rules("- docs/**\n"),
            Err(LabelerError::Document(_))
        ));
        assert!(parse_label_rules("").unwrap().is_empty());
    }

    #[test]
    fn test_load_label_rules_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("labeler.yml");
        fs::write(&path, "docs: docs/**\n").unwrap();
        let rules = load_label_rules(&path).unwrap();
        assert_eq!(rules.len(), 1);
    }
}
