//! Error types for rule loading, pattern compilation and the local collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelerError {
    /// A label's rule value has an unexpected shape
    #[error("invalid configuration for label '{label}': {reason}")]
    Config { label: String, reason: String },

    /// The rule document is not a mapping of labels
    #[error("invalid label configuration: {0}")]
    Document(String),

    /// A glob pattern could not be compiled
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A glob uses syntax that has no equivalent here
    #[error("invalid glob pattern '{pattern}': {reason}")]
    UnsupportedPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An external collaborator (git, label store) reported a failure
    #[error("{0}")]
    Collaborator(String),
}

impl LabelerError {
    pub fn config(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            label: label.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelerError>;
