use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label name to its rule entries; a label matches if any entry matches.
pub type LabelRuleMap = IndexMap<String, Vec<RuleSpec>>;

/// One rule entry as written in the configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// `- "docs/**"`
    Glob(String),
    /// `- ["src/**", "!src/generated/**"]`
    Globs(Vec<String>),
    /// `- any: [...]` / `- all: {and: [...], or: [...]}`
    Match(MatchSpec),
}

/// Structured `{all?, any?}` entry. Both present means both must hold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<GlobCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<GlobCondition>,
}

/// Right-hand side of `all` or `any`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlobCondition {
    /// Plain list: a file satisfies it by matching every glob
    Globs(Vec<String>),
    /// A file satisfies it by matching every `and` glob and at least one `or` glob
    Split(SplitCondition),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<String>>,
}

impl RuleSpec {
    pub fn any(globs: &[&str]) -> Self {
        RuleSpec::Match(MatchSpec {
            all: None,
            any: Some(GlobCondition::from(globs)),
        })
    }

    pub fn all(globs: &[&str]) -> Self {
        RuleSpec::Match(MatchSpec {
            all: Some(GlobCondition::from(globs)),
            any: None,
        })
    }
}

impl From<&[&str]> for GlobCondition {
    fn from(globs: &[&str]) -> Self {
        GlobCondition::Globs(globs.iter().map(|g| g.to_string()).collect())
    }
}
