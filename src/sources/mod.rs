//! Collaborators around the evaluator: where changed files come from, where
//! rules are loaded from, and where label decisions are applied.
//!
//! Every call takes the review unit explicitly; implementations hold no
//! process-wide state.

pub mod files;
pub mod store;

use std::path::Path;

use crate::config;
use crate::error::Result;
use crate::labels::LabelPlan;
use crate::rules::LabelRuleMap;

pub use files::{parse_file_list, FileListLister, GitDiffLister};
pub use store::{DryRunMutator, LabelStore};

/// Lists repository-relative paths touched by a review unit
pub trait ChangedFileLister {
    fn list_changed_files(&self, review_unit: &str) -> Result<Vec<String>>;
}

/// Loads the label rule document
pub trait ConfigLoader {
    fn load_label_rules(&self, path: &Path) -> Result<LabelRuleMap>;
}

/// Reads and changes the labels carried by a review unit
pub trait LabelMutator {
    fn current_labels(&self, review_unit: &str) -> Result<Vec<String>>;

    fn add_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()>;

    fn remove_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()>;

    /// Apply both halves of `plan`, additions first. Empty halves are skipped.
    fn apply_plan(&mut self, review_unit: &str, plan: &LabelPlan) -> Result<()> {
        if !plan.add.is_empty() {
            self.add_labels(review_unit, &plan.add)?;
        }
        if !plan.remove.is_empty() {
            self.remove_labels(review_unit, &plan.remove)?;
        }
        Ok(())
    }
}

/// Rule documents in YAML or JSON on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlConfigLoader;

impl ConfigLoader for YamlConfigLoader {
    fn load_label_rules(&self, path: &Path) -> Result<LabelRuleMap> {
        config::load_label_rules(path)
    }
}

/// Apply a plan through `mutator`
pub fn apply_plan(mutator: &mut dyn LabelMutator, review_unit: &str, plan: &LabelPlan) -> Result<()> {
    mutator.apply_plan(review_unit, plan)
}
