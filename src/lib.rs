pub mod config;
pub mod error;
pub mod init;
pub mod labels;
pub mod output;
pub mod rules;
pub mod sources;

// Re-export main types for easy access
pub use error::{LabelerError, Result};
pub use labels::{evaluate_labels, plan_labels, LabelEvaluation, LabelPlan, PlanOptions};
pub use rules::{matches_any, LabelRuleMap, MatchObserver, PatternOptions, RuleSpec};
pub use sources::{ChangedFileLister, ConfigLoader, LabelMutator};
