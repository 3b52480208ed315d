use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::rules::{CompiledLabel, LabelRuleMap, MatchObserver, NoopObserver, PatternOptions};

/// Upper bound on labels a review unit may carry
pub const DEFAULT_MAX_LABELS: usize = 100;

/// Per-label outcome of one run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelEvaluation {
    /// Labels whose rules matched, in configuration order
    pub to_add: IndexSet<String>,
    /// Every configured label with its match result
    pub to_consider: IndexMap<String, bool>,
}

impl LabelEvaluation {
    pub fn matched(&self, label: &str) -> Option<bool> {
        self.to_consider.get(label).copied()
    }
}

/// Compile every label up front so a bad pattern fails before any evaluation
pub fn compile_labels(rules: &LabelRuleMap, options: PatternOptions) -> Result<Vec<CompiledLabel>> {
    rules
        .iter()
        .map(|(label, specs)| CompiledLabel::compile(label, specs, options))
        .collect()
}

/// Evaluate compiled labels against the change set, in parallel across labels
pub fn evaluate_compiled<S>(
    files: &[S],
    labels: &[CompiledLabel],
    observer: &dyn MatchObserver,
) -> LabelEvaluation
where
    S: AsRef<str> + Sync,
{
    let results: Vec<(String, bool)> = labels
        .par_iter()
        .map(|label| (label.name().to_string(), label.matches(files, observer)))
        .collect();

    let mut evaluation = LabelEvaluation::default();
    for (label, matched) in results {
        if matched {
            evaluation.to_add.insert(label.clone());
        }
        evaluation.to_consider.insert(label, matched);
    }

    debug!(
        labels = evaluation.to_consider.len(),
        matched = evaluation.to_add.len(),
        files = files.len(),
        "evaluated label rules"
    );
    evaluation
}

/// Decide, for every label in `rules`, whether it matches `files`
pub fn evaluate_labels<S>(files: &[S], rules: &LabelRuleMap, options: PatternOptions) -> Result<LabelEvaluation>
where
    S: AsRef<str> + Sync,
{
    evaluate_labels_with(files, rules, options, &NoopObserver)
}

pub fn evaluate_labels_with<S>(
    files: &[S],
    rules: &LabelRuleMap,
    options: PatternOptions,
    observer: &dyn MatchObserver,
) -> Result<LabelEvaluation>
where
    S: AsRef<str> + Sync,
{
    let labels = compile_labels(rules, options)?;
    Ok(evaluate_compiled(files, &labels, observer))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Remove configured labels that no longer match
    pub sync_labels: bool,
    pub max_labels: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            sync_labels: false,
            max_labels: DEFAULT_MAX_LABELS,
        }
    }
}

/// Label changes to apply to a review unit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelPlan {
    /// Matched labels the unit does not carry yet
    pub add: Vec<String>,
    /// Present labels to drop (sync mode only)
    pub remove: Vec<String>,
    /// Labels the unit carries once the plan is applied
    pub all: Vec<String>,
}

impl LabelPlan {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Work out which labels to add and remove given the labels currently present.
///
/// Only labels configured in the evaluated rule map are ever removed.
pub fn plan_labels(evaluation: &LabelEvaluation, current: &[String], options: PlanOptions) -> LabelPlan {
    let current: IndexSet<&str> = current.iter().map(String::as_str).collect();

    let remove: Vec<String> = if options.sync_labels {
        current
            .iter()
            .filter(|label| evaluation.matched(label) == Some(false))
            .map(|label| label.to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut kept: Vec<String> = current
        .iter()
        .filter(|label| !remove.iter().any(|r| r == *label))
        .map(|label| label.to_string())
        .collect();

    let mut add: Vec<String> = evaluation
        .to_add
        .iter()
        .filter(|label| !current.contains(label.as_str()))
        .cloned()
        .collect();

    let room = options.max_labels.saturating_sub(kept.len());
    if add.len() > room {
        let dropped = add.split_off(room);
        warn!(
            max_labels = options.max_labels,
            dropped = ?dropped,
            "label limit reached, not adding every matched label"
        );
    }

    kept.extend(add.iter().cloned());
    LabelPlan {
        add,
        remove,
        all: kept,
    }
}
