use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::LabelMutator;
use crate::error::Result;
use crate::labels::LabelPlan;

/// Labels of each review unit, kept in a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelStore {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    units: IndexMap<String, Vec<String>>,
}

impl LabelStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut store = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<LabelStore>(&content)?
        } else {
            LabelStore::default()
        };
        store.path = path.to_path_buf();
        debug!(path = %path.display(), units = store.units.len(), "opened label store");
        Ok(store)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn labels(&self, review_unit: &str) -> &[String] {
        self.units.get(review_unit).map(Vec::as_slice).unwrap_or_default()
    }

    fn insert(&mut self, review_unit: &str, labels: &[String]) {
        let entry = self.units.entry(review_unit.to_string()).or_default();
        for label in labels {
            if !entry.contains(label) {
                entry.push(label.clone());
            }
        }
    }

    fn discard(&mut self, review_unit: &str, labels: &[String]) {
        if let Some(entry) = self.units.get_mut(review_unit) {
            entry.retain(|label| !labels.contains(label));
        }
    }
}

impl LabelMutator for LabelStore {
    fn current_labels(&self, review_unit: &str) -> Result<Vec<String>> {
        Ok(self.labels(review_unit).to_vec())
    }

    fn add_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()> {
        self.insert(review_unit, labels);
        info!(review_unit, labels = ?labels, "added labels");
        self.save()
    }

    fn remove_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()> {
        self.discard(review_unit, labels);
        info!(review_unit, labels = ?labels, "removed labels");
        self.save()
    }

    /// Both halves change the in-memory store; the file is written once.
    fn apply_plan(&mut self, review_unit: &str, plan: &LabelPlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        self.insert(review_unit, &plan.add);
        self.discard(review_unit, &plan.remove);
        info!(review_unit, added = ?plan.add, removed = ?plan.remove, "applied label plan");
        self.save()
    }
}

/// Reports label changes without applying them
#[derive(Debug)]
pub struct DryRunMutator<M> {
    inner: M,
}

impl<M: LabelMutator> DryRunMutator<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: LabelMutator> LabelMutator for DryRunMutator<M> {
    fn current_labels(&self, review_unit: &str) -> Result<Vec<String>> {
        self.inner.current_labels(review_unit)
    }

    fn add_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()> {
        info!(review_unit, labels = ?labels, "dry run: would add labels");
        Ok(())
    }

    fn remove_labels(&mut self, review_unit: &str, labels: &[String]) -> Result<()> {
        info!(review_unit, labels = ?labels, "dry run: would remove labels");
        Ok(())
    }
}
