use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use super::ChangedFileLister;
use crate::error::{LabelerError, Result};

/// Changed files read from a newline separated list, or stdin when no path is set
#[derive(Debug, Clone, Default)]
pub struct FileListLister {
    path: Option<PathBuf>,
}

impl FileListLister {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn stdin() -> Self {
        Self { path: None }
    }
}

impl ChangedFileLister for FileListLister {
    fn list_changed_files(&self, review_unit: &str) -> Result<Vec<String>> {
        let content = match &self.path {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                content
            }
        };
        let files = parse_file_list(&content);
        debug!(review_unit, files = files.len(), "read changed file list");
        Ok(files)
    }
}

/// Split a file list into repository-relative POSIX paths.
///
/// Blank lines are skipped, `\` becomes `/` and a leading `./` is dropped.
pub fn parse_file_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalize_path)
        .collect()
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => path,
    }
}

/// Changed files of a revision range (`base...head`) in a local git checkout
#[derive(Debug, Clone)]
pub struct GitDiffLister {
    repo: PathBuf,
}

impl GitDiffLister {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

impl ChangedFileLister for GitDiffLister {
    fn list_changed_files(&self, review_unit: &str) -> Result<Vec<String>> {
        // A range starting with `-` would be read by git as an option
        if review_unit.is_empty() || review_unit.starts_with('-') {
            return Err(LabelerError::Collaborator(format!(
                "invalid revision range '{}'",
                review_unit
            )));
        }

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["diff", "--name-only", "-z"])
            .arg(review_unit)
            .arg("--")
            .output()?;

        if !output.status.success() {
            return Err(LabelerError::Collaborator(format!(
                "git diff {} failed: {}",
                review_unit,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let files: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        debug!(review_unit, repo = %self.repo.display(), files = files.len(), "listed changed files from git");
        Ok(files)
    }
}
