//! Evaluation of normalized rules against a change set.
//!
//! A rule entry is `{all?, any?}`. A file satisfies a condition when it
//! matches every `and` glob (a plain list counts as `and`) and at least one
//! `or` glob; an empty `or` is satisfied by every file. `all` requires every
//! changed file to satisfy its condition, `any` requires at least one, so
//! with no changed files `all` holds and `any` does not.

use tracing::{debug, trace};

use super::normalize::normalize;
use super::pattern::{GlobPattern, PatternOptions};
use super::spec::{GlobCondition, RuleSpec};
use crate::error::Result;

/// Receives match decisions as they are made. Every method defaults to a no-op.
pub trait MatchObserver: Sync {
    fn pattern_checked(&self, _label: &str, _pattern: &GlobPattern, _file: &str, _matched: bool) {}

    fn rule_evaluated(&self, _label: &str, _index: usize, _matched: bool) {}

    fn label_evaluated(&self, _label: &str, _matched: bool) {}
}

/// Observer that records nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Observer that forwards decisions to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MatchObserver for TracingObserver {
    fn pattern_checked(&self, label: &str, pattern: &GlobPattern, file: &str, matched: bool) {
        trace!(label, pattern = pattern.as_str(), file, matched, "pattern checked");
    }

    fn rule_evaluated(&self, label: &str, index: usize, matched: bool) {
        debug!(label, rule = index, matched, "rule evaluated");
    }

    fn label_evaluated(&self, label: &str, matched: bool) {
        debug!(label, matched, "label evaluated");
    }
}

#[derive(Debug, Clone)]
struct CompiledCondition {
    and: Vec<GlobPattern>,
    or: Vec<GlobPattern>,
}

impl CompiledCondition {
    fn compile(condition: &GlobCondition, options: PatternOptions) -> Result<Self> {
        let (and, or): (&[String], &[String]) = match condition {
            GlobCondition::Globs(globs) => (globs.as_slice(), &[][..]),
            GlobCondition::Split(split) => (
                split.and.as_deref().unwrap_or_default(),
                split.or.as_deref().unwrap_or_default(),
            ),
        };
        Ok(Self {
            and: compile_all(and, options)?,
            or: compile_all(or, options)?,
        })
    }

    fn satisfied_by(&self, label: &str, file: &str, observer: &dyn MatchObserver) -> bool {
        let check = |pattern: &GlobPattern| {
            let matched = pattern.is_match(file);
            observer.pattern_checked(label, pattern, file, matched);
            matched
        };
        self.and.iter().all(check) && (self.or.is_empty() || self.or.iter().any(check))
    }
}

fn compile_all(globs: &[String], options: PatternOptions) -> Result<Vec<GlobPattern>> {
    globs
        .iter()
        .map(|glob| GlobPattern::compile(glob, options))
        .collect()
}

/// A single rule entry with its patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    all: Option<CompiledCondition>,
    any: Option<CompiledCondition>,
}

impl CompiledRule {
    pub fn compile(spec: &RuleSpec, options: PatternOptions) -> Result<Self> {
        let normalized = normalize(spec);
        Ok(Self {
            all: normalized
                .all
                .as_ref()
                .map(|c| CompiledCondition::compile(c, options))
                .transpose()?,
            any: normalized
                .any
                .as_ref()
                .map(|c| CompiledCondition::compile(c, options))
                .transpose()?,
        })
    }

    fn matches<S: AsRef<str>>(&self, label: &str, files: &[S], observer: &dyn MatchObserver) -> bool {
        let all_ok = self.all.as_ref().map_or(true, |cond| {
            files
                .iter()
                .all(|file| cond.satisfied_by(label, file.as_ref(), observer))
        });
        if !all_ok {
            return false;
        }
        self.any.as_ref().map_or(true, |cond| {
            files
                .iter()
                .any(|file| cond.satisfied_by(label, file.as_ref(), observer))
        })
    }
}

/// All rule entries of one label
#[derive(Debug, Clone)]
pub struct CompiledLabel {
    name: String,
    rules: Vec<CompiledRule>,
}

impl CompiledLabel {
    pub fn compile(name: &str, specs: &[RuleSpec], options: PatternOptions) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|spec| CompiledRule::compile(spec, options))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.to_string(),
            rules,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True on the first entry that matches, in configuration order
    pub fn matches<S: AsRef<str>>(&self, files: &[S], observer: &dyn MatchObserver) -> bool {
        let matched = self.rules.iter().enumerate().any(|(index, rule)| {
            let matched = rule.matches(&self.name, files, observer);
            observer.rule_evaluated(&self.name, index, matched);
            matched
        });
        observer.label_evaluated(&self.name, matched);
        matched
    }
}

/// Whether any of `rules` matches `files`
pub fn matches_any<S: AsRef<str>>(files: &[S], rules: &[RuleSpec], options: PatternOptions) -> Result<bool> {
    Ok(CompiledLabel::compile("", rules, options)?.matches(files, &NoopObserver))
}
