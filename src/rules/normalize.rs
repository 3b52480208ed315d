use super::spec::{GlobCondition, MatchSpec, RuleSpec};

/// Canonical `{all?, any?}` form of a rule entry
pub fn normalize(spec: &RuleSpec) -> MatchSpec {
    match spec {
        RuleSpec::Glob(glob) => MatchSpec {
            all: None,
            any: Some(GlobCondition::Globs(vec![glob.clone()])),
        },
        RuleSpec::Globs(globs) => MatchSpec {
            all: None,
            any: Some(GlobCondition::Globs(globs.clone())),
        },
        RuleSpec::Match(spec) => spec.clone(),
    }
}
