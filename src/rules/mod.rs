pub mod spec;
pub mod normalize;
pub mod pattern;
pub mod evaluator;

// Re-export main types
pub use spec::{GlobCondition, LabelRuleMap, MatchSpec, RuleSpec, SplitCondition};
pub use normalize::normalize;
pub use pattern::{GlobPattern, PatternOptions};
pub use evaluator::{matches_any, CompiledLabel, CompiledRule, MatchObserver, NoopObserver, TracingObserver};
