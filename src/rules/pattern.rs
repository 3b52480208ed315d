use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::{LabelerError, Result};

/// Options applied to every pattern of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Let wildcards match path segments starting with `.`. When off, every
    /// hidden segment of a path must be matched by a hidden segment of the
    /// pattern, wherever it sits.
    pub dot: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self { dot: true }
    }
}

/// A compiled glob, possibly negated with a leading `!`
#[derive(Debug, Clone)]
pub struct GlobPattern {
    text: String,
    matcher: GlobMatcher,
    negated: bool,
    /// Hidden segments of the pattern; `None` when `dot` is on
    hidden: Option<Vec<GlobMatcher>>,
}

impl GlobPattern {
    /// Compile `pattern`. An odd number of leading `!` negates the match.
    ///
    /// `@(a|b)` groups are rewritten as `{a,b}`; the other extglob groups are rejected.
    pub fn compile(pattern: &str, options: PatternOptions) -> Result<Self> {
        let stripped = pattern.trim_start_matches('!');
        let negated = (pattern.len() - stripped.len()) % 2 == 1;

        let body = expand_extglob(stripped).map_err(|reason| LabelerError::UnsupportedPattern {
            pattern: pattern.to_string(),
            reason,
        })?;

        let glob = build(&body).map_err(|source| LabelerError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            text: pattern.to_string(),
            matcher: glob.compile_matcher(),
            negated,
            hidden: (!options.dot).then(|| hidden_segments(&body)),
        })
    }

    pub fn is_match(&self, path: &str) -> bool {
        let visible = match &self.hidden {
            None => true,
            Some(segments) => path
                .split('/')
                .filter(|segment| is_hidden(segment))
                .all(|segment| segments.iter().any(|m| m.is_match(segment))),
        };
        let hit = visible && self.matcher.is_match(path);
        hit != self.negated
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

fn build(pattern: &str) -> std::result::Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

fn is_hidden(segment: &str) -> bool {
    segment.starts_with('.') && segment != "." && segment != ".."
}

// Segments that do not compile on their own (a brace group split by `/`) match literally.
fn hidden_segments(pattern: &str) -> Vec<GlobMatcher> {
    pattern
        .split('/')
        .filter(|segment| is_hidden(segment))
        .filter_map(|segment| {
            build(segment)
                .or_else(|_| Glob::new(&globset::escape(segment)))
                .ok()
        })
        .map(|glob| glob.compile_matcher())
        .collect()
}

fn expand_extglob(pattern: &str) -> std::result::Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    expand_into(&chars, false, &mut out)?;
    Ok(out)
}

// Inside a group, a top-level `,` is a literal and gets escaped so it does not
// split the brace alternation it ends up in.
fn expand_into(chars: &[char], in_group: bool, out: &mut String) -> std::result::Result<(), String> {
    let mut braces = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                out.push(c);
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            }
            '[' => {
                let end = class_end(chars, i);
                out.extend(&chars[i..end]);
                i = end;
                continue;
            }
            '@' | '+' | '*' | '?' | '!' if chars.get(i + 1) == Some(&'(') => {
                let close = group_end(chars, i + 1).ok_or_else(|| format!("unclosed `{c}(` group"))?;
                if c != '@' {
                    return Err(format!("`{c}(...)` groups are not supported, use `@(...)` or braces"));
                }
                out.push('{');
                for (n, alternative) in split_alternatives(&chars[i + 2..close]).into_iter().enumerate() {
                    if n > 0 {
                        out.push(',');
                    }
                    expand_into(alternative, true, out)?;
                }
                out.push('}');
                i = close + 1;
                continue;
            }
            '{' => {
                braces += 1;
                out.push(c);
            }
            '}' => {
                braces = braces.saturating_sub(1);
                out.push(c);
            }
            ',' if in_group && braces == 0 => out.push_str("\\,"),
            _ => out.push(c),
        }
        i += 1;
    }
    Ok(())
}

/// Index just past the `]` closing the class opened at `start`
fn class_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() {
        if chars[i] == ']' {
            return i + 1;
        }
        i += 1;
    }
    chars.len()
}

/// Index of the `)` closing the group opened at `open`
fn group_end(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => {
                i = class_end(chars, i);
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn split_alternatives(chars: &[char]) -> Vec<&[char]> {
    let mut alternatives = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => {
                i = class_end(chars, i);
                continue;
            }
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                alternatives.push(&chars[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    alternatives.push(&chars[start..]);
    alternatives
}
