//! Prohibition rules: exact names, globs, and regexes.

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::case::CaseFoldingPolicy;
use super::path::{normalize, normalize_pattern, NormalizedPath};
use crate::error::Error;

/// Rule set a rule belongs to. Reported with every hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Filename,
    Pattern,
    Regex,
}

impl RuleKind {
    /// Evaluation order for a candidate.
    pub const ALL: [RuleKind; 3] = [RuleKind::Filename, RuleKind::Pattern, RuleKind::Regex];
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Filename => write!(f, "filename"),
            RuleKind::Pattern => write!(f, "pattern"),
            RuleKind::Regex => write!(f, "regex"),
        }
    }
}

/// A single compiled prohibition rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Basename compared under the case policy.
    Exact(String),
    Glob(GlobRule),
    Regex(Regex),
}

impl Rule {
    /// Exact-name rule. Only the final segment of `name` is kept.
    pub fn exact(name: &str) -> Self {
        Rule::Exact(normalize(name).basename().to_string())
    }

    pub fn glob(pattern: &str, policy: CaseFoldingPolicy) -> Result<Self, Error> {
        GlobRule::compile(pattern, policy).map(Rule::Glob)
    }

    pub fn regex(source: &str) -> Result<Self, Error> {
        Regex::new(source)
            .map(Rule::Regex)
            .map_err(|source_err| Error::InvalidRegex {
                pattern: source.to_string(),
                source: source_err,
            })
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Exact(_) => RuleKind::Filename,
            Rule::Glob(_) => RuleKind::Pattern,
            Rule::Regex(_) => RuleKind::Regex,
        }
    }

    pub fn matches(&self, path: &NormalizedPath, policy: CaseFoldingPolicy) -> bool {
        match self {
            Rule::Exact(name) => policy.names_equal(path.basename(), name),
            Rule::Glob(glob) => glob.matches(path, policy),
            Rule::Regex(re) => re.is_match(path.posix()) || re.is_match(path.basename()),
        }
    }
}

/// A glob pattern compiled for the granularity it targets.
#[derive(Debug, Clone)]
pub enum GlobRule {
    /// Pattern with a separator, matched against the whole path. Holds the
    /// pattern as written and, for a leading `**/`, the stripped form too.
    Path(Vec<GlobMatcher>),
    /// Wildcard pattern without a separator, matched against the basename
    /// and each path component.
    Segment(GlobMatcher),
    /// Plain name without wildcards.
    Literal(String),
}

impl GlobRule {
    pub fn compile(pattern: &str, policy: CaseFoldingPolicy) -> Result<Self, Error> {
        let pattern = normalize_pattern(pattern);

        if pattern.contains('/') {
            let mut forms = vec![pattern.as_str()];
            if let Some(stripped) = pattern.strip_prefix("**/") {
                forms.push(stripped);
            }
            let matchers = forms
                .into_iter()
                .map(|form| build_matcher(form, true, false))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(GlobRule::Path(matchers));
        }

        if has_glob_meta(&pattern) {
            let matcher = build_matcher(&pattern, false, policy.is_insensitive())?;
            return Ok(GlobRule::Segment(matcher));
        }

        Ok(GlobRule::Literal(pattern))
    }

    pub fn matches(&self, path: &NormalizedPath, policy: CaseFoldingPolicy) -> bool {
        match self {
            GlobRule::Path(matchers) => matchers.iter().any(|m| m.is_match(path.posix())),
            GlobRule::Segment(matcher) => {
                matcher.is_match(path.basename()) || path.components().any(|c| matcher.is_match(c))
            }
            GlobRule::Literal(name) => policy.names_equal(path.basename(), name),
        }
    }
}

/// True if the pattern contains any of `*`, `?`, `[`.
pub fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Rewrite shell-glob syntax into globset syntax.
///
/// Braces are literal in shell globs, and a `[` without a closing `]` is a
/// literal bracket. Both are wrapped in single-character classes so
/// globset neither alternates nor rejects them.
fn shell_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` directly
/// after the opening `[` or `[!` belongs to the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    chars[j.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| j + offset)
}

fn build_matcher(
    pattern: &str,
    literal_separator: bool,
    case_insensitive: bool,
) -> Result<GlobMatcher, Error> {
    GlobBuilder::new(&shell_glob(pattern))
        .literal_separator(literal_separator)
        .case_insensitive(case_insensitive)
        .backslash_escape(false)
        .allow_unclosed_class(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| Error::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })
}
