//! Prohibited filename matching.
//!
//! Three independent rule sets are checked against every candidate path:
//! exact basenames, glob patterns, and regexes. A candidate is reported once
//! for each rule set it trips, so a file hit by both an exact name and a
//! pattern shows up twice.

pub mod case;
pub mod path;
pub mod report;
pub mod rule;

use regex::Regex;
use tracing::debug;

pub use case::CaseFoldingPolicy;
pub use path::{normalize, NormalizedPath};
pub use report::{Hit, OutputFormat, Report, ScanMode, REPORT_PREFIX};
pub use rule::{GlobRule, Rule, RuleKind};

use crate::error::Error;

/// Raw rule sources, as collected from flags and config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSources {
    pub filenames: Vec<String>,
    pub patterns: Vec<String>,
    pub regexes: Vec<String>,
}

impl RuleSources {
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty() && self.patterns.is_empty() && self.regexes.is_empty()
    }
}

/// Compiled rule sets plus the case policy they are evaluated under.
#[derive(Debug, Clone)]
pub struct Matcher {
    policy: CaseFoldingPolicy,
    rules: Vec<Rule>,
}

impl Matcher {
    /// Compile rules under the host case policy.
    pub fn new(sources: &RuleSources) -> Result<Self, Error> {
        Self::with_policy(CaseFoldingPolicy::host(), sources)
    }

    /// Compile every rule up front. Any invalid regex or glob fails here,
    /// before a single candidate is looked at.
    pub fn with_policy(policy: CaseFoldingPolicy, sources: &RuleSources) -> Result<Self, Error> {
        let mut rules = Vec::with_capacity(
            sources.filenames.len() + sources.patterns.len() + sources.regexes.len(),
        );
        rules.extend(non_blank(&sources.filenames).map(Rule::exact));
        for pattern in non_blank(&sources.patterns) {
            rules.push(Rule::glob(pattern, policy)?);
        }
        for source in &sources.regexes {
            rules.push(Rule::regex(source)?);
        }

        debug!(
            filenames = sources.filenames.len(),
            patterns = sources.patterns.len(),
            regexes = sources.regexes.len(),
            ?policy,
            "Compiled prohibition rules"
        );

        Ok(Self::from_rules(policy, rules))
    }

    pub fn from_rules(policy: CaseFoldingPolicy, rules: Vec<Rule>) -> Self {
        Self { policy, rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule sets that flag `candidate`, in evaluation order.
    pub fn hit_kinds(&self, candidate: &str) -> Vec<RuleKind> {
        let path = normalize(candidate);
        RuleKind::ALL
            .into_iter()
            .filter(|&kind| {
                self.rules
                    .iter()
                    .filter(|rule| rule.kind() == kind)
                    .any(|rule| rule.matches(&path, self.policy))
            })
            .collect()
    }

    /// Check a batch of candidates.
    pub fn check<S: AsRef<str>>(&self, candidates: &[S], mode: ScanMode) -> Report {
        let mut report = Report::default();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            for kind in self.hit_kinds(candidate) {
                debug!(candidate, %kind, "Prohibited filename");
                report.push(candidate, kind);
                if mode == ScanMode::FailFast {
                    return report;
                }
            }
        }
        report
    }
}

/// True if the basename of `path` equals the basename of any `names` entry.
pub fn match_filename<S: AsRef<str>>(
    path: &str,
    names: &[S],
    policy: CaseFoldingPolicy,
) -> bool {
    let path = normalize(path);
    non_blank(names).any(|name| Rule::exact(name).matches(&path, policy))
}

/// True if `path` matches any glob in `patterns`.
pub fn matches_patterns<S: AsRef<str>>(
    path: &str,
    patterns: &[S],
    policy: CaseFoldingPolicy,
) -> Result<bool, Error> {
    let path = normalize(path);
    for pattern in non_blank(patterns) {
        if Rule::glob(pattern, policy)?.matches(&path, policy) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// True if any regex finds a match in the full path or the basename.
pub fn matches_regexes(path: &str, regexes: &[Regex]) -> bool {
    let path = normalize(path);
    regexes
        .iter()
        .any(|re| re.is_match(path.posix()) || re.is_match(path.basename()))
}

/// Name and pattern entries that are empty or all whitespace are not rules.
fn non_blank<S: AsRef<str>>(items: &[S]) -> impl Iterator<Item = &str> {
    items
        .iter()
        .map(|item| item.as_ref())
        .filter(|item| !item.trim().is_empty())
}

/// Check `candidates` in batch mode under the host case policy.
///
/// Returns the exit code (1 if anything was flagged) and the hits.
pub fn find_prohibited<S: AsRef<str>>(
    sources: &RuleSources,
    candidates: &[S],
) -> Result<(i32, Vec<Hit>), Error> {
    let report = Matcher::new(sources)?.check(candidates, ScanMode::Batch);
    Ok((report.exit_code(), report.into_hits()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSITIVE: CaseFoldingPolicy = CaseFoldingPolicy::Sensitive;

    fn sources(filenames: &[&str], patterns: &[&str], regexes: &[&str]) -> RuleSources {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        RuleSources {
            filenames: owned(filenames),
            patterns: owned(patterns),
            regexes: owned(regexes),
        }
    }

    #[test]
    fn test_match_filename_basename() {
        assert!(match_filename("dir/sub/README.md", &["README.md"], SENSITIVE));
        assert!(match_filename("README.md", &["dir/README.md"], SENSITIVE));
        assert!(!match_filename("dir/sub/readme.md", &["README.md"], SENSITIVE));
        assert!(!match_filename("README.md", &[] as &[&str], SENSITIVE));
    }

    #[test]
    fn test_match_filename_case_insensitive() {
        let policy = CaseFoldingPolicy::Insensitive;
        assert!(match_filename("dir/ReadMe.md", &["README.md"], policy));
        assert!(match_filename("README.md", &["dir/readme.MD"], policy));
        assert!(!match_filename("notes.md", &["README.md"], policy));
    }

    #[test]
    fn test_matches_patterns_basename_and_components() {
        assert!(matches_patterns("a/b/file.txt", &["*.txt"], SENSITIVE).unwrap());
        assert!(!matches_patterns("a/b/file.txt", &["*.md"], SENSITIVE).unwrap());
        assert!(matches_patterns("x/whoopie/z.txt", &["*whoop*"], SENSITIVE).unwrap());
        assert!(!matches_patterns("x/y/z.txt", &["*whoop*"], SENSITIVE).unwrap());
    }

    #[test]
    fn test_matches_patterns_recursive() {
        let pats = ["**/secrets/*"];
        assert!(matches_patterns("a/secrets/cred.pem", &pats, SENSITIVE).unwrap());
        assert!(matches_patterns("secrets/cred.pem", &pats, SENSITIVE).unwrap());
        assert!(!matches_patterns("secrets.pem", &pats, SENSITIVE).unwrap());
        assert!(
            matches_patterns("keys/id_rsa.pem", &["**/secrets/*", "*.pem"], SENSITIVE).unwrap()
        );
        assert!(matches_patterns("keys/id_rsa.pem", &["**/keys/*.pem"], SENSITIVE).unwrap());
        assert!(!matches_patterns("keys/id_rsa.pem", &["**/secrets/*.pem"], SENSITIVE).unwrap());
    }

    #[test]
    fn test_matches_patterns_backslash_pattern() {
        assert!(matches_patterns("dir/sub/file.txt", &[r"dir\sub\file.txt"], SENSITIVE).unwrap());
    }

    #[test]
    fn test_literal_pattern_equals_exact_match() {
        for path in ["a/b/LICENSE", "LICENSE", "license", "a/LICENSE/x", "/LICENSE"] {
            assert_eq!(
                matches_patterns(path, &["LICENSE"], SENSITIVE).unwrap(),
                match_filename(path, &["LICENSE"], SENSITIVE),
                "{path}"
            );
        }
    }

    #[test]
    fn test_empty_pattern_list_never_matches() {
        assert!(!matches_patterns("anything", &[] as &[&str], SENSITIVE).unwrap());
    }

    #[test]
    fn test_matches_regexes() {
        let regexes = vec![Regex::new(r"\.key$").unwrap(), Regex::new("^credentials").unwrap()];
        assert!(matches_regexes("conf/server.key", &regexes));
        assert!(matches_regexes("aws/credentials.json", &regexes));
        assert!(!matches_regexes("src/main.rs", &regexes));
        assert!(!matches_regexes("src/main.rs", &[]));
    }

    #[test]
    fn test_scenario_from_staged_list() {
        let candidates = [
            "docs/README.md",
            "keys/id_rsa.pem",
            "src/secrets/api_key.txt",
            "src/ok.txt",
        ];
        let (code, hits) =
            find_prohibited(&sources(&["README.md"], &["*.pem", "**/secrets/*"], &[]), &candidates)
                .unwrap();
        assert_eq!(code, 1);
        let flagged: Vec<&str> = hits.iter().map(|h| h.candidate.as_str()).collect();
        assert_eq!(
            flagged,
            vec!["docs/README.md", "keys/id_rsa.pem", "src/secrets/api_key.txt"]
        );
    }

    #[test]
    fn test_duplicate_hits_per_rule_set() {
        let matcher =
            Matcher::with_policy(SENSITIVE, &sources(&["README.md"], &["*.md"], &[])).unwrap();
        let report = matcher.check(&["docs/README.md"], ScanMode::Batch);
        assert_eq!(
            report.hits(),
            &[
                Hit {
                    candidate: "docs/README.md".to_string(),
                    kind: RuleKind::Filename
                },
                Hit {
                    candidate: "docs/README.md".to_string(),
                    kind: RuleKind::Pattern
                },
            ]
        );
        assert_eq!(report.render_text().unwrap().matches("docs/README.md").count(), 2);
    }

    #[test]
    fn test_one_hit_per_rule_set_even_with_several_matching_rules() {
        let matcher =
            Matcher::with_policy(SENSITIVE, &sources(&[], &["*.pem", "id_*"], &[])).unwrap();
        let report = matcher.check(&["keys/id_rsa.pem"], ScanMode::Batch);
        assert_eq!(report.hits().len(), 1);
    }

    #[test]
    fn test_all_three_rule_sets() {
        let matcher = Matcher::with_policy(
            SENSITIVE,
            &sources(&["id_rsa"], &["**/.ssh/*"], &["rsa$"]),
        )
        .unwrap();
        assert_eq!(
            matcher.hit_kinds("home/.ssh/id_rsa"),
            vec![RuleKind::Filename, RuleKind::Pattern, RuleKind::Regex]
        );
        assert!(matcher.hit_kinds("home/notes.txt").is_empty());
    }

    #[test]
    fn test_fail_fast_stops_at_first_hit() {
        let matcher =
            Matcher::with_policy(SENSITIVE, &sources(&["README.md"], &["*.md", "*.pem"], &[]))
                .unwrap();
        let candidates = ["ok.txt", "docs/README.md", "keys/id_rsa.pem"];

        let fast = matcher.check(&candidates, ScanMode::FailFast);
        assert_eq!(fast.hits().len(), 1);
        assert_eq!(fast.hits()[0].candidate, "docs/README.md");
        assert_eq!(fast.exit_code(), 1);

        let batch = matcher.check(&candidates, ScanMode::Batch);
        assert_eq!(batch.hits().len(), 3);
    }

    #[test]
    fn test_empty_rules_and_candidates() {
        let (code, hits) = find_prohibited(&RuleSources::default(), &["ok.txt", "more/ok.py"]).unwrap();
        assert_eq!(code, 0);
        assert!(hits.is_empty());

        let (code, hits) =
            find_prohibited(&sources(&["LICENSE"], &["*.pem"], &[]), &[] as &[&str]).unwrap();
        assert_eq!(code, 0);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_invalid_regex_fails_before_matching() {
        let err = find_prohibited(&sources(&["README.md"], &[], &["[unclosed"]), &["README.md"])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRegex { .. }));
    }

    #[test]
    fn test_blank_entries_are_skipped() {
        assert!(!matches_patterns("/", &[""], SENSITIVE).unwrap());
        assert!(!matches_patterns("/", &["  "], SENSITIVE).unwrap());
        assert!(!match_filename("/", &[""], SENSITIVE));

        let matcher = Matcher::with_policy(SENSITIVE, &sources(&["", "LICENSE"], &[" "], &[]))
            .unwrap();
        assert_eq!(matcher.rules().len(), 1);
        assert!(matcher.check(&["/", "ok.txt"], ScanMode::Batch).is_clean());
    }

    #[test]
    fn test_shell_glob_literals_are_not_errors() {
        assert!(matches_patterns("x/[abc", &["[abc"], SENSITIVE).unwrap());
        assert!(matches_patterns("a{", &["*{"], SENSITIVE).unwrap());
        assert!(!matches_patterns("a.key", &["*.{pem,key}"], SENSITIVE).unwrap());
    }

    #[test]
    fn test_absolute_candidate_components() {
        let matcher = Matcher::with_policy(SENSITIVE, &sources(&[], &["etc"], &[])).unwrap();
        assert!(matcher.hit_kinds("/etc/passwd").is_empty());
        let matcher = Matcher::with_policy(SENSITIVE, &sources(&[], &["e?c"], &[])).unwrap();
        assert_eq!(matcher.hit_kinds("/etc/passwd"), vec![RuleKind::Pattern]);
    }
}
