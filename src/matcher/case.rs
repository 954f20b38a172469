//! Platform case-sensitivity policy for name comparisons.

/// How basenames are compared.
///
/// Defaults to the host policy: case-insensitive on Windows, case-sensitive
/// everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFoldingPolicy {
    Sensitive,
    Insensitive,
}

impl CaseFoldingPolicy {
    /// Policy matching the host filesystem convention.
    pub fn host() -> Self {
        if cfg!(windows) {
            CaseFoldingPolicy::Insensitive
        } else {
            CaseFoldingPolicy::Sensitive
        }
    }

    pub fn is_insensitive(self) -> bool {
        self == CaseFoldingPolicy::Insensitive
    }

    /// Compare two names under this policy.
    pub fn names_equal(self, a: &str, b: &str) -> bool {
        match self {
            CaseFoldingPolicy::Sensitive => a == b,
            CaseFoldingPolicy::Insensitive => a == b || fold(a) == fold(b),
        }
    }
}

/// Caseless form of `name`. Upper-casing first expands characters such as
/// `ß` to `SS`, so `straße` and `STRASSE` fold alike.
fn fold(name: &str) -> String {
    name.to_uppercase().to_lowercase()
}

impl Default for CaseFoldingPolicy {
    fn default() -> Self {
        Self::host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive() {
        let policy = CaseFoldingPolicy::Sensitive;
        assert!(policy.names_equal("README.md", "README.md"));
        assert!(!policy.names_equal("readme.md", "README.md"));
    }

    #[test]
    fn test_insensitive() {
        let policy = CaseFoldingPolicy::Insensitive;
        assert!(policy.names_equal("ReadMe.md", "README.md"));
        assert!(policy.names_equal("ÄRGER.txt", "ärger.TXT"));
        assert!(!policy.names_equal("notes.md", "README.md"));
    }

    #[test]
    fn test_insensitive_full_folding() {
        let policy = CaseFoldingPolicy::Insensitive;
        assert!(policy.names_equal("STRASSE", "straße"));
        assert!(policy.names_equal("ΟΔΟΣ.txt", "οδος.txt"));
        assert!(!CaseFoldingPolicy::Sensitive.names_equal("STRASSE", "straße"));
    }

    #[test]
    fn test_host_default() {
        assert_eq!(CaseFoldingPolicy::default(), CaseFoldingPolicy::host());
        assert_eq!(CaseFoldingPolicy::host().is_insensitive(), cfg!(windows));
    }
}
