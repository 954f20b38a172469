//! Candidate path normalization.
//!
//! Candidates arrive as the hook runner passes them: relative or absolute,
//! POSIX or mixed separators. Matching always happens on a forward-slash
//! form with `.`/`..` and redundant separators collapsed.

use std::path::MAIN_SEPARATOR;

/// A path reduced to a single separator convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    posix: String,
    /// Byte length of the root marker (`/`, `C:`, `C:/`) at the start of `posix`.
    root_len: usize,
}

impl NormalizedPath {
    /// Forward-slash representation used for pattern matching.
    pub fn posix(&self) -> &str {
        &self.posix
    }

    /// Representation using the host separator.
    pub fn native(&self) -> String {
        if MAIN_SEPARATOR == '/' {
            self.posix.clone()
        } else {
            self.posix.replace('/', &MAIN_SEPARATOR.to_string())
        }
    }

    /// Root or drive marker, empty for relative paths.
    pub fn root(&self) -> &str {
        &self.posix[..self.root_len]
    }

    pub fn is_absolute(&self) -> bool {
        self.root().ends_with('/')
    }

    /// Final path segment. Empty for a bare root.
    pub fn basename(&self) -> &str {
        self.body().rsplit('/').next().unwrap_or_default()
    }

    /// Non-empty path segments with root and drive markers excluded.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.body().split('/').filter(|part| !part.is_empty())
    }

    fn body(&self) -> &str {
        &self.posix[self.root_len..]
    }
}

/// Normalize a path string. Accepts any input, including the empty string.
pub fn normalize(path: &str) -> NormalizedPath {
    let unified = path.replace('\\', "/");
    let (root, rest) = split_root(&unified);
    let absolute = root.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // Nothing to climb above an absolute root
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    let posix = if root.is_empty() && body.is_empty() {
        ".".to_string()
    } else {
        format!("{root}{body}")
    };

    NormalizedPath {
        posix,
        root_len: root.len(),
    }
}

/// Replace backslash separators in a pattern with forward slashes.
pub fn normalize_pattern(pattern: &str) -> String {
    pattern.replace('\\', "/")
}

/// Split a unified path into its root marker and the remainder.
///
/// A drive marker is only recognized when followed by a separator or the
/// end of the string, so `a:b` stays an ordinary relative name.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    let has_drive = matches!(
        bytes,
        [letter, b':'] | [letter, b':', b'/', ..] if letter.is_ascii_alphabetic()
    );
    let drive_len = if has_drive { 2 } else { 0 };
    let root_len = if path[drive_len..].starts_with('/') {
        drive_len + 1
    } else {
        drive_len
    };
    path.split_at(root_len)
}
