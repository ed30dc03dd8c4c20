//! Source path normalisation for file-path clauses
//!
//! File-path clauses match by suffix. How a host's source paths are laid out
//! (addon roots, package prefixes, platform separators) differs per host, so
//! the normalisation step is a trait rather than a fixed policy.

use std::borrow::Cow;

/// Turns a host source path into the form file-path clauses are matched against
pub trait PathNormalizer {
    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str>;
}

/// Converts backslashes to forward slashes and nothing else
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardSlashes;

impl PathNormalizer for ForwardSlashes {
    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        if path.contains('\\') {
            Cow::Owned(path.replace('\\', "/"))
        } else {
            Cow::Borrowed(path)
        }
    }
}

/// Strips leading addon roots after converting to forward slashes
///
/// The longest matching prefix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripPrefixes {
    prefixes: Vec<String>,
}

impl StripPrefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| {
                let p = ForwardSlashes.normalize(p.as_ref()).into_owned();
                let p = p.trim_start_matches("./").trim_end_matches('/');
                format!("{}/", p)
            })
            .filter(|p| p != "/")
            .collect();
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
        prefixes.dedup();
        Self { prefixes }
    }
}

impl PathNormalizer for StripPrefixes {
    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        let forward = ForwardSlashes.normalize(path);
        let trimmed = forward.trim_start_matches("./");
        let stripped = self
            .prefixes
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix.as_str()))
            .unwrap_or(trimmed);
        Cow::Owned(stripped.to_string())
    }
}

impl<F> PathNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize<'p>(&self, path: &'p str) -> Cow<'p, str> {
        Cow::Owned(self(path))
    }
}

/// Check whether `source` ends with `suffix` on a path-segment boundary
pub(crate) fn has_path_suffix(source: &str, suffix: &str) -> bool {
    let suffix = suffix.trim_start_matches('/');
    if suffix.is_empty() {
        return false;
    }
    match source.strip_suffix(suffix) {
        Some(rest) => rest.is_empty() || rest.ends_with('/'),
        None => false,
    }
}
