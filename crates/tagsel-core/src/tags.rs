//! Tag sets attached to test classes and instances

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag implied on every test unless explicitly removed
pub const STANDARD: &str = "standard";

/// Lifecycle tag implied on every test unless explicitly removed
pub const AT_INSTALL: &str = "at_install";

/// Lifecycle tag for tests that run once all modules are installed
pub const POST_INSTALL: &str = "post_install";

/// Check whether a token is a valid tag or module identifier
///
/// Identifiers are made of word characters only (letters, digits, `_`).
pub fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// An unordered set of tags
///
/// Backed by a `BTreeSet` so iteration and display are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// The tags every undecorated test class starts with
    pub fn defaults() -> Self {
        [STANDARD, AT_INSTALL].into_iter().collect()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Add a tag, returning whether it was newly inserted
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    /// Remove a tag; removing an absent tag is a no-op
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    pub fn extend_from(&mut self, other: &TagSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for TagSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for tag in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", tag)?;
            first = false;
        }
        Ok(())
    }
}
