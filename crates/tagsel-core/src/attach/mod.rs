//! Tag attachment for test classes
//!
//! A test class carries a [`ClassDescriptor`]: its final tag set and the
//! module it belongs to. Descriptors are computed once, when the class is
//! defined, from the descriptors of its bases and the tokens of the `tagged`
//! decorator invocations applied to it.
//!
//! Tokens are either `name` (add the tag) or `-name` (remove it). A class
//! with no decorated ancestor starts from [`TagSet::defaults`].

mod registry;
pub use registry::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::{is_identifier, TagSet, AT_INSTALL, POST_INSTALL};

/// A single token of a `tagged` decorator invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagToken {
    /// `name`: add the tag
    Add(String),
    /// `-name`: remove the tag
    Remove(String),
}

impl TagToken {
    /// Parse a raw decorator token
    ///
    /// Returns `None` for empty tokens, a lone `-`, and anything that is not
    /// a valid identifier.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = match raw.strip_prefix('-') {
            Some(name) => TagToken::Remove(name.to_string()),
            None => TagToken::Add(raw.to_string()),
        };

        if is_identifier(token.name()) {
            Some(token)
        } else {
            None
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TagToken::Add(name) | TagToken::Remove(name) => name,
        }
    }

    fn apply(&self, tags: &mut TagSet) {
        match self {
            TagToken::Add(name) => {
                tags.insert(name.as_str());
            }
            TagToken::Remove(name) => {
                tags.remove(name);
            }
        }
    }
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagToken::Add(name) => write!(f, "{}", name),
            TagToken::Remove(name) => write!(f, "-{}", name),
        }
    }
}

/// The ordered tokens of one decorator invocation
///
/// An empty sequence is valid and means "apply defaults only".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoratorArgs(Vec<TagToken>);

impl DecoratorArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build decorator args from raw tokens, discarding invalid ones
    pub fn from_tokens<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::new();
        for raw in raw {
            let raw = raw.as_ref();
            match TagToken::parse(raw) {
                Some(token) => tokens.push(token),
                None => tracing::debug!(token = raw, "Discarding decorator token"),
            }
        }
        Self(tokens)
    }

    pub fn tokens(&self) -> &[TagToken] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for DecoratorArgs {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::from_tokens(raw))
    }
}

impl Serialize for DecoratorArgs {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

/// Tag and module record attached to a test class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    /// Final computed tag set
    pub tags: TagSet,
    /// Module the class was defined in, as reported by the host
    pub module: String,
    /// Tags set explicitly in the class body, overriding everything else
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_tags: Option<TagSet>,
}

impl ClassDescriptor {
    /// Replace the computed tags with an explicit set from the class body
    pub fn with_explicit_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags.clone();
        self.explicit_tags = Some(tags);
        self
    }
}

fn seed(bases: &[&ClassDescriptor]) -> TagSet {
    bases
        .first()
        .map(|base| base.tags.clone())
        .unwrap_or_else(TagSet::defaults)
}

/// Descriptor for a class that is not decorated itself
///
/// Inherits the nearest base's tags, or the defaults when there is no base.
pub fn inherit(bases: &[&ClassDescriptor], host_module: &str) -> ClassDescriptor {
    ClassDescriptor {
        tags: seed(bases),
        module: host_module.to_string(),
        explicit_tags: None,
    }
}

/// Compute the descriptor of a class after one `tagged` invocation
///
/// `bases` are the descriptors of the class's bases in method resolution
/// order, nearest first. An invocation without tokens reapplies the defaults
/// on top of what the nearest base contributed.
pub fn attach(
    args: &DecoratorArgs,
    bases: &[&ClassDescriptor],
    host_module: &str,
) -> ClassDescriptor {
    let mut tags = seed(bases);
    if args.is_empty() {
        tags.extend_from(&TagSet::defaults());
    }

    for token in args.tokens() {
        token.apply(&mut tags);
    }

    if tags.contains(AT_INSTALL) == tags.contains(POST_INSTALL) {
        tracing::warn!(
            module = host_module,
            tags = %tags,
            "A test should be either at_install or post_install"
        );
    }

    ClassDescriptor {
        tags,
        module: host_module.to_string(),
        explicit_tags: None,
    }
}

#[cfg(test)]
mod tests;
