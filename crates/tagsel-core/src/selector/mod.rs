//! Test selectors
//!
//! A [`Selector`] is built from a user expression such as
//! `slow,-/sale:TestA.test_one,tour[headless]` and then asked, test by test,
//! whether that test is selected.
//!
//! - [`clause`] holds the structured 5-tuple each spec parses into
//! - [`parse`] turns an expression into a selector
//! - [`matcher`] decides selection and writes annotations onto the test
//! - [`path`] normalises source paths for file-path clauses

pub mod clause;
pub mod matcher;
pub mod parse;
pub mod path;

use std::collections::BTreeSet;
use std::fmt;

pub use clause::{ParamSign, ParameterAttachment, SelectorClause};
pub use matcher::Matcher;
pub use parse::{ParseReport, RejectReason, RejectedSpec};
pub use path::{ForwardSlashes, PathNormalizer, StripPrefixes};

use crate::instance::TestInstance;

/// A parsed selector expression
///
/// Immutable once constructed. `include` and `exclude` are sets, so the
/// order specs were written in does not matter; `parameters` keeps the
/// order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    include: BTreeSet<SelectorClause>,
    exclude: BTreeSet<SelectorClause>,
    parameters: Vec<ParameterAttachment>,
    has_explicit_include: bool,
    available_modules: Option<BTreeSet<String>>,
}

impl Selector {
    pub fn include(&self) -> &BTreeSet<SelectorClause> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<SelectorClause> {
        &self.exclude
    }

    pub fn parameters(&self) -> &[ParameterAttachment] {
        &self.parameters
    }

    /// Whether the expression contained any positive clause
    ///
    /// When false, a non-empty `include` holds only the implicit
    /// `standard` clause.
    pub fn has_explicit_include(&self) -> bool {
        self.has_explicit_include
    }

    pub fn available_modules(&self) -> Option<&BTreeSet<String>> {
        self.available_modules.as_ref()
    }

    /// An empty selector matches nothing
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Decide whether `test` is selected, using the default path normaliser
    pub fn matches(&self, test: &mut TestInstance) -> bool {
        Matcher::new(self).matches(test)
    }
}

/// Canonical expression form
///
/// Re-parsing the output (with the same available modules) yields an equal
/// selector.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut specs: Vec<String> = Vec::new();

        if self.has_explicit_include {
            specs.extend(self.include.iter().map(ToString::to_string));
        }
        specs.extend(self.exclude.iter().map(|clause| format!("-{}", clause)));
        specs.extend(self.parameters.iter().map(ToString::to_string));

        write!(f, "{}", specs.join(","))
    }
}
