//! Per-test selection
//!
//! A test is selected when at least one include clause matches it and no
//! exclude clause does. The test's own module acts as an extra tag, so
//! `sale` selects the tests of the `sale` module.
//!
//! Cross-module tests are handled in two phases when the selector knows the
//! available modules: include clauses fan the test out over modules, and
//! exclude clauses subtract modules again. The surviving modules are written
//! to [`TestInstance::selected_modules`].

use std::collections::BTreeSet;

use super::clause::{ParamSign, SelectorClause};
use super::path::{has_path_suffix, ForwardSlashes, PathNormalizer};
use super::Selector;
use crate::instance::TestInstance;
use crate::tags::TagSet;

/// Borrowed view of the test attributes clauses are checked against
struct Candidate<'t> {
    tags: &'t TagSet,
    module: &'t str,
    class_name: &'t str,
    method_name: &'t str,
    source_path: &'t str,
}

impl Candidate<'_> {
    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag) || self.module == tag
    }

    fn matches(&self, clause: &SelectorClause, ignore_module: bool) -> bool {
        if let Some(tag) = &clause.tag {
            if !self.has_tag(tag) {
                return false;
            }
        }

        if let Some(path) = &clause.file_path {
            if !has_path_suffix(self.source_path, path) {
                return false;
            }
        } else if let Some(module) = &clause.module {
            if !ignore_module && module != self.module {
                return false;
            }
        }

        if let Some(class_name) = &clause.class_name {
            if class_name != self.class_name {
                return false;
            }
        }

        if let Some(method_name) = &clause.method_name {
            if !self.method_name.is_empty() && method_name != self.method_name {
                return false;
            }
        }

        true
    }
}

/// Decides selection of test instances against one selector
#[derive(Debug, Clone)]
pub struct Matcher<'s, N = ForwardSlashes> {
    selector: &'s Selector,
    normalizer: N,
}

impl<'s> Matcher<'s> {
    pub fn new(selector: &'s Selector) -> Self {
        Self {
            selector,
            normalizer: ForwardSlashes,
        }
    }
}

impl<'s, N: PathNormalizer> Matcher<'s, N> {
    /// Use a different source path normalisation for file-path clauses
    pub fn with_path_normalizer<M: PathNormalizer>(self, normalizer: M) -> Matcher<'s, M> {
        Matcher {
            selector: self.selector,
            normalizer,
        }
    }

    pub fn selector(&self) -> &'s Selector {
        self.selector
    }

    /// Decide whether `test` is selected
    ///
    /// Resets and then fills `test.selected_parameters` and, for cross-module
    /// tests, `test.selected_modules`.
    pub fn matches(&self, test: &mut TestInstance) -> bool {
        test.selected_parameters.clear();
        test.selected_modules.clear();

        let Some(tags) = test.tags.as_ref() else {
            tracing::debug!(test = %test.display_name(), "Skipping test without tags");
            return false;
        };

        let source_path = self.normalizer.normalize(&test.source_path);
        let candidate = Candidate {
            tags,
            module: &test.module,
            class_name: &test.class_name,
            method_name: &test.method_name,
            source_path: &source_path,
        };

        let fan_out = if test.cross_module {
            self.selector.available_modules()
        } else {
            None
        };

        let selected_modules = match fan_out {
            Some(available) => match self.cross_module_selection(&candidate, available) {
                Some(modules) => modules,
                None => return false,
            },
            None => {
                if !self.is_included(&candidate) || self.is_excluded(&candidate) {
                    return false;
                }
                Vec::new()
            }
        };

        let selected_parameters = self.collect_parameters(&candidate, fan_out.is_some());

        test.selected_modules = selected_modules;
        test.selected_parameters = selected_parameters;
        true
    }

    fn is_included(&self, candidate: &Candidate<'_>) -> bool {
        self.selector
            .include()
            .iter()
            .any(|clause| candidate.matches(clause, false))
    }

    fn is_excluded(&self, candidate: &Candidate<'_>) -> bool {
        self.selector
            .exclude()
            .iter()
            .any(|clause| candidate.matches(clause, false))
    }

    /// Included modules minus excluded modules, or `None` when rejected
///
/// Rejection means no include clause matched or an exclude clause names the
/// test's own module. An empty difference still selects the test.
    fn cross_module_selection(
        &self,
        candidate: &Candidate<'_>,
        available: &BTreeSet<String>,
    ) -> Option<Vec<String>> {
        let mut included: BTreeSet<&str> = BTreeSet::new();
        let mut matched = false;

        for clause in self.selector.include() {
            if !candidate.matches(clause, true) {
                continue;
            }
            matched = true;
            match &clause.module {
                Some(module) => {
                    included.insert(module.as_str());
                }
                None => included.extend(available.iter().map(String::as_str)),
            }
        }

        if !matched {
            return None;
        }

        let mut excluded: BTreeSet<&str> = BTreeSet::new();
        for clause in self.selector.exclude() {
            if !candidate.matches(clause, true) {
                continue;
            }
            match &clause.module {
                Some(module) if module == candidate.module => return None,
                Some(module) => {
                    excluded.insert(module.as_str());
                }
                None => excluded.extend(available.iter().map(String::as_str)),
            }
        }

        let modules: Vec<String> = included
            .difference(&excluded)
            .map(|module| module.to_string())
            .collect();

        if modules.is_empty() {
            tracing::debug!(module = candidate.module, "Every module of cross-module test excluded");
        }
        Some(modules)
    }

    fn collect_parameters(&self, candidate: &Candidate<'_>, ignore_module: bool) -> Vec<String> {
        let mut parameters: Vec<String> = Vec::new();

        for attachment in self.selector.parameters() {
            if !candidate.matches(&attachment.clause, ignore_module) {
                continue;
            }
            match attachment.sign {
                ParamSign::Plus => {
                    if !parameters.contains(&attachment.payload) {
                        parameters.push(attachment.payload.clone());
                    }
                }
                ParamSign::Minus => parameters.retain(|p| p != &attachment.payload),
            }
        }

        parameters
    }
}
