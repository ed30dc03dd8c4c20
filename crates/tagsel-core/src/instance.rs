//! Test instances inspected by the matcher

use serde::Serialize;

use crate::attach::ClassDescriptor;
use crate::tags::TagSet;

/// One test method of a test class, as seen by the matcher
///
/// The matcher reads the identity fields and writes back the two
/// `selected_*` annotations on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestInstance {
    /// `None` for objects that never went through tag attachment
    pub tags: Option<TagSet>,
    pub module: String,
    pub class_name: String,
    /// Empty when the host has no method name for the test
    pub method_name: String,
    /// Slash-form path of the defining source file
    pub source_path: String,
    /// The test contributes to several modules at once
    pub cross_module: bool,
    /// Parameter payloads recorded by the last match
    pub selected_parameters: Vec<String>,
    /// Modules the test was selected for, for cross-module tests
    pub selected_modules: Vec<String>,
}

impl TestInstance {
    /// Create an instance of a class with a computed descriptor
    pub fn new(
        descriptor: &ClassDescriptor,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            tags: Some(descriptor.tags.clone()),
            module: descriptor.module.clone(),
            class_name: class_name.into(),
            method_name: method_name.into(),
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    /// Create an instance that carries no tags at all
    pub fn untagged(
        module: impl Into<String>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            class_name: class_name.into(),
            method_name: method_name.into(),
            ..Self::default()
        }
    }

    /// Add per-method tags on top of the class tags
    pub fn with_additional_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.get_or_insert_with(TagSet::new).extend(tags);
        self
    }

    pub fn with_cross_module(mut self, cross_module: bool) -> Self {
        self.cross_module = cross_module;
        self
    }

    /// `module:Class.method` identity used in logs and output
    pub fn display_name(&self) -> String {
        if self.method_name.is_empty() {
            format!("{}:{}", self.module, self.class_name)
        } else {
            format!("{}:{}.{}", self.module, self.class_name, self.method_name)
        }
    }
}
