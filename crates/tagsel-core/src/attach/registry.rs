//! Descriptor lookup keyed by class identity
//!
//! The registry plays the role of class definition time: each
//! [`ClassDefinition`] is folded into a [`ClassDescriptor`] once, from the
//! already registered descriptors of its bases, and cached under the class's
//! qualified name (`module.ClassName`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{attach, inherit, ClassDescriptor, DecoratorArgs};
use crate::error::{Result, TagselError};
use crate::tags::TagSet;

/// What the host reports about a test class when it is defined
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Class name
    pub name: String,
    /// Module the class is defined in
    pub module: String,
    /// Base classes in method resolution order, nearest first
    ///
    /// Either a bare class name or `module.ClassName`.
    #[serde(default)]
    pub bases: Vec<String>,
    /// `tagged` invocations in the order they are applied
    #[serde(default)]
    pub decorators: Vec<DecoratorArgs>,
    /// Tags set explicitly in the class body
    #[serde(default)]
    pub explicit_tags: Option<TagSet>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_decorator<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.decorators.push(DecoratorArgs::from_tokens(tokens));
        self
    }

    pub fn with_explicit_tags(mut self, tags: TagSet) -> Self {
        self.explicit_tags = Some(tags);
        self
    }

    /// Qualified name used as the class identity
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.module, &self.name)
    }
}

fn qualified_name(module: &str, name: &str) -> String {
    format!("{}.{}", module, name)
}

/// Registered class descriptors, in definition order
#[derive(Debug, Default)]
pub struct ClassRegistry {
    entries: Vec<(String, ClassDescriptor)>,
    index: HashMap<String, usize>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and cache the descriptor of a newly defined class
    ///
    /// Bases must already be registered.
    pub fn define(&mut self, definition: &ClassDefinition) -> Result<&ClassDescriptor> {
        let key = definition.qualified_name();
        if self.index.contains_key(&key) {
            return Err(TagselError::DuplicateClass { class: key });
        }

        let descriptor = {
            let mut bases = Vec::with_capacity(definition.bases.len());
            for base in &definition.bases {
                let (_, descriptor) = self
                    .resolve(base, Some(&definition.module))
                    .map_err(|e| match e {
                        TagselError::UnknownClass { .. } => TagselError::UnknownBaseClass {
                            class: key.clone(),
                            base: base.clone(),
                        },
                        other => other,
                    })?;
                bases.push(descriptor);
            }
            fold_decorators(definition, &bases)
        };

        tracing::debug!(class = %key, tags = %descriptor.tags, "Defined test class");

        let position = self.entries.len();
        self.index.insert(key.clone(), position);
        self.entries.push((key, descriptor));
        Ok(&self.entries[position].1)
    }

    /// Look up a descriptor by qualified name
    pub fn get(&self, qualified: &str) -> Option<&ClassDescriptor> {
        self.index.get(qualified).map(|&i| &self.entries[i].1)
    }

    /// Resolve a class reference to its qualified name and descriptor
    ///
    /// `module.ClassName` is looked up exactly. A bare name is tried in
    /// `module_hint` first, then must be unique across all modules.
    pub fn resolve(
        &self,
        name: &str,
        module_hint: Option<&str>,
    ) -> Result<(&str, &ClassDescriptor)> {
        if name.contains('.') {
            return self.lookup(name).ok_or_else(|| TagselError::UnknownClass {
                class: name.to_string(),
            });
        }

        if let Some(found) =
            module_hint.and_then(|module| self.lookup(&qualified_name(module, name)))
        {
            return Ok(found);
        }

        let candidates: Vec<&(String, ClassDescriptor)> = self
            .entries
            .iter()
            .filter(|(key, _)| key.rsplit_once('.').is_some_and(|(_, bare)| bare == name))
            .collect();

        match candidates.len() {
            0 => Err(TagselError::UnknownClass {
                class: name.to_string(),
            }),
            1 => {
                let entry: &(String, ClassDescriptor) = candidates[0];
                Ok((entry.0.as_str(), &entry.1))
            }
            _ => Err(TagselError::AmbiguousClass {
                class: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|(key, _)| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn lookup(&self, key: &str) -> Option<(&str, &ClassDescriptor)> {
        self.index
            .get(key)
            .map(|&i| (self.entries[i].0.as_str(), &self.entries[i].1))
    }

    /// Iterate over registered classes in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassDescriptor)> {
        self.entries.iter().map(|(key, d)| (key.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply a class's decorator chain on top of its bases
///
/// Each invocation after the first is seeded from the previous result.
fn fold_decorators(definition: &ClassDefinition, bases: &[&ClassDescriptor]) -> ClassDescriptor {
    let mut decorators = definition.decorators.iter();

    let mut descriptor = match decorators.next() {
        Some(first) => attach(first, bases, &definition.module),
        None => inherit(bases, &definition.module),
    };
    for args in decorators {
        descriptor = attach(args, &[&descriptor], &definition.module);
    }

    match &definition.explicit_tags {
        Some(explicit) => descriptor.with_explicit_tags(explicit.clone()),
        None => descriptor,
    }
}
