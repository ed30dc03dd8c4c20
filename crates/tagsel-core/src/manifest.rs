//! JSON manifests of test classes and tests
//!
//! A manifest is what a host exports so tagsel can run outside it: the class
//! definitions (in definition order, bases first) and the test methods.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attach::{ClassDefinition, ClassRegistry};
use crate::error::{Result, TagselError};
use crate::instance::TestInstance;

/// One test method in a manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestEntry {
    /// Class reference, bare name or `module.ClassName`
    pub class: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub source_path: String,
    #[serde(default)]
    pub cross_module: bool,
    /// Per-method tags added on top of the class tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Test classes and tests exported by a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
}

impl Manifest {
    /// Load a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(TagselError::invalid_manifest)
    }

    /// Define every class, in order, into a fresh registry
    pub fn registry(&self) -> Result<ClassRegistry> {
        let mut registry = ClassRegistry::new();
        for definition in &self.classes {
            if definition.name.is_empty() || definition.module.is_empty() {
                return Err(TagselError::invalid_manifest(
                    "class entries need a name and a module",
                ));
            }
            registry.define(definition)?;
        }
        Ok(registry)
    }

    /// Build the test instances, each from its class descriptor
    pub fn instances(&self, registry: &ClassRegistry) -> Result<Vec<TestInstance>> {
        self.tests
            .iter()
            .map(|entry| -> Result<TestInstance> {
                let (qualified, descriptor) = registry.resolve(&entry.class, None)?;
                let class_name = qualified
                    .rsplit_once('.')
                    .map(|(_, bare)| bare)
                    .unwrap_or(qualified);
                Ok(TestInstance::new(
                    descriptor,
                    class_name,
                    entry.method.as_str(),
                    entry.source_path.as_str(),
                )
                .with_additional_tags(entry.tags.iter().cloned())
                .with_cross_module(entry.cross_module))
            })
            .collect()
    }
}
