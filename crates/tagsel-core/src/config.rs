//! Selector configuration for tagsel
//!
//! Configuration lives in `tagsel.toml` next to the manifests being
//! selected from. Every key is optional:
//!
//! ```toml
//! expression = "standard,-slow"
//! available_modules = ["sale", "stock"]
//! path_prefixes = ["odoo/addons", "addons"]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagselError};
use crate::selector::{ParseReport, Selector, StripPrefixes};
use crate::tags::STANDARD;

/// Default config file name looked up in the root directory
pub const CONFIG_FILE: &str = "tagsel.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "TAGSEL_CONFIG";

/// Selector configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Selector expression used when none is given on the command line
    #[serde(default = "default_expression")]
    pub expression: String,

    /// Modules positive clauses may name; also the cross-module fan-out set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_modules: Option<Vec<String>>,

    /// Leading addon roots stripped from source paths before matching
    #[serde(default)]
    pub path_prefixes: Vec<String>,
}

fn default_expression() -> String {
    STANDARD.to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            expression: default_expression(),
            available_modules: None,
            path_prefixes: Vec::new(),
        }
    }
}

impl SelectorConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TagselError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TagselError::invalid_config(path, e))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TagselError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Find the configuration to use
    ///
    /// An explicit path must exist. Otherwise `TAGSEL_CONFIG`, then
    /// `<root>/tagsel.toml` are tried, falling back to defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::load(&PathBuf::from(env_path));
        }

        let candidate = root.join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "Using config file");
            return Self::load(&candidate);
        }

        Ok(Self::default())
    }

    pub fn available_modules_set(&self) -> Option<BTreeSet<String>> {
        self.available_modules
            .as_ref()
            .map(|modules| modules.iter().cloned().collect())
    }

    /// Parse `expression`, or the configured expression when `None`
    pub fn parse_selector(&self, expression: Option<&str>) -> ParseReport {
        let expression = expression.unwrap_or(&self.expression);
        Selector::parse_report(expression, self.available_modules_set())
    }

    pub fn path_normalizer(&self) -> StripPrefixes {
        StripPrefixes::new(&self.path_prefixes)
    }
}
