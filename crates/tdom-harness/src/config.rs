#![forbid(unsafe_code)]

//! Harness configuration.
//!
//! Loaded from TOML or JSON. Every field has a default, so an empty file is a
//! valid configuration:
//!
//! ```toml
//! memoize = true
//! max_depth = 512
//!
//! [markup]
//! pretty = false
//! indent = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Default recursion limit for forcing a tree.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest accepted markup indent.
pub const MAX_INDENT: usize = 16;

/// How rendered trees are printed as HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// One node per line, indented by depth.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl MarkupConfig {
    /// Indented, one node per line.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Configuration for a render [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Reuse memoized subtrees whose key matches the previous pass.
    pub memoize: bool,
    /// Nodes nested deeper than this are dropped and the pass is flagged.
    pub max_depth: usize,
    /// Markup printing options.
    pub markup: MarkupConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            max_depth: DEFAULT_MAX_DEPTH,
            markup: MarkupConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, HarnessError> {
        toml::from_str(s).map_err(HarnessError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(HarnessError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(s).map_err(HarnessError::Json)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, HarnessError> {
        toml::to_string(self).map_err(HarnessError::TomlSerialize)
    }

    /// Check every field. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("max_depth must be > 0".into());
        }

        if self.markup.indent > MAX_INDENT {
            errors.push(format!(
                "markup.indent must be <= {MAX_INDENT}, got {}",
                self.markup.indent
            ));
        }

        errors
    }

    /// Validate, turning any findings into [`HarnessError::Validation`].
    pub fn validated(self) -> Result<Self, HarnessError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(HarnessError::Validation(errors))
        }
    }
}
