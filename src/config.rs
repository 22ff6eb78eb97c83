//
//  config.rs
//  Trellis
//
//  Created by hak (tharun)
//

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::graph::TraversalMode;

/// Top-level Trellis configuration.
///
/// The engine consumes these values as passed-in data; parsing a file is a
/// convenience for embedders, never something the core requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrellisConfig {
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Defaults for neighborhood queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Depth budget for `related` queries.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Edge filter applied by default.
    #[serde(default)]
    pub mode: TraversalMode,
}

/// Hints consumed by export backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether private-access nodes and their edges should be rendered.
    /// Applied by the export layer when interpreting query results — the
    /// engine itself never filters by access level.
    #[serde(default = "default_include_private")]
    pub include_private: bool,
}

fn default_max_depth() -> u32 {
    3
}

fn default_include_private() -> bool {
    true
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            mode: TraversalMode::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_private: default_include_private(),
        }
    }
}

impl TrellisConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Strict parse of a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
