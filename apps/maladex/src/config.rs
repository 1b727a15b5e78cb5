//! # Configuration
//!
//! Optional TOML configuration for the Maladex binary.
//!
//! Resolution order: command-line flags override the config file, the config
//! file overrides built-in defaults. A missing default config file is not an
//! error; an explicitly requested one must exist and parse.

use maladex_core::MaladexError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "maladex.toml";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the persisted knowledge graph.
    pub graph: PathBuf,

    /// Path the diagnose command writes its ranking to.
    pub diagnosis_output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: PathBuf::from("knowledge.mldx"),
            diagnosis_output: PathBuf::from("possible_diseases.tsv"),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path, the file must exist and parse. Without one,
    /// `maladex.toml` is read if present, else built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, MaladexError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            MaladexError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;

        toml::from_str(&contents).map_err(|e| {
            MaladexError::DeserializationError(format!(
                "Invalid config '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
