//! Run configuration for the benchmark driver.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a
//! valid configuration.
//!
//! ```
//! use u_tourkit::config::SolverConfig;
//!
//! let config = SolverConfig::from_json_str(r#"{ "espprc": { "capacity": 2 } }"#).unwrap();
//! assert_eq!(config.espprc.capacity, 2);
//! assert_eq!(config.espprc.resources, 6);
//! assert_eq!(config.lns.iterations, 10);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lns::LnsConfig;

/// Largest resource count the index-bit demand encoding supports.
pub const MAX_RESOURCES: usize = 31;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Resource limits for tour pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspprcConfig {
    /// Number of resources; node `v` consumes resource `r` when bit `r` of `v` is set.
    pub resources: usize,
    /// Capacity shared by every resource.
    pub capacity: u32,
}

impl Default for EspprcConfig {
    fn default() -> Self {
        Self {
            resources: 6,
            capacity: 1,
        }
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub lns: LnsConfig,
    pub espprc: EspprcConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns error on malformed JSON or values rejected by
    /// [`SolverConfig::validate`].
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.espprc.resources > MAX_RESOURCES {
            return Err(ConfigError::Invalid(format!(
                "espprc.resources is {}, at most {MAX_RESOURCES} supported",
                self.espprc.resources
            )));
        }
        Ok(())
    }

    pub fn with_lns_iterations(mut self, iterations: usize) -> Self {
        self.lns.iterations = iterations;
        self
    }

    pub fn with_espprc_capacity(mut self, capacity: u32) -> Self {
        self.espprc.capacity = capacity;
        self
    }
}
