//! TOML configuration for running a rule.
//!
//! ```toml
//! rule = "high_low_difference"
//!
//! [params]
//! scale = 2.0
//!
//! [regression]
//! price_column = "price"
//!
//! [regression.sizing]
//! volatility = 0.1
//! kelly_fraction = 1.0
//! ```
//!
//! Only `rule` is required. `params` are overrides on top of the rule's defaults;
//! `regression` configures the stages of every `*_regression` rule.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::regression_rules::RegressionSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which rule to run and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub rule: String,

    #[serde(default)]
    pub params: Params,

    #[serde(default)]
    pub regression: RegressionSettings,
}

impl AllocationConfig {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            params: Params::new(),
            regression: RegressionSettings::default(),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
