//! Aggregation settings.
//!
//! The defaults are embedded at compile time from `config/default.toml`.
//! A deployment may load an override file with [`AggregationConfig::load`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Tunables for [`crate::aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Maximum number of valid records counted. Later records are ignored.
    pub max_records: usize,
    /// Fraction of ranked neighborhoods eligible for `alto`.
    pub high_fraction: f64,
    /// Fraction of ranked neighborhoods eligible for `medio` or above.
    pub medium_fraction: f64,
    /// Minimum comma-separated fields in a usable row.
    pub min_fields: usize,
    /// Neighborhood placeholder that marks a row as unusable.
    pub sentinel: String,
}

impl Default for AggregationConfig {
    /// # Panics
    ///
    /// Panics if the embedded default TOML fails to parse. It is a
    /// compile-time constant, so this is caught by the tests below.
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded aggregation config: {e}"))
    }
}

impl AggregationConfig {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the input is not valid TOML for this
    /// type, or [`ConfigError::Invalid`] if the values are out of range.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded aggregation config from {}", path.display());
        Ok(config)
    }

    /// Checks that the tier fractions and limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |f: f64| f.is_finite() && f > 0.0 && f <= 1.0;

        if !in_range(self.high_fraction) {
            return Err(ConfigError::Invalid {
                message: format!("high_fraction {} must be in (0, 1]", self.high_fraction),
            });
        }
        if !in_range(self.medium_fraction) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "medium_fraction {} must be in (0, 1]",
                    self.medium_fraction
                ),
            });
        }
        if self.high_fraction > self.medium_fraction {
            return Err(ConfigError::Invalid {
                message: format!(
                    "high_fraction {} exceeds medium_fraction {}",
                    self.high_fraction, self.medium_fraction
                ),
            });
        }
        if self.min_fields < 6 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "min_fields {} is too small to hold coordinates and names",
                    self.min_fields
                ),
            });
        }
        Ok(())
    }
}
