#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood risk aggregation for the citizen safety map.
//!
//! Turns the historical incident dataset into ranked, tiered
//! [`RiskZone`](temis_risk_models::RiskZone) values:
//!
//! 1. [`parse`] classifies each raw row as a usable record or not.
//! 2. [`aggregate`] groups records by neighborhood, ranks neighborhoods by
//!    incident count, and assigns `alto`/`medio`/`bajo` tiers by rank.
//! 3. [`recommend`] produces the Spanish safety guidance shown when a zone
//!    is selected.
//!
//! Aggregation is total: malformed rows are skipped, never reported as
//! errors. Only loading a custom [`config::AggregationConfig`] can fail.

pub mod aggregate;
pub mod config;
pub mod parse;
pub mod recommend;

pub use aggregate::{aggregate, assess};
pub use config::AggregationConfig;
pub use recommend::{recommendations, recommendations_for};

use thiserror::Error;

/// Errors that can occur while loading aggregation settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AggregationConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The values parsed but are out of range.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}
