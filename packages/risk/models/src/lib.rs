#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk classification types for the neighborhood risk map.
//!
//! Defines the raw incident record shape of the bundled historical dataset,
//! the per-neighborhood aggregate built from it, and the tiered
//! [`RiskZone`] values handed to the presentation layer.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Discrete risk classification assigned to a neighborhood by its rank.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskTier {
    /// High risk. Top-ranked neighborhoods with more than one incident.
    Alto,
    /// Medium risk.
    Medio,
    /// Low risk. Computed but never shown on the map.
    Bajo,
}

impl RiskTier {
    /// Returns the display radius in meters for zones of this tier.
    #[must_use]
    pub const fn radius_meters(self) -> u32 {
        match self {
            Self::Alto => 350,
            Self::Medio => 250,
            Self::Bajo => 150,
        }
    }

    /// Whether zones of this tier are included in the visible result.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Alto | Self::Medio)
    }

    /// Parses a tier name, falling back to [`RiskTier::Bajo`] for anything
    /// unrecognized.
    #[must_use]
    pub fn from_name_or_bajo(name: &str) -> Self {
        name.parse().unwrap_or(Self::Bajo)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Alto, Self::Medio, Self::Bajo]
    }
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from a latitude/longitude pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One entry of the historical incident dataset.
///
/// The dataset is a sequence of single-key mappings whose value is a
/// comma-separated row. Only fields 2 (longitude), 3 (latitude),
/// 4 (neighborhood) and 5 (municipality) are consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIncidentRecord {
    /// The mapping key (typically the original CSV header line).
    pub key: String,
    /// The comma-separated row.
    pub value: String,
}

impl RawIncidentRecord {
    /// Creates a record from its key and row value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Grouping key for neighborhood aggregation.
///
/// A structured pair rather than a joined string so names containing the
/// display separator cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodKey {
    /// Neighborhood (colonia) name.
    pub neighborhood: String,
    /// Municipality name.
    pub municipality: String,
}

impl std::fmt::Display for NeighborhoodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.neighborhood, self.municipality)
    }
}

/// Accumulated incident count for one neighborhood/municipality pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodAggregate {
    /// Grouping key.
    pub key: NeighborhoodKey,
    /// Number of incidents counted for this key. Always at least 1.
    pub crime_count: u64,
    /// Coordinate of the first incident seen for this key (not a centroid).
    pub coordinate: Coordinate,
}

/// A classified neighborhood, ready to be drawn as a circle on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskZone {
    /// `"{neighborhood}-{rank}"`. Not stable across recomputation.
    pub id: String,
    /// `"{neighborhood}, {municipality}"`.
    pub name: String,
    /// Assigned tier.
    pub tier: RiskTier,
    /// Representative coordinate.
    pub coordinate: Coordinate,
    /// Human-readable description embedding the count.
    pub description: String,
    /// Incident count.
    pub crime_count: u64,
    /// Display radius in meters.
    pub radius: u32,
}

/// Summary of one aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStatistics {
    /// Sum of all aggregate counts, including low-risk neighborhoods.
    pub total_crimes: u64,
    /// Visible `alto` zones.
    pub high_risk_zones: usize,
    /// Visible `medio` zones.
    pub medium_risk_zones: usize,
    /// All visible zones.
    pub total_zones: usize,
    /// Distinct neighborhoods encountered.
    pub total_colonias: usize,
}

/// Output of the risk aggregator: visible zones in rank order plus stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// `alto` and `medio` zones, highest count first.
    pub zones: Vec<RiskZone>,
    /// Run statistics.
    pub statistics: AggregationStatistics,
}

impl RiskAssessment {
    /// Whether the run produced no visible zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
