//! Compile-time registry of safe points (police stations, hospitals, fire
//! stations, and staffed commercial centers).
//!
//! The points are defined in `data/safe_points.toml` and embedded via
//! `include_str!`. Adding a point only requires editing that file and
//! updating `EXPECTED_SAFE_POINT_COUNT` in the tests.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use temis_risk_models::Coordinate;

const SAFE_POINTS_TOML: &str = include_str!("../data/safe_points.toml");

/// Kind of safe point.
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
pub enum SafePointKind {
    /// Police station.
    Policia,
    /// Hospital or clinic.
    Hospital,
    /// Fire station.
    Bomberos,
    /// Staffed commercial center.
    Comercial,
}

/// A place people can go to for help.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafePoint {
    /// Registry ID, unique.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Kind of place.
    pub kind: SafePointKind,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Contact phone number.
    pub phone: String,
}

impl SafePoint {
    /// The point's position.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct SafePointFile {
    safe_points: Vec<SafePoint>,
}

/// Returns all registered safe points in registry order.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a parse failure is a development error caught by the tests.
#[must_use]
pub fn all_safe_points() -> Vec<SafePoint> {
    toml::de::from_str::<SafePointFile>(SAFE_POINTS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse safe point registry: {e}"))
        .safe_points
}
