#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Citizen-submitted incident report types.
//!
//! Reports arrive from the document database as loosely typed documents;
//! [`LiveReport`] keeps the category and status as the raw strings users
//! submitted, with typed accessors for the known values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use temis_risk_models::Coordinate;

/// Report categories offered by the submission form.
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
pub enum ReportCategory {
    /// Crime and personal safety.
    #[serde(rename = "Seguridad")]
    #[strum(serialize = "Seguridad")]
    Seguridad,
    /// Roads, lighting, and public works.
    #[serde(rename = "Infraestructura")]
    #[strum(serialize = "Infraestructura")]
    Infraestructura,
    /// Environmental hazards.
    #[serde(rename = "Medio Ambiente")]
    #[strum(serialize = "Medio Ambiente")]
    MedioAmbiente,
    /// Water, power, and waste services.
    #[serde(rename = "Servicios Públicos")]
    #[strum(serialize = "Servicios Públicos")]
    ServiciosPublicos,
    /// Anything else.
    #[serde(rename = "Otro")]
    #[strum(serialize = "Otro")]
    Otro,
}

impl ReportCategory {
    /// Returns all variants of this enum, in form order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Seguridad,
            Self::Infraestructura,
            Self::MedioAmbiente,
            Self::ServiciosPublicos,
            Self::Otro,
        ]
    }
}

/// Handling status of a citizen report.
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
pub enum ReportStatus {
    /// Newly submitted.
    #[serde(rename = "Pendiente")]
    #[strum(serialize = "Pendiente")]
    Pendiente,
    /// Being handled.
    #[serde(rename = "En proceso")]
    #[strum(serialize = "En proceso")]
    EnProceso,
    /// Resolved.
    #[serde(rename = "Atendido")]
    #[strum(serialize = "Atendido")]
    Atendido,
}

impl ReportStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pendiente, Self::EnProceso, Self::Atendido]
    }
}

/// A citizen report as merged onto the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveReport {
    /// Document ID.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Category as submitted.
    pub category: String,
    /// Free-text location (street, landmark).
    pub location: String,
    /// Reported position.
    pub coordinate: Coordinate,
    /// Status as stored.
    pub status: String,
    /// Submission time, if the document carried one.
    pub timestamp: Option<DateTime<Utc>>,
}

impl LiveReport {
    /// The category, if it is one of the form's values.
    #[must_use]
    pub fn category_kind(&self) -> Option<ReportCategory> {
        self.category.parse().ok()
    }

    /// The status, if it is one of the known values.
    #[must_use]
    pub fn status_kind(&self) -> Option<ReportStatus> {
        self.status.parse().ok()
    }
}
