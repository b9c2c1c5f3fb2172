#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation side of the risk map.
//!
//! Everything here is a pure lookup or merge over data produced elsewhere:
//! the [`style`] tables that color zones, reports and safe points, the
//! compile-time [`safe_points`] registry, the [`overlay`] that merges risk
//! zones with the live report feed, and the [`cache`] that keeps the risk
//! assessment from being recomputed when its inputs have not changed.

pub mod cache;
pub mod overlay;
pub mod safe_points;
pub mod style;

pub use cache::AssessmentCache;
pub use overlay::{DEFAULT_REGION, MapOverlay, MapSummary, Region, ZoneDetail};
pub use safe_points::{SafePoint, SafePointKind, all_safe_points};
