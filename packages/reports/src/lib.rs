#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Live citizen report feed.
//!
//! The document database pushes full snapshots of the `citizenReports`
//! collection. This crate normalizes those documents into
//! [`LiveReport`](temis_reports_models::LiveReport) values and fans the
//! latest snapshot out to any number of scoped subscribers. The feed is
//! independent of the risk aggregation; the map merges both at render
//! time.

pub mod feed;
pub mod normalize;

pub use feed::{ReportFeed, ReportSnapshot, ReportSubscription};
pub use normalize::normalize_document;

use thiserror::Error;

/// Collection the citizen reports live in.
pub const REPORT_COLLECTION: &str = "citizenReports";

/// Errors surfaced by the live report feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The upstream subscription reported a failure. Non-fatal: the last
    /// good snapshot is kept.
    #[error("Upstream feed error: {message}")]
    Upstream {
        /// Description from the upstream service.
        message: String,
    },

    /// The feed was shut down; no further snapshots will arrive.
    #[error("Report feed closed")]
    Closed,
}
