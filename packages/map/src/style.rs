//! Icon and color lookup tables for map symbology.
//!
//! Every lookup is total: string-keyed variants fall back to a neutral
//! style instead of failing on values the tables do not know.

use serde::Serialize;
use temis_reports_models::{ReportCategory, ReportStatus};
use temis_risk_models::RiskTier;

use crate::safe_points::SafePointKind;

const RED: &str = "#e74c3c";
const ORANGE: &str = "#f39c12";
const GREEN: &str = "#27ae60";
const BLUE: &str = "#3498db";
const GRAY: &str = "#95a5a6";

/// How a risk zone is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    /// Ionicons icon name.
    pub icon: &'static str,
    /// Circle fill.
    pub fill_color: &'static str,
    /// Circle stroke.
    pub border_color: &'static str,
}

impl ZoneStyle {
    /// Style for tier names the table does not know.
    pub const UNKNOWN: Self = Self {
        icon: "help-circle-outline",
        fill_color: "rgba(52, 152, 219, 0.2)",
        border_color: BLUE,
    };

    /// Style for a tier.
    #[must_use]
    pub const fn for_tier(tier: RiskTier) -> Self {
        match tier {
            RiskTier::Alto => Self {
                icon: "warning",
                fill_color: "rgba(231, 76, 60, 0.3)",
                border_color: RED,
            },
            RiskTier::Medio => Self {
                icon: "warning-outline",
                fill_color: "rgba(243, 156, 18, 0.3)",
                border_color: ORANGE,
            },
            RiskTier::Bajo => Self {
                icon: "information-circle-outline",
                fill_color: "rgba(39, 174, 96, 0.3)",
                border_color: GREEN,
            },
        }
    }

    /// Style for a tier name; unknown names get [`ZoneStyle::UNKNOWN`].
    #[must_use]
    pub fn for_tier_name(name: &str) -> Self {
        name.parse::<RiskTier>()
            .map_or(Self::UNKNOWN, Self::for_tier)
    }
}

/// Icon and color of a point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    /// Ionicons icon name.
    pub icon: &'static str,
    /// Marker background.
    pub color: &'static str,
}

impl MarkerStyle {
    /// Style for safe-point kinds the table does not know.
    pub const UNKNOWN_SAFE_POINT: Self = Self {
        icon: "location",
        color: GRAY,
    };

    /// Style for a safe point.
    #[must_use]
    pub const fn for_safe_point(kind: SafePointKind) -> Self {
        match kind {
            SafePointKind::Policia => Self {
                icon: "shield-checkmark",
                color: BLUE,
            },
            SafePointKind::Hospital => Self {
                icon: "medkit",
                color: RED,
            },
            SafePointKind::Bomberos => Self {
                icon: "flame",
                color: ORANGE,
            },
            SafePointKind::Comercial => Self {
                icon: "business",
                color: GREEN,
            },
        }
    }

    /// Style for a safe-point kind name.
    #[must_use]
    pub fn for_safe_point_name(name: &str) -> Self {
        name.parse::<SafePointKind>()
            .map_or(Self::UNKNOWN_SAFE_POINT, Self::for_safe_point)
    }

    /// Style for a citizen report marker.
    #[must_use]
    pub fn for_report(category: &str) -> Self {
        Self {
            icon: "alert-circle",
            color: report_badge_color(category),
        }
    }
}

/// Badge color for a report category: red for safety reports, orange for
/// everything else.
#[must_use]
pub fn report_badge_color(category: &str) -> &'static str {
    if category.parse::<ReportCategory>() == Ok(ReportCategory::Seguridad) {
        RED
    } else {
        ORANGE
    }
}

/// Badge color for a report status.
#[must_use]
pub fn status_color(status: &str) -> &'static str {
    match status.parse::<ReportStatus>() {
        Ok(ReportStatus::Pendiente) => ORANGE,
        Ok(ReportStatus::EnProceso) => BLUE,
        Ok(ReportStatus::Atendido) => GREEN,
        Err(_) => GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_styles_by_tier() {
        assert_eq!(ZoneStyle::for_tier(RiskTier::Alto).icon, "warning");
        assert_eq!(ZoneStyle::for_tier(RiskTier::Medio).border_color, "#f39c12");
        assert_eq!(
            ZoneStyle::for_tier(RiskTier::Bajo).fill_color,
            "rgba(39, 174, 96, 0.3)"
        );
    }

    #[test]
    fn unknown_tier_name_gets_neutral_style() {
        assert_eq!(ZoneStyle::for_tier_name("reporte"), ZoneStyle::UNKNOWN);
        assert_eq!(
            ZoneStyle::for_tier_name("alto"),
            ZoneStyle::for_tier(RiskTier::Alto)
        );
    }

    #[test]
    fn report_badge_colors() {
        assert_eq!(report_badge_color("Seguridad"), "#e74c3c");
        assert_eq!(report_badge_color("Infraestructura"), "#f39c12");
        assert_eq!(report_badge_color(""), "#f39c12");
        assert_eq!(report_badge_color("seguridad"), "#f39c12");
    }

    #[test]
    fn safe_point_styles() {
        assert_eq!(
            MarkerStyle::for_safe_point_name("hospital"),
            MarkerStyle {
                icon: "medkit",
                color: "#e74c3c"
            }
        );
        assert_eq!(
            MarkerStyle::for_safe_point_name("escuela"),
            MarkerStyle::UNKNOWN_SAFE_POINT
        );
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color("Pendiente"), "#f39c12");
        assert_eq!(status_color("En proceso"), "#3498db");
        assert_eq!(status_color("Atendido"), "#27ae60");
        assert_eq!(status_color("Archivado"), "#95a5a6");
    }
}
