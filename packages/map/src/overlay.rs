//! Merges the risk assessment, the live report feed, and the safe-point
//! registry into what the map draws.
//!
//! The assessment and the feed update independently; an overlay is rebuilt
//! from whatever each side currently holds. Reports never feed back into
//! the assessment.

use serde::Serialize;
use temis_reports_models::LiveReport;
use temis_risk::recommendations;
use temis_risk_models::{Coordinate, RiskAssessment, RiskTier, RiskZone};

use crate::safe_points::SafePoint;
use crate::style::{MarkerStyle, ZoneStyle, report_badge_color};

/// Radius drawn around a selected citizen report, in meters.
const REPORT_RADIUS: u32 = 100;

/// A visible map region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Vertical span in degrees.
    pub latitude_delta: f64,
    /// Horizontal span in degrees.
    pub longitude_delta: f64,
}

impl Region {
    /// A region centered on `center` with the default span.
    #[must_use]
    pub const fn around(center: Coordinate) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: DEFAULT_REGION.latitude_delta,
            longitude_delta: DEFAULT_REGION.longitude_delta,
        }
    }
}

/// Downtown Guadalajara, used when the device location is unavailable.
pub const DEFAULT_REGION: Region = Region {
    latitude: 20.6736,
    longitude: -103.3446,
    latitude_delta: 0.05,
    longitude_delta: 0.05,
};

/// A risk circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneCircle {
    /// ID of the zone drawn.
    pub zone_id: String,
    /// Circle center.
    pub center: Coordinate,
    /// Radius in meters.
    pub radius: u32,
    /// Fill and stroke.
    pub style: ZoneStyle,
}

/// What a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    /// Center of a risk zone.
    RiskZone,
    /// A live citizen report.
    CitizenReport,
    /// A safe point.
    SafePoint,
}

/// A point marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Marker key, unique within an overlay.
    pub id: String,
    /// What the marker stands for.
    pub kind: MarkerKind,
    /// Position.
    pub coordinate: Coordinate,
    /// Icon and color.
    pub style: MarkerStyle,
}

/// Header and info-card text for the map screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    /// Zone counts line; `None` when there are no zones to show.
    pub headline: Option<String>,
    /// Live report count line.
    pub live_reports_line: String,
    /// Data card text; `None` when there are no zones to show.
    pub info_line: Option<String>,
    /// Historical incidents analyzed.
    pub total_crimes: u64,
    /// Live reports on the map.
    pub live_reports: usize,
    /// Safe points on the map.
    pub safe_points: usize,
}

/// Everything drawn on top of the base map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOverlay {
    /// One circle per visible risk zone.
    pub circles: Vec<ZoneCircle>,
    /// Zone, report, and safe-point markers, in draw order.
    pub markers: Vec<MapMarker>,
    /// Header text.
    pub summary: MapSummary,
}

impl MapOverlay {
    /// Builds the overlay. An empty assessment leaves the base map without
    /// risk circles; reports and safe points are still drawn.
    #[must_use]
    pub fn build(
        assessment: &RiskAssessment,
        reports: &[LiveReport],
        safe_points: &[SafePoint],
    ) -> Self {
        let visible: Vec<&RiskZone> = assessment
            .zones
            .iter()
            .filter(|z| z.tier.is_visible())
            .collect();

        let circles = visible
            .iter()
            .map(|zone| ZoneCircle {
                zone_id: zone.id.clone(),
                center: zone.coordinate,
                radius: zone.radius,
                style: ZoneStyle::for_tier(zone.tier),
            })
            .collect();

        let zone_markers = visible.iter().map(|zone| {
            let style = ZoneStyle::for_tier(zone.tier);
            MapMarker {
                id: format!("marker-{}", zone.id),
                kind: MarkerKind::RiskZone,
                coordinate: zone.coordinate,
                style: MarkerStyle {
                    icon: style.icon,
                    color: style.border_color,
                },
            }
        });

        let report_markers = reports.iter().map(|report| MapMarker {
            id: report.id.clone(),
            kind: MarkerKind::CitizenReport,
            coordinate: report.coordinate,
            style: MarkerStyle::for_report(&report.category),
        });

        let safe_point_markers = safe_points.iter().map(|point| MapMarker {
            id: format!("safe-{}", point.id),
            kind: MarkerKind::SafePoint,
            coordinate: point.coordinate(),
            style: MarkerStyle::for_safe_point(point.kind),
        });

        let markers = zone_markers
            .chain(report_markers)
            .chain(safe_point_markers)
            .collect();

        let summary = summarize(assessment, reports.len(), safe_points.len());

        if assessment.is_empty() {
            log::debug!("No risk zones available; drawing base map only");
        }

        Self {
            circles,
            markers,
            summary,
        }
    }
}

fn summarize(
    assessment: &RiskAssessment,
    live_reports: usize,
    safe_points: usize,
) -> MapSummary {
    let stats = &assessment.statistics;
    let has_zones = !assessment.is_empty();

    MapSummary {
        headline: has_zones.then(|| {
            format!(
                "{} zonas alto riesgo • {} zonas riesgo medio",
                stats.high_risk_zones, stats.medium_risk_zones
            )
        }),
        live_reports_line: format!("{live_reports} Reportes en tiempo real"),
        info_line: has_zones.then(|| {
            format!(
                "{} delitos históricos analizados • {live_reports} reportes ciudadanos activos \
                 • {safe_points} puntos seguros",
                stats.total_crimes
            )
        }),
        total_crimes: stats.total_crimes,
        live_reports,
        safe_points,
    }
}

/// What was selected on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    /// A risk zone of the given tier.
    Zone(RiskTier),
    /// A citizen report.
    Report,
}

/// Detail card shown when a zone or report marker is pressed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    /// ID of the selected zone or report.
    pub id: String,
    /// Card title.
    pub name: String,
    /// What was selected.
    pub selection: Selection,
    /// Position to center on.
    pub coordinate: Coordinate,
    /// Description text.
    pub description: String,
    /// Incident count (1 for a report).
    pub crime_count: u64,
    /// Highlight radius in meters.
    pub radius: u32,
    /// Card body lines.
    pub recommendations: Vec<String>,
    /// Card icon.
    pub icon: &'static str,
    /// Badge color, for reports.
    pub color: Option<&'static str>,
    /// Raw report category, for reports.
    pub report_category: Option<String>,
}

impl ZoneDetail {
    /// Detail for a risk zone, with tier-specific safety guidance.
    #[must_use]
    pub fn for_zone(zone: &RiskZone) -> Self {
        Self {
            id: zone.id.clone(),
            name: zone.name.clone(),
            selection: Selection::Zone(zone.tier),
            coordinate: zone.coordinate,
            description: zone.description.clone(),
            crime_count: zone.crime_count,
            radius: zone.radius,
            recommendations: recommendations(zone.tier, zone.crime_count),
            icon: ZoneStyle::for_tier(zone.tier).icon,
            color: None,
            report_category: None,
        }
    }

    /// Detail for a citizen report.
    #[must_use]
    pub fn for_report(report: &LiveReport) -> Self {
        Self {
            id: report.id.clone(),
            name: format!("Reporte: {}", report.title),
            selection: Selection::Report,
            coordinate: report.coordinate,
            description: report.description.clone(),
            crime_count: 1,
            radius: REPORT_RADIUS,
            recommendations: vec![
                format!("Categoría: {}", report.category),
                format!("Ubicación: {}", report.location),
                format!("Estado: {}", report.status),
            ],
            icon: "alert-circle",
            color: Some(report_badge_color(&report.category)),
            report_category: Some(report.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temis_risk_models::{AggregationStatistics, RawIncidentRecord};

    use crate::safe_points::all_safe_points;

    fn assessment() -> RiskAssessment {
        let mut records = Vec::new();
        for (name, n) in [("CENTRO", 15), ("OBLATOS", 5)] {
            for _ in 0..n {
                records.push(RawIncidentRecord::new(
                    "row",
                    format!("1,2,-103.35,20.67,{name},GUADALAJARA,7,8,9"),
                ));
            }
        }
        temis_risk::assess(&records)
    }

    fn report(id: &str, category: &str) -> LiveReport {
        LiveReport {
            id: id.to_string(),
            title: "Bache".to_string(),
            description: "Bache profundo".to_string(),
            category: category.to_string(),
            location: "Av. Vallarta".to_string(),
            coordinate: Coordinate::new(20.67, -103.39),
            status: "Pendiente".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn builds_circles_and_markers() {
        let reports = vec![report("r1", "Seguridad"), report("r2", "Infraestructura")];
        let safe_points = all_safe_points();
        let overlay = MapOverlay::build(&assessment(), &reports, &safe_points);

        assert_eq!(overlay.circles.len(), 2);
        assert_eq!(overlay.circles[0].radius, 350);
        assert_eq!(overlay.circles[0].style.border_color, "#e74c3c");
        assert_eq!(overlay.markers.len(), 2 + 2 + safe_points.len());
        assert_eq!(overlay.markers[0].id, "marker-CENTRO-0");
        assert_eq!(overlay.markers[2].style.color, "#e74c3c");
        assert_eq!(overlay.markers[3].style.color, "#f39c12");
        assert_eq!(overlay.markers[4].id, "safe-1");

        assert_eq!(
            overlay.summary.headline.as_deref(),
            Some("1 zonas alto riesgo • 1 zonas riesgo medio")
        );
        assert_eq!(overlay.summary.live_reports_line, "2 Reportes en tiempo real");
        assert_eq!(overlay.summary.total_crimes, 20);
    }

    #[test]
    fn empty_assessment_draws_base_map() {
        let overlay = MapOverlay::build(&RiskAssessment::default(), &[report("r1", "Otro")], &[]);
        assert!(overlay.circles.is_empty());
        assert_eq!(overlay.markers.len(), 1);
        assert!(overlay.summary.headline.is_none());
        assert!(overlay.summary.info_line.is_none());
        assert_eq!(overlay.summary.total_crimes, 0);
    }

    #[test]
    fn info_line_counts_everything() {
        let summary = summarize(
            &RiskAssessment {
                zones: assessment().zones,
                statistics: AggregationStatistics {
                    total_crimes: 120,
                    ..AggregationStatistics::default()
                },
            },
            3,
            20,
        );
        assert_eq!(
            summary.info_line.as_deref(),
            Some(
                "120 delitos históricos analizados • 3 reportes ciudadanos activos • 20 puntos seguros"
            )
        );
    }

    #[test]
    fn zone_detail_carries_recommendations() {
        let zones = assessment().zones;
        let detail = ZoneDetail::for_zone(&zones[0]);
        assert_eq!(detail.selection, Selection::Zone(RiskTier::Alto));
        assert_eq!(detail.icon, "warning");
        assert_eq!(detail.recommendations[0], "🚨 Zona de ALTO RIESGO con 15 reportes");
        assert!(detail.color.is_none());

        let medio = ZoneDetail::for_zone(&zones[1]);
        assert_eq!(medio.icon, "warning-outline");
        assert_eq!(medio.recommendations[0], "⚠️ Zona con 5 incidentes reportados");
    }

    #[test]
    fn report_detail() {
        let detail = ZoneDetail::for_report(&report("r9", "Seguridad"));
        assert_eq!(detail.name, "Reporte: Bache");
        assert_eq!(detail.selection, Selection::Report);
        assert_eq!(detail.radius, 100);
        assert_eq!(detail.crime_count, 1);
        assert_eq!(
            detail.recommendations,
            vec![
                "Categoría: Seguridad",
                "Ubicación: Av. Vallarta",
                "Estado: Pendiente"
            ]
        );
        assert_eq!(detail.color, Some("#e74c3c"));
        assert_eq!(detail.report_category.as_deref(), Some("Seguridad"));
    }

    #[test]
    fn region_around_keeps_default_span() {
        let region = Region::around(Coordinate::new(20.7, -103.4));
        assert!((region.latitude_delta - 0.05).abs() < f64::EPSILON);
        assert!((region.latitude - 20.7).abs() < f64::EPSILON);
    }
}
