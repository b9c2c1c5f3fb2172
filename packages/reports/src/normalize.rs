//! Normalizes raw report documents into [`LiveReport`] values.
//!
//! Documents without a numeric `coordinates.latitude` and
//! `coordinates.longitude` cannot be placed on the map and are dropped.

use chrono::{DateTime, Utc};
use temis_reports_models::LiveReport;
use temis_risk_models::Coordinate;

/// Normalizes one document. Returns `None` if it has no usable coordinates.
#[must_use]
pub fn normalize_document(id: &str, doc: &serde_json::Value) -> Option<LiveReport> {
    let coords = doc.get("coordinates")?;
    let latitude = coords.get("latitude")?.as_f64()?;
    let longitude = coords.get("longitude")?.as_f64()?;

    Some(LiveReport {
        id: id.to_string(),
        title: string_field(doc, "title"),
        description: string_field(doc, "description"),
        category: string_field(doc, "category"),
        location: string_field(doc, "location"),
        coordinate: Coordinate::new(latitude, longitude),
        status: string_field(doc, "status"),
        timestamp: doc.get("timestamp").and_then(parse_timestamp),
    })
}

fn string_field(doc: &serde_json::Value, name: &str) -> String {
    doc.get(name)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Accepts RFC 3339 strings and `{ seconds, nanoseconds }` objects (the
/// serialized form of a database timestamp).
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    if let Some(s) = value.as_str() {
        return DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    let seconds = value.get("seconds")?.as_i64()?;
    let nanos = value
        .get("nanoseconds")
        .and_then(serde_json::Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);
    DateTime::from_timestamp(seconds, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_full_document() {
        let doc = json!({
            "title": "Robo a transeúnte",
            "description": "Dos sujetos en moto",
            "category": "Seguridad",
            "location": "Av. Juárez y 16 de Septiembre",
            "coordinates": { "latitude": 20.6755, "longitude": -103.3470 },
            "status": "Pendiente",
            "timestamp": "2025-03-01T18:30:00Z"
        });
        let report = normalize_document("r1", &doc).unwrap();
        assert_eq!(report.id, "r1");
        assert_eq!(report.category, "Seguridad");
        assert!((report.coordinate.latitude - 20.6755).abs() < f64::EPSILON);
        assert_eq!(
            report.timestamp.unwrap().to_rfc3339(),
            "2025-03-01T18:30:00+00:00"
        );
    }

    #[test]
    fn drops_documents_without_numeric_coordinates() {
        assert!(normalize_document("a", &json!({ "title": "x" })).is_none());
        assert!(
            normalize_document(
                "b",
                &json!({ "coordinates": { "latitude": "20.6", "longitude": -103.3 } })
            )
            .is_none()
        );
        assert!(
            normalize_document("c", &json!({ "coordinates": { "latitude": 20.6 } })).is_none()
        );
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let doc = json!({ "coordinates": { "latitude": 20.6, "longitude": -103.3 } });
        let report = normalize_document("d", &doc).unwrap();
        assert_eq!(report.title, "");
        assert_eq!(report.status, "");
        assert!(report.timestamp.is_none());
    }

    #[test]
    fn parses_seconds_timestamp() {
        let doc = json!({
            "coordinates": { "latitude": 20.6, "longitude": -103.3 },
            "timestamp": { "seconds": 1_700_000_000, "nanoseconds": 5 }
        });
        let report = normalize_document("e", &doc).unwrap();
        assert_eq!(report.timestamp.unwrap().timestamp(), 1_700_000_000);
    }
}
