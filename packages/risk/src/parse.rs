//! Row classification for the historical incident dataset.
//!
//! Each [`RawIncidentRecord`] either yields a [`ParsedRecord`] or is not a
//! usable record. The second case is an ordinary outcome (`None`), not an
//! error: the dataset contains many rows without a known neighborhood.

use temis_risk_models::{Coordinate, NeighborhoodKey, RawIncidentRecord};

use crate::config::AggregationConfig;

const LONGITUDE_FIELD: usize = 2;
const LATITUDE_FIELD: usize = 3;
const NEIGHBORHOOD_FIELD: usize = 4;
const MUNICIPALITY_FIELD: usize = 5;

/// A dataset row with a known neighborhood and a finite coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// Neighborhood/municipality pair.
    pub key: NeighborhoodKey,
    /// Incident location.
    pub coordinate: Coordinate,
}

/// Classifies one raw dataset row.
///
/// Returns `None` when the row has fewer than `config.min_fields` fields,
/// the neighborhood is empty or equals `config.sentinel`, or either
/// coordinate is not a finite number.
#[must_use]
pub fn parse_record(
    record: &RawIncidentRecord,
    config: &AggregationConfig,
) -> Option<ParsedRecord> {
    let fields: Vec<&str> = record.value.split(',').collect();
    if fields.len() < config.min_fields {
        return None;
    }

    let neighborhood = unquote(fields.get(NEIGHBORHOOD_FIELD)?);
    if neighborhood.is_empty() || neighborhood == config.sentinel {
        return None;
    }
    let municipality = unquote(fields.get(MUNICIPALITY_FIELD)?);

    let longitude = parse_coordinate(fields.get(LONGITUDE_FIELD)?)?;
    let latitude = parse_coordinate(fields.get(LATITUDE_FIELD)?)?;

    Some(ParsedRecord {
        key: NeighborhoodKey {
            neighborhood,
            municipality,
        },
        coordinate: Coordinate::new(latitude, longitude),
    })
}

/// Strips every double quote and surrounding whitespace.
fn unquote(field: &str) -> String {
    field.replace('"', "").trim().to_string()
}

fn parse_coordinate(field: &str) -> Option<f64> {
    unquote(field)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
