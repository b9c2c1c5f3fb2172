//! Neighborhood grouping, ranking, and tier classification.
//!
//! The whole assessment is recomputed from scratch on every call. It is a
//! pure fold over the input slice; the only input-order dependency is the
//! `max_records` cap, which decides which rows get counted at all.

use std::collections::BTreeMap;

use temis_risk_models::{
    AggregationStatistics, NeighborhoodAggregate, RawIncidentRecord, RiskAssessment, RiskTier,
    RiskZone,
};

use crate::config::AggregationConfig;
use crate::parse::parse_record;

/// Runs [`aggregate`] with the embedded default settings.
#[must_use]
pub fn assess(records: &[RawIncidentRecord]) -> RiskAssessment {
    aggregate(records, &AggregationConfig::default())
}

/// Groups, ranks, and classifies incident records into visible risk zones.
///
/// Never fails: unusable rows are skipped. An input with no usable rows
/// yields an empty assessment with zeroed statistics.
#[must_use]
pub fn aggregate(records: &[RawIncidentRecord], config: &AggregationConfig) -> RiskAssessment {
    let aggregates = group_by_neighborhood(records, config);

    if aggregates.is_empty() {
        log::debug!("No usable incident records in {} rows", records.len());
        return RiskAssessment::default();
    }

    let ranked = rank(aggregates);
    let total_colonias = ranked.len();
    let total_crimes = ranked.iter().map(|a| a.crime_count).sum();

    let (high_threshold, medium_threshold) = rank_thresholds(total_colonias, config);

    let zones: Vec<RiskZone> = ranked
        .iter()
        .enumerate()
        .map(|(rank, aggregate)| {
            let tier = classify(rank, aggregate.crime_count, high_threshold, medium_threshold);
            build_zone(rank, aggregate, tier)
        })
        .filter(|zone| zone.tier.is_visible())
        .collect();

    let high_risk_zones = zones.iter().filter(|z| z.tier == RiskTier::Alto).count();
    let medium_risk_zones = zones.iter().filter(|z| z.tier == RiskTier::Medio).count();

    let statistics = AggregationStatistics {
        total_crimes,
        high_risk_zones,
        medium_risk_zones,
        total_zones: zones.len(),
        total_colonias,
    };

    log::info!(
        "Classified {total_colonias} neighborhoods ({total_crimes} incidents): \
         {high_risk_zones} alto, {medium_risk_zones} medio"
    );

    RiskAssessment { zones, statistics }
}

/// Counts usable records per neighborhood, stopping once `max_records`
/// records have been accepted.
fn group_by_neighborhood(
    records: &[RawIncidentRecord],
    config: &AggregationConfig,
) -> Vec<NeighborhoodAggregate> {
    let mut by_key: BTreeMap<_, NeighborhoodAggregate> = BTreeMap::new();
    let mut accepted: usize = 0;
    let mut skipped: usize = 0;

    for record in records {
        if accepted >= config.max_records {
            log::debug!(
                "Reached cap of {} records; ignoring the remaining rows",
                config.max_records
            );
            break;
        }

        let Some(parsed) = parse_record(record, config) else {
            skipped += 1;
            continue;
        };

        // First occurrence fixes the coordinate; later ones only count.
        by_key
            .entry(parsed.key.clone())
            .or_insert_with(|| NeighborhoodAggregate {
                key: parsed.key,
                crime_count: 0,
                coordinate: parsed.coordinate,
            })
            .crime_count += 1;
        accepted += 1;
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} unusable incident rows");
    }

    by_key.into_values().collect()
}

/// Sorts by count descending, then by neighborhood and municipality.
fn rank(mut aggregates: Vec<NeighborhoodAggregate>) -> Vec<NeighborhoodAggregate> {
    aggregates.sort_by(|a, b| {
        b.crime_count
            .cmp(&a.crime_count)
            .then_with(|| a.key.cmp(&b.key))
    });
    aggregates
}

/// Returns `(ceil(n * high_fraction), ceil(n * medium_fraction))`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn rank_thresholds(n: usize, config: &AggregationConfig) -> (usize, usize) {
    let n = n as f64;
    (
        (n * config.high_fraction).ceil() as usize,
        (n * config.medium_fraction).ceil() as usize,
    )
}

/// A top-ranked neighborhood with a single incident is never `alto`.
const fn classify(
    rank: usize,
    count: u64,
    high_threshold: usize,
    medium_threshold: usize,
) -> RiskTier {
    if rank < high_threshold && count > 1 {
        RiskTier::Alto
    } else if rank < medium_threshold && count > 0 {
        RiskTier::Medio
    } else {
        RiskTier::Bajo
    }
}

fn build_zone(rank: usize, aggregate: &NeighborhoodAggregate, tier: RiskTier) -> RiskZone {
    let count = aggregate.crime_count;
    let plural = if count > 1 { "s" } else { "" };

    RiskZone {
        id: format!("{}-{rank}", aggregate.key.neighborhood),
        name: aggregate.key.to_string(),
        tier,
        coordinate: aggregate.coordinate,
        description: format!("Zona con {count} reporte{plural} de delito grave"),
        crime_count: count,
        radius: tier.radius_meters(),
    }
}
