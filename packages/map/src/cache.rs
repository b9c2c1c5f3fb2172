//! Memoized risk assessment.
//!
//! The map screen derives its zones once per activation and again only
//! when the inputs change. The cache key is the dataset fingerprint plus
//! the aggregation settings; a key change recomputes from scratch.

use std::sync::Arc;

use temis_dataset::Dataset;
use temis_risk::{AggregationConfig, aggregate};
use temis_risk_models::RiskAssessment;

#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    fingerprint: String,
    config: AggregationConfig,
}

/// Holds the last assessment and the inputs it was computed from.
#[derive(Debug, Default)]
pub struct AssessmentCache {
    entry: Option<(CacheKey, Arc<RiskAssessment>)>,
    computations: u64,
}

impl AssessmentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the assessment for `dataset` under `config`, recomputing only
    /// if either differs from the cached inputs.
    pub fn get_or_compute(
        &mut self,
        dataset: &Dataset,
        config: &AggregationConfig,
    ) -> Arc<RiskAssessment> {
        if let Some((key, assessment)) = &self.entry
            && key.fingerprint == dataset.fingerprint
            && key.config == *config
        {
            return Arc::clone(assessment);
        }

        log::debug!(
            "Computing risk assessment for dataset {}",
            dataset.fingerprint
        );
        let assessment = Arc::new(aggregate(&dataset.records, config));
        self.computations += 1;
        self.entry = Some((
            CacheKey {
                fingerprint: dataset.fingerprint.clone(),
                config: config.clone(),
            },
            Arc::clone(&assessment),
        ));
        assessment
    }

    /// Drops the cached assessment.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times the assessment has been computed.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temis_dataset::parse_dataset;

    const DATASET: &str = r#"[
        {"h": "1,2,-103.35,20.67,CENTRO,GUADALAJARA,7,8,9"},
        {"h": "1,2,-103.35,20.67,CENTRO,GUADALAJARA,7,8,9"},
        {"h": "1,2,-103.40,20.70,OBLATOS,GUADALAJARA,7,8,9"}
    ]"#;

    #[test]
    fn reuses_result_for_same_inputs() {
        let dataset = parse_dataset(DATASET).unwrap();
        let config = AggregationConfig::default();
        let mut cache = AssessmentCache::new();

        let first = cache.get_or_compute(&dataset, &config);
        let second = cache.get_or_compute(&dataset, &config);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.computations(), 1);
        assert_eq!(first.statistics.total_crimes, 3);
    }

    #[test]
    fn recomputes_when_dataset_or_config_changes() {
        let dataset = parse_dataset(DATASET).unwrap();
        let other = parse_dataset(r#"[{"h": "1,2,-103.35,20.67,CENTRO,GDL,7,8,9"}]"#).unwrap();
        let config = AggregationConfig::default();
        let mut cache = AssessmentCache::new();

        cache.get_or_compute(&dataset, &config);
        let changed = cache.get_or_compute(&other, &config);
        assert_eq!(changed.statistics.total_crimes, 1);

        let capped = AggregationConfig {
            max_records: 1,
            ..AggregationConfig::default()
        };
        cache.get_or_compute(&other, &capped);
        assert_eq!(cache.computations(), 3);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let dataset = parse_dataset(DATASET).unwrap();
        let config = AggregationConfig::default();
        let mut cache = AssessmentCache::new();

        cache.get_or_compute(&dataset, &config);
        cache.invalidate();
        cache.get_or_compute(&dataset, &config);
        assert_eq!(cache.computations(), 2);
    }
}
