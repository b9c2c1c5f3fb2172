#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loader for the bundled historical incident dataset.
//!
//! The dataset is a JSON array of single-key objects whose value is one
//! comma-separated incident row (a CSV exported through a JSON converter,
//! so the key is usually the original header line). Each object becomes a
//! [`RawIncidentRecord`]; row-level validation is left to the aggregator.
//!
//! Every [`Dataset`] carries a SHA-256 fingerprint of its source bytes so
//! consumers can tell when a recomputation is actually needed.

use std::path::Path;

use sha2::{Digest, Sha256};
use temis_risk_models::RawIncidentRecord;
use thiserror::Error;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but does not have the expected shape.
    #[error("Invalid dataset: {message}")]
    Shape {
        /// Description of what went wrong.
        message: String,
    },
}

/// An immutable, loaded incident dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<RawIncidentRecord>,
    /// Hex-encoded SHA-256 of the source bytes.
    pub fingerprint: String,
}

impl Dataset {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads and parses a dataset file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read or is not a JSON
/// array.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    log::info!("Loading incident dataset from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(&contents)?;
    log::info!(
        "Loaded {} incident records (fingerprint {})",
        dataset.len(),
        &dataset.fingerprint[..12]
    );
    Ok(dataset)
}

/// Parses a dataset from its JSON text.
///
/// Objects that are empty or whose first value is not a string are skipped
/// with a warning.
///
/// # Errors
///
/// Returns [`DatasetError::Json`] for malformed JSON and
/// [`DatasetError::Shape`] if the top level is not an array.
pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let serde_json::Value::Array(items) = value else {
        return Err(DatasetError::Shape {
            message: "expected a top-level JSON array".to_string(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped: usize = 0;

    for (index, item) in items.iter().enumerate() {
        if let Some(record) = record_from_item(item) {
            records.push(record);
        } else {
            log::debug!("Dataset entry {index} is not a single-key string mapping");
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} dataset entries without a string row");
    }

    Ok(Dataset {
        records,
        fingerprint: fingerprint(json.as_bytes()),
    })
}

/// Returns the hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn record_from_item(item: &serde_json::Value) -> Option<RawIncidentRecord> {
    let (key, value) = item.as_object()?.iter().next()?;
    let row = value.as_str()?;
    Some(RawIncidentRecord::new(key.clone(), row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_key_objects() {
        let json = r#"[
            {"id,fecha,x,y,colonia,municipio,delito,a,b": "1,2023-01-01,-103.3,20.6,CENTRO,GUADALAJARA,ROBO,a,b"},
            {"id,fecha,x,y,colonia,municipio,delito,a,b": "2,2023-01-02,-103.4,20.7,OBLATOS,GUADALAJARA,ROBO,a,b"}
        ]"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].key, "id,fecha,x,y,colonia,municipio,delito,a,b");
        assert!(dataset.records[1].value.contains("OBLATOS"));
    }

    #[test]
    fn skips_non_string_and_empty_entries() {
        let json = r#"[{"k": 5}, {}, "plain", {"k": "1,2,3"}]"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].value, "1,2,3");
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_dataset(r#"{"k": "v"}"#),
            Err(DatasetError::Shape { .. })
        ));
        assert!(matches!(parse_dataset("[1,"), Err(DatasetError::Json(_))));
    }

    #[test]
    fn empty_array_is_empty_dataset() {
        let dataset = parse_dataset("[]").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = parse_dataset(r#"[{"k": "a"}]"#).unwrap();
        let b = parse_dataset(r#"[{"k": "a"}]"#).unwrap();
        let c = parse_dataset(r#"[{"k": "b"}]"#).unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
        assert_eq!(a.fingerprint.len(), 64);
    }

    #[test]
    fn fingerprint_of_empty_input() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
