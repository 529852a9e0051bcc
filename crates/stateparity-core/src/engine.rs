use serde::{Deserialize, Serialize};
use stateparity_canonical::{Scalar, ValueComparator, DEFAULT_TOLERANCE};
use tracing::debug;

use crate::errors::{ReconcileError, RecordSide};
use crate::extract::RecordExtractor;
use crate::record::{FieldValue, StructuredRecord, SubRecord, SubRecordPolicy};
use crate::report::{FieldOutcome, Mismatch, ReconciliationReport};

/// Tunables for a [`ReconciliationEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileOptions {
    /// Absolute tolerance for numeric comparisons.
    pub tolerance: f64,
    /// Which fields are sub-record lists and how they look in flat output.
    pub sub_records: SubRecordPolicy,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            sub_records: SubRecordPolicy::default(),
        }
    }
}

/// Diffs a structured record against flat `key: value` output.
///
/// Holds only configuration and compiled patterns; one engine can serve any
/// number of concurrent reconciliations.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    options: ReconcileOptions,
    comparator: ValueComparator,
    extractor: RecordExtractor,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(ReconcileOptions::default())
    }
}

impl ReconciliationEngine {
    /// Creates an engine from options.
    pub fn new(options: ReconcileOptions) -> Self {
        let comparator = ValueComparator::with_tolerance(options.tolerance);
        let extractor = RecordExtractor::new(&options.sub_records);
        Self {
            options,
            comparator,
            extractor,
        }
    }

    /// Options this engine was built with.
    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Decodes a JSON payload using this engine's sub-record policy.
    pub fn decode(&self, payload: &str) -> Result<StructuredRecord, ReconcileError> {
        StructuredRecord::from_json(payload, &self.options.sub_records)
    }

    /// Reconciles the two records into a report.
    ///
    /// Fails only when a side is empty; every other irregularity is a
    /// finding in the report.
    pub fn reconcile(
        &self,
        structured: &StructuredRecord,
        flat_text: &str,
    ) -> Result<ReconciliationReport, ReconcileError> {
        let outcomes = self.classify(structured, flat_text)?;
        Ok(ReconciliationReport::from_outcomes(outcomes))
    }

    /// Per-field outcomes: structured fields in payload order, then flat-only
    /// fields in output order.
    pub fn classify(
        &self,
        structured: &StructuredRecord,
        flat_text: &str,
    ) -> Result<Vec<FieldOutcome>, ReconcileError> {
        let missing = match (structured.is_empty(), flat_text.trim().is_empty()) {
            (true, true) => Some(RecordSide::Both),
            (true, false) => Some(RecordSide::Structured),
            (false, true) => Some(RecordSide::Flat),
            (false, false) => None,
        };
        if let Some(side) = missing {
            return Err(ReconcileError::MissingData { side });
        }

        let fields = self.extractor.extract_fields(flat_text);
        let mut flat_sub_records: Option<Vec<SubRecord>> = None;
        let mut outcomes = Vec::with_capacity(structured.len() + fields.len());

        for (key, value) in structured.iter() {
            let outcome = match value {
                FieldValue::SubRecords(records) => {
                    let flat = flat_sub_records
                        .get_or_insert_with(|| self.extractor.extract_sub_records(flat_text));
                    self.compare_sub_records(key, records, flat)
                }
                FieldValue::Scalar(scalar) => match fields.get(key) {
                    Some(raw) => self.compare_scalar(key, scalar, raw),
                    None => FieldOutcome::MissingInFlat(key.to_string()),
                },
            };
            debug!(field = key, outcome = outcome.kind(), "classified structured field");
            outcomes.push(outcome);
        }

        // The identifier lines belong to the sub-record comparison.
        for key in fields.keys() {
            if !structured.contains_key(key) && key != self.extractor.id_field() {
                debug!(field = key, "field only in flat record");
                outcomes.push(FieldOutcome::MissingInStructured(key.to_string()));
            }
        }

        Ok(outcomes)
    }

    fn compare_scalar(&self, key: &str, structured: &Scalar, raw: &str) -> FieldOutcome {
        let comparison = self.comparator.compare(structured, &Scalar::from(raw));
        if comparison.equal {
            return FieldOutcome::Match(key.to_string());
        }
        FieldOutcome::Mismatch(Mismatch::Value {
            field: key.to_string(),
            structured: structured.clone(),
            flat: raw.to_string(),
            structured_normalized: comparison.left,
            flat_normalized: comparison.right,
        })
    }

    fn compare_sub_records(
        &self,
        key: &str,
        structured: &[SubRecord],
        flat: &[SubRecord],
    ) -> FieldOutcome {
        let policy = &self.options.sub_records;
        if policy.sorted(structured) == policy.sorted(flat) {
            return FieldOutcome::Match(key.to_string());
        }
        FieldOutcome::Mismatch(Mismatch::SubRecords {
            field: key.to_string(),
            structured: structured.to_vec(),
            flat: flat.to_vec(),
        })
    }
}

/// Reconciles with default options.
pub fn reconcile(
    structured: &StructuredRecord,
    flat_text: &str,
) -> Result<ReconciliationReport, ReconcileError> {
    ReconciliationEngine::default().reconcile(structured, flat_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_exhaustive_and_exclusive() {
        let structured = StructuredRecord::new()
            .with("a", Scalar::from(1i64))
            .with("b", Scalar::from("up"))
            .with("c", Scalar::from(3i64));
        let outcomes = ReconciliationEngine::default()
            .classify(&structured, "a: 1\nb: down\nd: 4")
            .unwrap();
        let fields: Vec<&str> = outcomes.iter().map(|o| o.field()).collect();
        assert_eq!(fields, ["a", "b", "c", "d"]);
        let kinds: Vec<&str> = outcomes.iter().map(|o| o.kind()).collect();
        assert_eq!(
            kinds,
            ["match", "mismatch", "missing_in_flat", "missing_in_structured"]
        );
    }

    #[test]
    fn flat_sub_records_are_extracted_once_per_field_list() {
        let policy = SubRecordPolicy {
            fields: vec!["adjacencies".into(), "standby".into()],
            ..SubRecordPolicy::default()
        };
        let engine = ReconciliationEngine::new(ReconcileOptions {
            sub_records: policy,
            ..ReconcileOptions::default()
        });
        let structured = engine
            .decode(r#"{"adjacencies": [{"neighbor_id": "1.1.1.1", "state": "full"}], "standby": []}"#)
            .unwrap();
        let report = engine
            .reconcile(&structured, "neighbor_id: 1.1.1.1, state: full")
            .unwrap();
        assert_eq!(report.matched, ["adjacencies"]);
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].field(), "standby");
    }

    #[test]
    fn tolerance_comes_from_options() {
        let engine = ReconciliationEngine::new(ReconcileOptions {
            tolerance: 0.1,
            ..ReconcileOptions::default()
        });
        let structured = StructuredRecord::new().with("used", Scalar::from_f64(43.01).unwrap());
        assert!(engine.reconcile(&structured, "used: 43.10").unwrap().all_match());
        assert!(!reconcile(&structured, "used: 43.10").unwrap().all_match());
    }

    #[test]
    fn options_reject_unknown_keys_at_every_level() {
        assert!(serde_json::from_str::<ReconcileOptions>(r#"{"tolerence": 0.5}"#).is_err());
        assert!(
            serde_json::from_str::<ReconcileOptions>(r#"{"sub_records": {"id_feild": "peer"}}"#)
                .is_err()
        );
        let options: ReconcileOptions =
            serde_json::from_str(r#"{"sub_records": {"id_field": "peer_id"}}"#).unwrap();
        assert_eq!(options.sub_records.id_field, "peer_id");
        assert_eq!(options.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReconciliationEngine>();
    }
}
