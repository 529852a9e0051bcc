use serde::ser::{Serialize, SerializeStruct, Serializer};
use stateparity_canonical::Scalar;

use crate::record::SubRecord;

/// A field present on both sides whose values disagree.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Scalar disagreement, with raw and normalized forms of both sides.
    Value {
        /// Field name.
        field: String,
        /// Raw structured value.
        structured: Scalar,
        /// Raw flat value.
        flat: String,
        /// Normalized structured value.
        structured_normalized: String,
        /// Normalized flat value.
        flat_normalized: String,
    },
    /// Sub-record lists differ; both full lists are kept for diagnosis.
    SubRecords {
        /// Field name holding the list in the structured record.
        field: String,
        /// Sub-records from the structured record, as received.
        structured: Vec<SubRecord>,
        /// Sub-records extracted from the flat record, in scan order.
        flat: Vec<SubRecord>,
    },
}

impl Mismatch {
    /// Field the mismatch was recorded under.
    pub fn field(&self) -> &str {
        match self {
            Self::Value { field, .. } | Self::SubRecords { field, .. } => field,
        }
    }
}

/// Classification of a single field. Every field lands in exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Present on both sides and equal.
    Match(String),
    /// Present on both sides and different.
    Mismatch(Mismatch),
    /// In the structured record only.
    MissingInFlat(String),
    /// In the flat record only.
    MissingInStructured(String),
}

impl FieldOutcome {
    /// Field this outcome classifies.
    pub fn field(&self) -> &str {
        match self {
            Self::Match(field) | Self::MissingInFlat(field) | Self::MissingInStructured(field) => {
                field
            }
            Self::Mismatch(m) => m.field(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Match(_) => "match",
            Self::Mismatch(_) => "mismatch",
            Self::MissingInFlat(_) => "missing_in_flat",
            Self::MissingInStructured(_) => "missing_in_structured",
        }
    }
}

/// Result of reconciling one structured record against one flat record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationReport {
    /// Fields that agree, in structured order.
    pub matched: Vec<String>,
    /// Structured fields absent from the flat record.
    pub missing_in_flat: Vec<String>,
    /// Flat fields absent from the structured record.
    pub missing_in_structured: Vec<String>,
    /// Fields present on both sides that disagree.
    pub mismatches: Vec<Mismatch>,
}

impl ReconciliationReport {
    /// Folds outcomes into a report, keeping their order.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = FieldOutcome>) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// Adds one outcome.
    pub fn record(&mut self, outcome: FieldOutcome) {
        match outcome {
            FieldOutcome::Match(field) => self.matched.push(field),
            FieldOutcome::Mismatch(m) => self.mismatches.push(m),
            FieldOutcome::MissingInFlat(field) => self.missing_in_flat.push(field),
            FieldOutcome::MissingInStructured(field) => self.missing_in_structured.push(field),
        }
    }

    /// True when nothing is missing on either side and nothing disagrees.
    pub fn all_match(&self) -> bool {
        self.missing_in_flat.is_empty()
            && self.missing_in_structured.is_empty()
            && self.mismatches.is_empty()
    }

    /// Number of findings (missing fields plus mismatches).
    pub fn finding_count(&self) -> usize {
        self.missing_in_flat.len() + self.missing_in_structured.len() + self.mismatches.len()
    }
}

impl Serialize for ReconciliationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReconciliationReport", 5)?;
        state.serialize_field("all_match", &self.all_match())?;
        state.serialize_field("matched", &self.matched)?;
        state.serialize_field("missing_in_flat", &self.missing_in_flat)?;
        state.serialize_field("missing_in_structured", &self.missing_in_structured)?;
        state.serialize_field("mismatches", &self.mismatches)?;
        state.end()
    }
}
