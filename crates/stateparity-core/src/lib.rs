//! Reconciliation of structured telemetry records against command output.
//!
//! This crate provides:
//! - The `StructuredRecord` model and its JSON decoder
//! - Extraction of `key: value` fields and sub-records from flat text
//! - `ReconciliationEngine`, which diffs the two into a `ReconciliationReport`
//!
//! Core invariants:
//! - Every field is classified exactly once: match, mismatch, or missing on
//!   one side
//! - Sub-record lists compare as sets keyed by their identifying field
//! - An empty input is the only hard failure; all other irregularities are
//!   findings
//! - No state survives a call; engines may be shared across threads
//!
#![deny(missing_docs)]

/// Reconciliation engine and its options.
pub mod engine;
/// Error types for reconciliation.
pub mod errors;
/// Flat record parsing.
pub mod extract;
/// Structured record model and decoder.
pub mod record;
/// Findings and the aggregated report.
pub mod report;

pub use engine::{reconcile, ReconcileOptions, ReconciliationEngine};
pub use errors::{ReconcileError, RecordSide};
pub use extract::{FieldMap, RecordExtractor};
pub use record::{FieldValue, StructuredRecord, SubRecord, SubRecordPolicy};
pub use report::{FieldOutcome, Mismatch, ReconciliationReport};
pub use stateparity_canonical::Scalar;
