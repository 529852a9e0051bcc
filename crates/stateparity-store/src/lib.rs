//! Record sources, fixture sets and per-path reconciliation.
//!
//! This crate provides:
//! - `RecordSource` and `PathCatalog` traits for injectable device data
//! - `FixtureSet`, a TOML-backed implementation of both, plus the embedded
//!   default device fixtures
//! - `PathReconciler`, which fetches both records for a path and runs the
//!   reconciliation engine over them
//!
//! Missing or empty records surface as `StoreError::MissingData`; they never
//! reach the engine.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Fixture files and the builtin fixture set.
pub mod fixtures;
/// Path-level reconciliation.
pub mod reconciler;
/// Data provider traits.
pub mod traits;

pub use error::StoreError;
pub use fixtures::{Fixture, FixtureSet};
pub use reconciler::{PathReconciler, PathReport};
pub use traits::{PathCatalog, RecordKind, RecordSource};
