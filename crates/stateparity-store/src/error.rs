//! Error types for store operations.

use stateparity_core::ReconcileError;
use thiserror::Error;

/// Errors that can occur while loading fixtures or checking a path.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The path is not in the catalog.
    #[error("The telemetry path '{0}' is not recognized.")]
    UnrecognizedPath(String),
    /// The catalog knows the path but a record for it is absent or empty.
    #[error("Missing data for path {path}")]
    MissingData {
        /// Telemetry path that was checked.
        path: String,
    },
    /// The structured payload could not be decoded.
    #[error("reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),
    /// Fixture file is not valid TOML or does not match the fixture layout.
    #[error("fixture parse error: {0}")]
    FixtureParse(#[from] toml::de::Error),
    /// I/O error while reading a fixture file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Fixture file is well formed but inconsistent.
    #[error("invalid fixtures: {0}")]
    InvalidFixtures(String),
}
