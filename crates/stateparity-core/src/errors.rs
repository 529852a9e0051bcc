use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which of the two record representations a finding or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSide {
    /// The structured telemetry record.
    Structured,
    /// The line-oriented command output.
    Flat,
    /// Both records.
    Both,
}

impl fmt::Display for RecordSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => write!(f, "structured record"),
            Self::Flat => write!(f, "flat record"),
            Self::Both => write!(f, "structured and flat records"),
        }
    }
}

/// Failures that stop a reconciliation before a report exists.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// One or both inputs are absent or empty.
    #[error("missing data for the {side}")]
    MissingData {
        /// The side(s) with no data.
        side: RecordSide,
    },
    /// The structured payload could not be decoded into a record.
    #[error("invalid structured record: {0}")]
    InvalidStructured(String),
}
