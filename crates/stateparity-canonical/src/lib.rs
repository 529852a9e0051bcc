//! Value canonicalization primitives for telemetry/CLI parity checks.
//!
//! The same device counter shows up as `1000000000` in a telemetry payload
//! and as `1G` in command output; an interface state as `LINK_UP` on one side
//! and `LinkUp` on the other. This crate reduces both to a canonical text form
//! and decides whether two values agree.
//!
//! Everything here is a pure function of its inputs.
//!
#![deny(missing_docs)]

/// Tolerance-aware equality of normalized values.
pub mod comparator;
/// Exact base-10 numbers in minimal form.
pub mod decimal;
/// Scalar canonicalization (case, noise tokens, magnitude suffixes).
pub mod normalizer;
/// Leaf values shared by structured and flat records.
pub mod scalar;
/// Parse errors for canonical primitives.
pub mod validation;

pub use comparator::{compare, Comparison, ValueComparator, DEFAULT_TOLERANCE};
pub use decimal::Decimal;
pub use normalizer::{normalize, normalize_number, normalize_str};
pub use scalar::Scalar;
pub use validation::ValidationError;
