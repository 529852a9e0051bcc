use thiserror::Error;

/// Errors raised while parsing canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The input does not follow the expected syntax.
    #[error("{field}: '{value}' does not match the expected syntax")]
    PatternMismatch {
        /// Kind of value that failed to parse.
        field: &'static str,
        /// Offending input.
        value: String,
    },
    /// The input is well-formed but outside the supported range.
    #[error("{field}: {value} exceeds the supported range")]
    OutOfBounds {
        /// Kind of value that is out of range.
        field: &'static str,
        /// Offending input.
        value: String,
    },
}
