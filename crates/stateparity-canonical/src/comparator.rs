use serde::Serialize;

use crate::normalizer::normalize;
use crate::scalar::Scalar;

/// Absolute tolerance applied when both sides are numeric.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Verdict for one pair of values, with the forms that were compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Whether the two values agree.
    pub equal: bool,
    /// Normalized left-hand value.
    pub left: String,
    /// Normalized right-hand value.
    pub right: String,
}

/// Compares normalized values: numerically within an absolute tolerance when
/// both sides parse as finite numbers, by exact text otherwise. Identical
/// normalized text always agrees, whatever the tolerance.
///
/// The tolerance does not scale with magnitude, so very large counters that
/// differ only past the 15th significant digit compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueComparator {
    tolerance: f64,
}

impl Default for ValueComparator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValueComparator {
    /// Creates a comparator with a custom absolute tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Absolute tolerance used for numeric comparisons.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Normalizes both values and decides whether they agree.
    pub fn compare(&self, left: &Scalar, right: &Scalar) -> Comparison {
        let left = normalize(left);
        let right = normalize(right);
        let equal = match (parse_finite(&left), parse_finite(&right)) {
            (Some(a), Some(b)) => (a - b).abs() < self.tolerance || left == right,
            _ => left == right,
        };
        Comparison { equal, left, right }
    }
}

/// Compares with [`DEFAULT_TOLERANCE`].
pub fn compare(left: &Scalar, right: &Scalar) -> Comparison {
    ValueComparator::default().compare(left, right)
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_within_tolerance() {
        let c = compare(&Scalar::from(65i64), &Scalar::from("65.0000001"));
        assert!(c.equal);
        assert_eq!(c.left, "65");
        assert_eq!(c.right, "65.0000001");
    }

    #[test]
    fn numeric_outside_tolerance() {
        let c = compare(&Scalar::from(65i64), &Scalar::from("65.01"));
        assert!(!c.equal);
    }

    #[test]
    fn text_falls_back_to_exact_match() {
        assert!(compare(&Scalar::from("LINK_UP"), &Scalar::from("linkup")).equal);
        assert!(!compare(&Scalar::from("up"), &Scalar::from("down")).equal);
    }

    #[test]
    fn one_numeric_side_uses_text() {
        let c = compare(&Scalar::from("0.0.0.0"), &Scalar::from("0"));
        assert!(!c.equal);
    }

    #[test]
    fn non_finite_text_is_compared_as_text() {
        assert!(compare(&Scalar::from("inf"), &Scalar::from("INF")).equal);
        assert!(!compare(&Scalar::from("inf"), &Scalar::from("nan")).equal);
    }

    #[test]
    fn zero_tolerance_still_matches_identical_values() {
        let exact = ValueComparator::with_tolerance(0.0);
        let c = exact.compare(&Scalar::from(65i64), &Scalar::from("65"));
        assert!(c.equal);
        assert_eq!(c.left, "65");
        assert!(exact.compare(&Scalar::from("1.5K"), &Scalar::from("1500")).equal);
        assert!(!exact.compare(&Scalar::from(65i64), &Scalar::from("65.0000001")).equal);
    }

    #[test]
    fn custom_tolerance() {
        let loose = ValueComparator::with_tolerance(0.5);
        assert_eq!(loose.tolerance(), 0.5);
        assert!(loose.compare(&Scalar::from("10"), &Scalar::from("10.4")).equal);
        assert!(!loose.compare(&Scalar::from("10"), &Scalar::from("10.6")).equal);
    }
}
