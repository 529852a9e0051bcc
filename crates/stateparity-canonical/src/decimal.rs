use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::validation::ValidationError;

/// Largest absolute exponent accepted in `e` notation.
const EXPONENT_MAX: i64 = 256;

/// Exact base-10 number kept in minimal form.
///
/// `m` is the signed mantissa (no leading zeros, `"-0"` forbidden) and `s` the
/// number of fractional digits. Trailing fractional zeros are always folded
/// into the scale, so `1.50`, `1.5` and `15e-1` are the same value and render
/// the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    m: String,
    s: u32,
}

impl Decimal {
    /// Parses plain decimal text: optional sign, digits with an optional
    /// fraction, and an optional `e`/`E` exponent. Surrounding whitespace is
    /// ignored. `inf` and `nan` are not decimals.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        static DECIMAL: OnceLock<Regex> = OnceLock::new();
        let re = DECIMAL.get_or_init(|| {
            Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?$")
                .expect("invalid regex")
        });
        let pattern_mismatch = || ValidationError::PatternMismatch {
            field: "decimal",
            value: input.to_string(),
        };

        let caps = re.captures(input.trim()).ok_or_else(pattern_mismatch)?;
        let negative = &caps[1] == "-";
        let int_part = caps.get(2).map_or("", |m| m.as_str());
        let frac_part = caps.get(3).map_or("", |m| m.as_str());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(pattern_mismatch());
        }

        let exponent = match caps.get(4) {
            Some(e) => {
                let out_of_bounds = || ValidationError::OutOfBounds {
                    field: "exponent",
                    value: e.as_str().to_string(),
                };
                let exponent: i64 = e.as_str().parse().map_err(|_| out_of_bounds())?;
                if exponent.abs() > EXPONENT_MAX {
                    return Err(out_of_bounds());
                }
                exponent
            }
            None => 0,
        };

        let mut digits = format!("{int_part}{frac_part}");
        let mut scale = frac_part.len() as i64 - exponent;
        if scale < 0 {
            digits.push_str(&"0".repeat(scale.unsigned_abs() as usize));
            scale = 0;
        }
        let scale = u32::try_from(scale).map_err(|_| ValidationError::OutOfBounds {
            field: "scale",
            value: scale.to_string(),
        })?;

        Ok(Self::from_parts(negative, digits, scale))
    }

    /// Multiplies by `10^exponent`. Exact: only the decimal point moves.
    pub fn scale_pow10(&self, exponent: u32) -> Self {
        let negative = self.m.starts_with('-');
        let mut digits = self.m.trim_start_matches('-').to_string();
        let scale = if self.s >= exponent {
            self.s - exponent
        } else {
            digits.push_str(&"0".repeat((exponent - self.s) as usize));
            0
        };
        Self::from_parts(negative, digits, scale)
    }

    /// Signed mantissa in minimal form.
    pub fn mantissa(&self) -> &str {
        &self.m
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.s
    }

    fn from_parts(negative: bool, digits: String, scale: u32) -> Self {
        let mut digits = digits.trim_start_matches('0').to_string();
        let mut scale = scale;
        while scale > 0 && digits.ends_with('0') {
            digits.pop();
            scale -= 1;
        }
        if digits.is_empty() {
            return Self {
                m: "0".to_string(),
                s: 0,
            };
        }
        let m = if negative { format!("-{digits}") } else { digits };
        Self { m, s: scale }
    }
}

impl FromStr for Decimal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, digits) = match self.m.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", self.m.as_str()),
        };
        let scale = self.s as usize;
        if scale == 0 {
            write!(f, "{sign}{digits}")
        } else if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int}.{frac}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        }
    }
}
