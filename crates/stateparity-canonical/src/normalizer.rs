use regex::Regex;
use serde_json::Number;
use std::sync::OnceLock;

use crate::decimal::Decimal;
use crate::scalar::Scalar;

/// Substrings that carry no meaning for comparison, removed in this order.
const NOISE_TOKENS: [&str; 3] = ["_", "bytes", "%"];

/// Canonical comparable text for any scalar.
pub fn normalize(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) => normalize_number(n),
        Scalar::Text(s) => normalize_str(s),
    }
}

/// Numbers skip unit handling; they only go through decimal canonicalization
/// so `65`, `65.0` and `6.5e1` agree.
pub fn normalize_number(value: &Number) -> String {
    let text = value.to_string();
    match Decimal::parse(&text) {
        Ok(decimal) => decimal.to_string(),
        Err(_) => text,
    }
}

/// Lowercases, strips noise tokens, resolves `k`/`m`/`g`/`t` magnitude
/// suffixes and canonicalizes decimal text. Anything that is not numeric
/// after stripping is returned stripped and lowercased.
pub fn normalize_str(value: &str) -> String {
    let stripped = strip_noise(&value.to_lowercase());
    let resolved = resolve_magnitude(&stripped).unwrap_or(stripped);
    match Decimal::parse(&resolved) {
        Ok(decimal) => decimal.to_string(),
        Err(_) => resolved,
    }
}

/// Removes noise tokens until none are left, so removing one token cannot
/// leave a new one behind (`bybytestes`).
fn strip_noise(value: &str) -> String {
    let mut current = value.to_string();
    loop {
        let next = NOISE_TOKENS
            .iter()
            .fold(current.clone(), |acc, token| acc.replace(token, ""));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// `<number>[k|m|g|t][b]` spanning the whole string, scaled to an absolute
/// value. A bare number comes back unchanged apart from canonical form.
fn resolve_magnitude(value: &str) -> Option<String> {
    static MAGNITUDE: OnceLock<Regex> = OnceLock::new();
    let re = MAGNITUDE
        .get_or_init(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)([kmgt]?)b?$").expect("invalid regex"));
    let caps = re.captures(value)?;
    let number = Decimal::parse(&caps[1]).ok()?;
    let exponent = match &caps[2] {
        "k" => 3,
        "m" => 6,
        "g" => 9,
        "t" => 12,
        _ => 0,
    };
    Some(number.scale_pow10(exponent).to_string())
}
