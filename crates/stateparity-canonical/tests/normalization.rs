use serde_json::Number;
use stateparity_canonical::{compare, normalize, normalize_str, Scalar};

fn text(value: &str) -> Scalar {
    Scalar::from(value)
}

#[test]
fn normalization_is_idempotent() {
    let inputs = [
        "1K",
        "1.5G",
        "352.8289KB",
        "ACTIVE",
        "LINK_UP",
        "35%",
        "361296bytes",
        "00:1C:42:2B:60:5A",
        "0.0.0.0",
        "  65 ",
        "6.5e1",
        "bybytestes",
        "-0.0",
        "1_000",
        "10Gb",
        "",
    ];
    for input in inputs {
        let once = normalize_str(input);
        assert_eq!(normalize_str(&once), once, "not idempotent for {input:?}");
    }

    let numbers = [
        Scalar::from(65i64),
        Scalar::from(1_000_000_000u64),
        Scalar::from_f64(43.01).unwrap(),
        Scalar::from_f64(65.0).unwrap(),
        Scalar::from_f64(1e16).unwrap(),
        Scalar::from(-7i64),
    ];
    for number in numbers {
        let once = normalize(&number);
        assert_eq!(normalize(&text(&once)), once, "not idempotent for {number:?}");
    }
}

#[test]
fn unit_suffixes_resolve_to_absolute_values() {
    assert_eq!(normalize_str("1K"), normalize_str("1000"));
    assert_eq!(normalize_str("1.5G"), normalize_str("1500000000"));
    assert_eq!(normalize_str("352.8289KB"), "352828.9");
    assert_eq!(normalize_str("1G"), normalize(&Scalar::from(1_000_000_000u64)));
}

#[test]
fn noise_is_stripped() {
    assert_eq!(normalize_str("ACTIVE"), normalize_str("active"));
    assert_eq!(normalize_str("35%"), normalize_str("35"));
    assert_eq!(normalize_str("361296bytes"), normalize_str("361296"));
}

#[test]
fn numeric_and_text_forms_agree() {
    let number = Scalar::Number(Number::from_f64(31.0).unwrap());
    assert_eq!(normalize(&number), normalize_str("31.0%"));
}

#[test]
fn tolerance_comparison() {
    assert!(compare(&Scalar::from(65i64), &text("65.0000001")).equal);
    assert!(!compare(&Scalar::from(65i64), &text("65.01")).equal);
}

#[test]
fn case_and_separator_insensitive_text() {
    let c = compare(&text("LINK_UP"), &text("linkup"));
    assert!(c.equal);
    assert_eq!(c.left, "linkup");
    assert_eq!(c.right, "linkup");
}

#[test]
fn comparison_serializes_with_both_forms() {
    let c = compare(&text("up"), &text("DOWN"));
    assert_eq!(
        serde_json::to_value(&c).unwrap(),
        serde_json::json!({ "equal": false, "left": "up", "right": "down" })
    );
}
