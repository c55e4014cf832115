use super::*;

// -----------------------------------------------------------------------
// clean_upc
// -----------------------------------------------------------------------

#[test]
fn clean_upc_strips_float_artifact() {
    assert_eq!(clean_upc("885155001234.0"), "885155001234");
}

#[test]
fn clean_upc_strips_non_digits() {
    assert_eq!(clean_upc(" 0-12345-67890-5 "), "012345678905");
    assert_eq!(clean_upc("UPC: 885155001234"), "885155001234");
}

#[test]
fn clean_upc_accepts_any_digit_length() {
    assert_eq!(clean_upc("1234"), "1234");
    assert_eq!(clean_upc("4006381333931"), "4006381333931");
}

#[test]
fn clean_upc_keeps_text_with_no_digits() {
    assert_eq!(clean_upc("N/A"), "N/A");
    assert_eq!(clean_upc(""), "");
}

#[test]
fn clean_upc_is_idempotent() {
    for raw in ["885155001234.0", " 0-12345-67890-5 ", "N/A", "", "1234"] {
        let once = clean_upc(raw);
        assert_eq!(clean_upc(&once), once, "not idempotent for {raw:?}");
    }
}

// -----------------------------------------------------------------------
// parse_f64_or
// -----------------------------------------------------------------------

#[test]
fn parse_f64_reads_plain_numbers() {
    let coerced = parse_f64_or(Some("19.99"), 0.0);
    assert!((coerced.value - 19.99).abs() < f64::EPSILON);
    assert!(!coerced.defaulted);
}

#[test]
fn parse_f64_defaults_silently_when_absent_or_blank() {
    assert_eq!(parse_f64_or(None, 0.0), Coerced { value: 0.0, defaulted: false });
    assert_eq!(parse_f64_or(Some("   "), 0.0), Coerced { value: 0.0, defaulted: false });
}

#[test]
fn parse_f64_flags_unparseable_text() {
    let coerced = parse_f64_or(Some("$19.99"), 0.0);
    assert_eq!(coerced.value, 0.0);
    assert!(coerced.defaulted);
}

// -----------------------------------------------------------------------
// parse_quantity_or
// -----------------------------------------------------------------------

#[test]
fn parse_quantity_truncates_float_counts() {
    assert_eq!(parse_quantity_or(Some("4.0"), 1).value, 4);
    assert_eq!(parse_quantity_or(Some("2.9"), 1).value, 2);
}

#[test]
fn parse_quantity_clamps_negative_to_zero() {
    assert_eq!(parse_quantity_or(Some("-3"), 1).value, 0);
}

#[test]
fn parse_quantity_defaults_to_one_on_garbage() {
    let coerced = parse_quantity_or(Some("a few"), 1);
    assert_eq!(coerced.value, 1);
    assert!(coerced.defaulted);
}

#[test]
fn parse_quantity_defaults_silently_when_absent() {
    let coerced = parse_quantity_or(None, 1);
    assert_eq!(coerced.value, 1);
    assert!(!coerced.defaulted);
}
