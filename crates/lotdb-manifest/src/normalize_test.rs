use std::collections::HashMap;

use super::*;

fn make_aggregate(total_cost: f64, total_msrp: f64) -> OrderAggregate {
    OrderAggregate {
        order_id: "BBY-1001".to_string(),
        order_date: "2026-03-14".to_string(),
        total_cost,
        total_msrp,
        total_item_count: 10,
        pallet_brands: HashMap::from([("L-77".to_string(), "iRobot, Shark".to_string())]),
    }
}

fn make_raw(pairs: &[(ManifestField, &str)]) -> RawFields {
    let mut raw = RawFields::default();
    for (field, value) in pairs {
        raw.set(*field, (*value).to_string());
    }
    raw
}

#[test]
fn zero_msrp_order_allocates_zero_cogs() {
    let aggregate = make_aggregate(500.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Dyson V8"),
        (ManifestField::UnitRetail, "399.99"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.allocated_cogs_per_unit, 0.0);
}

#[test]
fn positive_msrp_applies_uniform_ratio() {
    let aggregate = make_aggregate(250.0, 1000.0);
    for (unit, expected) in [("100", 25.0), ("40", 10.0), ("0", 0.0)] {
        let raw = make_raw(&[
            (ManifestField::ProductName, "Widget"),
            (ManifestField::UnitRetail, unit),
        ]);
        let record = normalize_row(&raw, "BBY-1001", &aggregate);
        assert!(
            (record.allocated_cogs_per_unit - expected).abs() < 1e-9,
            "unit {unit}: got {}",
            record.allocated_cogs_per_unit
        );
    }
}

#[test]
fn absent_total_retail_is_computed_from_unit_and_quantity() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::UnitRetail, "10"),
        (ManifestField::Quantity, "3"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert!((record.total_retail - 30.0).abs() < f64::EPSILON);
}

#[test]
fn zero_total_retail_is_treated_as_missing() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::UnitRetail, "5"),
        (ManifestField::Quantity, "2"),
        (ManifestField::TotalRetail, "0"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert!((record.total_retail - 10.0).abs() < f64::EPSILON);
}

#[test]
fn parsed_total_retail_is_kept_when_nonzero() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::UnitRetail, "5"),
        (ManifestField::Quantity, "2"),
        (ManifestField::TotalRetail, "9.5"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert!((record.total_retail - 9.5).abs() < f64::EPSILON);
}

#[test]
fn zero_unit_retail_leaves_zero_total_alone() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[(ManifestField::ProductName, "Widget")]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.unit_retail, 0.0);
    assert_eq!(record.total_retail, 0.0);
}

#[test]
fn quantity_garbage_defaults_to_one() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::Quantity, "a pallet's worth"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.quantity, 1);
}

#[test]
fn upc_float_artifact_is_cleaned() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::Upc, " 885155001234.0 "),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.upc, "885155001234");
}

#[test]
fn string_fields_are_trimmed_and_default_empty() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "  Dyson V8  "),
        (ManifestField::Category, " Vacuums "),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.product_name, "Dyson V8");
    assert_eq!(record.category, "Vacuums");
    assert_eq!(record.listing_title, "");
    assert_eq!(record.asin, "");
    assert_eq!(record.listing_id, "");
}

#[test]
fn brands_come_from_the_pallet_mapping() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::ListingId, "L-77"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.line_item_brands, "iRobot, Shark");

    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::ListingId, "L-unknown"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.line_item_brands, "");
}

#[test]
fn order_date_is_copied_verbatim() {
    let aggregate = make_aggregate(0.0, 0.0);
    let raw = make_raw(&[(ManifestField::ProductName, "Widget")]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.order_date, "2026-03-14");
}

#[test]
fn negative_retail_amounts_clamp_to_zero() {
    let aggregate = make_aggregate(250.0, 1000.0);
    let raw = make_raw(&[
        (ManifestField::ProductName, "Widget"),
        (ManifestField::UnitRetail, "-12.0"),
    ]);
    let record = normalize_row(&raw, "BBY-1001", &aggregate);
    assert_eq!(record.unit_retail, 0.0);
    assert_eq!(record.allocated_cogs_per_unit, 0.0);
}
