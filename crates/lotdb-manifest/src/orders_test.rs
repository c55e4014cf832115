use std::io::Write;

use super::*;

fn make_item(price: f64, msrp: f64, title: &str, pallet_ids: &[&str]) -> OrderItem {
    OrderItem {
        price,
        msrp,
        item_count: 1,
        title: title.to_string(),
        pallet_ids: pallet_ids.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn make_order(order_id: &str, items: Vec<OrderItem>) -> OrderEntry {
    OrderEntry {
        order_id: order_id.to_string(),
        date: "2026-03-14".to_string(),
        items,
    }
}

#[test]
fn aggregate_orders_sums_financials() {
    let file = OrdersFile {
        orders: vec![make_order(
            "BBY-1001",
            vec![
                make_item(120.0, 400.0, "Small Appliances - Keurig - Orig. Retail $400", &["P-1"]),
                make_item(80.0, 100.0, "Audio - JBL - Orig. Retail $100", &["P-2"]),
            ],
        )],
    };
    let orders = aggregate_orders(&file);
    let aggregate = &orders["BBY-1001"];
    assert!((aggregate.total_cost - 200.0).abs() < f64::EPSILON);
    assert!((aggregate.total_msrp - 500.0).abs() < f64::EPSILON);
    assert_eq!(aggregate.total_item_count, 2);
    assert_eq!(aggregate.order_date, "2026-03-14");
}

#[test]
fn aggregate_orders_skips_orders_without_id() {
    let file = OrdersFile {
        orders: vec![make_order("", vec![make_item(10.0, 20.0, "t", &[])])],
    };
    assert!(aggregate_orders(&file).is_empty());
}

#[test]
fn title_brands_reach_every_pallet_on_the_item() {
    let file = OrdersFile {
        orders: vec![make_order(
            "BBY-1001",
            vec![make_item(
                100.0,
                28_292.0,
                "Vacuums & Floorcare - iRobot, BISSELL, Shark - Orig. Retail $28,292",
                &["P-1", "P-2", "P-3"],
            )],
        )],
    };
    let orders = aggregate_orders(&file);
    let aggregate = &orders["BBY-1001"];
    for pallet_id in ["P-1", "P-2", "P-3"] {
        assert_eq!(
            aggregate.brands_for_listing(pallet_id),
            "iRobot, BISSELL, Shark"
        );
    }
}

#[test]
fn short_title_yields_empty_brand_string() {
    let file = OrdersFile {
        orders: vec![make_order(
            "BBY-1001",
            vec![make_item(10.0, 20.0, "Vacuums & Floorcare - leftovers", &["P-1"])],
        )],
    };
    let orders = aggregate_orders(&file);
    assert_eq!(orders["BBY-1001"].brands_for_listing("P-1"), "");
}

#[test]
fn extra_title_segments_still_take_the_second_part() {
    let file = OrdersFile {
        orders: vec![make_order(
            "BBY-1001",
            vec![make_item(
                10.0,
                20.0,
                "TVs - Samsung, LG - Grade B - Orig. Retail $5,000",
                &["P-1"],
            )],
        )],
    };
    let orders = aggregate_orders(&file);
    assert_eq!(orders["BBY-1001"].brands_for_listing("P-1"), "Samsung, LG");
}

#[test]
fn load_orders_missing_file_yields_empty_map() {
    let dir = tempfile::tempdir().unwrap();
    let orders = load_orders(&dir.path().join("orders.json")).unwrap();
    assert!(orders.is_empty());
}

#[test]
fn load_orders_reads_json_with_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"{{"orders": [{{"order_id": "BBY-1001", "items": [{{"price": 50.0}}]}}]}}"#
    )
    .unwrap();

    let orders = load_orders(&path).unwrap();
    let aggregate = &orders["BBY-1001"];
    assert!((aggregate.total_cost - 50.0).abs() < f64::EPSILON);
    assert_eq!(aggregate.total_msrp, 0.0);
    assert_eq!(aggregate.order_date, "");
    assert_eq!(aggregate.cogs_ratio(), 0.0);
}

#[test]
fn load_orders_malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = load_orders(&path).unwrap_err();
    assert!(matches!(err, ManifestError::OrdersParse { .. }));
}
