//! Field normalization: raw cell text for one row in, exactly one
//! [`ManifestRecord`] out. There is no failure path — every coercion
//! failure degrades to a documented default.

use lotdb_core::{ManifestRecord, OrderAggregate};

use crate::coerce::{clean_upc, parse_f64_or, parse_quantity_or};
use crate::fields::ManifestField;
use crate::workbook::RawFields;

/// Normalize one extracted row against its order's aggregates.
///
/// String fields are trimmed, absent fields become `""`. Quantity defaults
/// to 1, retail amounts to 0.0. A missing or zero total retail is recomputed
/// as `unit_retail * quantity` when a positive unit retail exists. The cost
/// allocation applies the order-wide `cogs_ratio` to the row's unit retail.
#[must_use]
pub fn normalize_row(
    raw: &RawFields,
    order_id: &str,
    aggregate: &OrderAggregate,
) -> ManifestRecord {
    let text = |field: ManifestField| raw.get(field).unwrap_or("").trim().to_string();

    let listing_id = text(ManifestField::ListingId);
    let product_name = text(ManifestField::ProductName);

    let upc = clean_upc(raw.get(ManifestField::Upc).unwrap_or(""));

    let quantity = parse_quantity_or(raw.get(ManifestField::Quantity), 1);
    if quantity.defaulted {
        tracing::debug!(
            order_id,
            product_name = %product_name,
            raw = raw.get(ManifestField::Quantity),
            "quantity unparseable; defaulted to 1"
        );
    }

    let unit_retail = parse_f64_or(raw.get(ManifestField::UnitRetail), 0.0);
    if unit_retail.defaulted {
        tracing::debug!(
            order_id,
            product_name = %product_name,
            raw = raw.get(ManifestField::UnitRetail),
            "unit retail unparseable; defaulted to 0"
        );
    }
    let unit_retail = unit_retail.value.max(0.0);

    let total_retail = parse_f64_or(raw.get(ManifestField::TotalRetail), 0.0);
    if total_retail.defaulted {
        tracing::debug!(
            order_id,
            product_name = %product_name,
            raw = raw.get(ManifestField::TotalRetail),
            "total retail unparseable; defaulted to 0"
        );
    }
    // A present-but-zero total is treated as missing: vendors often leave
    // the total column blank or zeroed while the unit price is populated.
    let mut total_retail = total_retail.value.max(0.0);
    if total_retail == 0.0 && unit_retail > 0.0 {
        total_retail = unit_retail * f64::from(quantity.value);
    }

    ManifestRecord {
        order_id: order_id.to_string(),
        line_item_brands: aggregate.brands_for_listing(&listing_id),
        listing_id,
        listing_title: text(ManifestField::ListingTitle),
        category: text(ManifestField::Category),
        product_name,
        upc,
        asin: text(ManifestField::Asin),
        quantity: quantity.value,
        unit_retail,
        total_retail,
        order_date: aggregate.order_date.clone(),
        allocated_cogs_per_unit: unit_retail * aggregate.cogs_ratio(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
