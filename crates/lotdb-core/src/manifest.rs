//! Domain types shared between the manifest parser and the persistence sink.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Order-level financial aggregates, computed once when orders.json is
/// loaded and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    pub order_id: String,
    /// Opaque date string carried through to every persisted row.
    pub order_date: String,
    /// Sum of item purchase prices across the order.
    pub total_cost: f64,
    /// Sum of item list prices across the order.
    pub total_msrp: f64,
    pub total_item_count: i64,
    /// Pallet/listing identifier → brand-list string extracted from item titles.
    pub pallet_brands: HashMap<String, String>,
}

impl OrderAggregate {
    /// Aggregate for a manifest file whose order is absent from orders.json:
    /// no date, no cost basis, no brand metadata.
    #[must_use]
    pub fn zeroed(order_id: &str) -> Self {
        Self {
            order_id: order_id.to_string(),
            order_date: String::new(),
            total_cost: 0.0,
            total_msrp: 0.0,
            total_item_count: 0,
            pallet_brands: HashMap::new(),
        }
    }

    /// Proportional cost-allocation ratio for the order.
    ///
    /// `total_cost / total_msrp` when MSRP is positive; exactly `0.0`
    /// otherwise, so an order with no list-price data never divides by zero.
    #[must_use]
    pub fn cogs_ratio(&self) -> f64 {
        if self.total_msrp > 0.0 {
            self.total_cost / self.total_msrp
        } else {
            0.0
        }
    }

    /// Brand-list string for a listing id, empty when the listing carries none.
    #[must_use]
    pub fn brands_for_listing(&self, listing_id: &str) -> String {
        self.pallet_brands
            .get(listing_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// One normalized manifest row, constructed once per spreadsheet row and
/// never mutated afterwards.
///
/// Absent string fields are represented as `""` rather than SQL NULL so the
/// identity tuple's uniqueness constraint behaves under Postgres (NULLs are
/// pairwise distinct in a UNIQUE constraint, which would break upsert
/// idempotence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub order_id: String,
    pub listing_id: String,
    pub listing_title: String,
    pub category: String,
    pub product_name: String,
    /// Cleaned digit string; length is not enforced.
    pub upc: String,
    pub asin: String,
    pub quantity: i32,
    pub unit_retail: f64,
    pub total_retail: f64,
    pub order_date: String,
    pub line_item_brands: String,
    /// `unit_retail * cogs_ratio` for the owning order.
    pub allocated_cogs_per_unit: f64,
}

impl ManifestRecord {
    /// The four fields that uniquely determine a persisted row and govern
    /// upsert conflict resolution.
    #[must_use]
    pub fn identity(&self) -> (&str, &str, &str, &str) {
        (
            &self.order_id,
            &self.listing_id,
            &self.product_name,
            &self.upc,
        )
    }
}
