//! Order metadata loader: turns orders.json into per-order financial
//! aggregates and the pallet-id → brand-list mapping.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use lotdb_core::OrderAggregate;

use crate::error::ManifestError;

#[derive(Debug, Deserialize)]
pub struct OrdersFile {
    #[serde(default)]
    pub orders: Vec<OrderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OrderEntry {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub msrp: f64,
    #[serde(default)]
    pub item_count: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pallet_ids: Vec<String>,
}

/// Load orders.json and aggregate it into a lookup keyed by order id.
///
/// A missing file is non-fatal: the sync proceeds with no order metadata and
/// every record gets a zeroed cost allocation.
///
/// # Errors
///
/// Returns [`ManifestError::Io`] if the file exists but cannot be read, or
/// [`ManifestError::OrdersParse`] if it is not valid orders JSON.
pub fn load_orders(path: &Path) -> Result<HashMap<String, OrderAggregate>, ManifestError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "orders.json not found; proceeding without order metadata");
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let file: OrdersFile =
        serde_json::from_str(&content).map_err(|source| ManifestError::OrdersParse {
            path: path.display().to_string(),
            source,
        })?;

    Ok(aggregate_orders(&file))
}

/// Fold the raw order entries into per-order aggregates.
///
/// Orders with an empty identifier are skipped. Cost, MSRP, and item counts
/// are summed across items; the brand list parsed from each item title is
/// indexed under every pallet id attached to that item, so pallets sharing a
/// title inherit the same brand string.
#[must_use]
pub fn aggregate_orders(file: &OrdersFile) -> HashMap<String, OrderAggregate> {
    let mut orders = HashMap::new();

    for order in &file.orders {
        if order.order_id.is_empty() {
            continue;
        }

        let mut pallet_brands = HashMap::new();
        for item in &order.items {
            let brands = parse_title_brands(&item.title);
            for pallet_id in &item.pallet_ids {
                pallet_brands.insert(pallet_id.clone(), brands.to_string());
            }
        }

        orders.insert(
            order.order_id.clone(),
            OrderAggregate {
                order_id: order.order_id.clone(),
                order_date: order.date.clone(),
                total_cost: order.items.iter().map(|i| i.price).sum(),
                total_msrp: order.items.iter().map(|i| i.msrp).sum(),
                total_item_count: order.items.iter().map(|i| i.item_count).sum(),
                pallet_brands,
            },
        );
    }

    orders
}

/// Extract the brand list from an item title.
///
/// Titles follow `"<category> - <brand list> - Orig. Retail $<amount>"`; the
/// brand list is the second of at least three `" - "`-separated parts. Fewer
/// parts mean no brand information.
fn parse_title_brands(title: &str) -> &str {
    let parts: Vec<&str> = title.split(" - ").collect();
    if parts.len() >= 3 {
        parts[1]
    } else {
        ""
    }
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
