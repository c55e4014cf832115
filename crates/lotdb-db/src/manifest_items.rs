//! The `manifest_items` table: schema bootstrap, idempotent upsert keyed by
//! the `(order_id, listing_id, product_name, upc)` identity tuple, and the
//! aggregate queries behind the run summary and `stats` subcommand.

use chrono::{DateTime, Utc};
use lotdb_core::ManifestRecord;
use sqlx::PgPool;

const SCHEMA_STATEMENTS: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS manifest_items (
        id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        order_id VARCHAR(20) NOT NULL,
        listing_id VARCHAR(20) NOT NULL DEFAULT '',
        listing_title TEXT NOT NULL DEFAULT '',
        category VARCHAR(255) NOT NULL DEFAULT '',
        product_name TEXT NOT NULL,
        upc VARCHAR(20) NOT NULL DEFAULT '',
        asin VARCHAR(20) NOT NULL DEFAULT '',
        quantity INTEGER NOT NULL DEFAULT 1,
        unit_retail DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_retail DOUBLE PRECISION NOT NULL DEFAULT 0,
        order_date VARCHAR(50) NOT NULL DEFAULT '',
        line_item_brands VARCHAR(500) NOT NULL DEFAULT '',
        allocated_cogs_per_unit DOUBLE PRECISION NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (order_id, listing_id, product_name, upc)
    )",
    "CREATE INDEX IF NOT EXISTS idx_manifest_items_order_id ON manifest_items (order_id)",
    "CREATE INDEX IF NOT EXISTS idx_manifest_items_upc ON manifest_items (upc)",
    "CREATE INDEX IF NOT EXISTS idx_manifest_items_category ON manifest_items (category)",
];

/// Create the `manifest_items` table and its indexes if absent. Idempotent.
///
/// Identity-tuple columns are NOT NULL with `''` defaults: NULLs are
/// pairwise distinct under a Postgres UNIQUE constraint and would defeat
/// upsert conflict resolution.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Upsert one manifest record keyed by the identity tuple, overwriting all
/// non-key fields on conflict.
///
/// Returns `true` when the row was newly inserted, `false` when an existing
/// row was updated. The statement is self-contained (single implicit
/// transaction on a pooled connection), so a failed attempt leaves no state
/// for a retry to trip over.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn upsert_manifest_item(
    pool: &PgPool,
    record: &ManifestRecord,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "INSERT INTO manifest_items (
             order_id, listing_id, listing_title, category, product_name,
             upc, asin, quantity, unit_retail, total_retail,
             order_date, line_item_brands, allocated_cogs_per_unit
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         ON CONFLICT (order_id, listing_id, product_name, upc) DO UPDATE SET
             listing_title           = EXCLUDED.listing_title,
             category                = EXCLUDED.category,
             asin                    = EXCLUDED.asin,
             quantity                = EXCLUDED.quantity,
             unit_retail             = EXCLUDED.unit_retail,
             total_retail            = EXCLUDED.total_retail,
             order_date              = EXCLUDED.order_date,
             line_item_brands        = EXCLUDED.line_item_brands,
             allocated_cogs_per_unit = EXCLUDED.allocated_cogs_per_unit,
             updated_at              = NOW()
         RETURNING (xmax = 0) AS is_new",
    )
    .bind(&record.order_id)
    .bind(&record.listing_id)
    .bind(&record.listing_title)
    .bind(&record.category)
    .bind(&record.product_name)
    .bind(&record.upc)
    .bind(&record.asin)
    .bind(record.quantity)
    .bind(record.unit_retail)
    .bind(record.total_retail)
    .bind(&record.order_date)
    .bind(&record.line_item_brands)
    .bind(record.allocated_cogs_per_unit)
    .fetch_one(pool)
    .await
}

/// Aggregate totals across the whole `manifest_items` table.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct ManifestStats {
    pub total_rows: i64,
    pub distinct_orders: i64,
    pub total_quantity: i64,
    pub total_retail: f64,
    pub distinct_upcs: i64,
}

/// Fetch the summary counters printed at the end of a sync run.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn fetch_manifest_stats(pool: &PgPool) -> Result<ManifestStats, sqlx::Error> {
    sqlx::query_as::<_, ManifestStats>(
        "SELECT
             COUNT(*)                                          AS total_rows,
             COUNT(DISTINCT order_id)                          AS distinct_orders,
             COALESCE(SUM(quantity), 0)::BIGINT                AS total_quantity,
             COALESCE(SUM(total_retail), 0)::DOUBLE PRECISION  AS total_retail,
             COUNT(DISTINCT upc) FILTER (WHERE upc <> '')      AS distinct_upcs
         FROM manifest_items",
    )
    .fetch_one(pool)
    .await
}

/// Most recent upsert time across the table, `None` when it is empty.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn fetch_last_synced_at(pool: &PgPool) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<DateTime<Utc>>>("SELECT MAX(updated_at) FROM manifest_items")
        .fetch_one(pool)
        .await
}

/// Per-order rollup for the `stats` subcommand.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRollup {
    pub order_id: String,
    pub order_date: String,
    pub row_count: i64,
    pub total_quantity: i64,
    pub total_retail: f64,
    pub allocated_cost: f64,
}

/// List per-order rollups, newest order date first, capped at `limit`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_order_rollups(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<OrderRollup>, sqlx::Error> {
    sqlx::query_as::<_, OrderRollup>(
        "SELECT
             order_id,
             MAX(order_date)                                   AS order_date,
             COUNT(*)                                          AS row_count,
             COALESCE(SUM(quantity), 0)::BIGINT                AS total_quantity,
             COALESCE(SUM(total_retail), 0)::DOUBLE PRECISION  AS total_retail,
             COALESCE(SUM(allocated_cogs_per_unit * quantity), 0)::DOUBLE PRECISION
                                                               AS allocated_cost
         FROM manifest_items
         GROUP BY order_id
         ORDER BY MAX(order_date) DESC, order_id
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
