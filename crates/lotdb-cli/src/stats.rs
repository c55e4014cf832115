//! Read-only reporting over the manifest table: the same verification
//! queries the sync prints at the end of a run, available without
//! re-syncing.

use lotdb_core::AppConfig;

/// Print aggregate totals and a per-order rollup table.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a query fails.
pub(crate) async fn run_stats(config: &AppConfig, limit: i64) -> anyhow::Result<()> {
    let pool_config = lotdb_db::PoolConfig::from_app_config(config);
    let pool = lotdb_db::connect_pool(&config.database_url, pool_config).await?;
    // Idempotent bootstrap so a fresh database reports zeros instead of
    // a missing-table error.
    lotdb_db::ensure_schema(&pool).await?;

    let stats = lotdb_db::fetch_manifest_stats(&pool).await?;
    println!("Manifest rows: {}", stats.total_rows);
    println!("Orders:        {}", stats.distinct_orders);
    println!("Total items:   {}", stats.total_quantity);
    println!("Total retail:  ${:.2}", stats.total_retail);
    println!("Unique UPCs:   {}", stats.distinct_upcs);
    let last_synced = lotdb_db::fetch_last_synced_at(&pool).await?;
    println!(
        "Last synced:   {}",
        last_synced.map_or_else(
            || "never".to_string(),
            |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
        )
    );

    let rollups = lotdb_db::list_order_rollups(&pool, limit).await?;
    if rollups.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{:<14} {:<12} {:>6} {:>8} {:>14} {:>14}",
        "order", "date", "rows", "items", "retail", "alloc. cost"
    );
    for rollup in &rollups {
        println!(
            "{:<14} {:<12} {:>6} {:>8} {:>14.2} {:>14.2}",
            rollup.order_id,
            rollup.order_date,
            rollup.row_count,
            rollup.total_quantity,
            rollup.total_retail,
            rollup.allocated_cost
        );
    }

    Ok(())
}
