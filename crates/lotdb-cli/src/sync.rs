//! The sync orchestrator: a sequential fold over manifest workbooks.
//!
//! Files are processed one at a time and each file's records are upserted
//! before the next file is parsed, so memory stays bounded by the largest
//! single workbook. Summary counters accumulate incrementally across the
//! fold; the final totals come from the sink itself.

use std::path::PathBuf;

use lotdb_core::{AppConfig, ManifestRecord, OrderAggregate};
use lotdb_manifest::{find_manifest_files, load_orders, parse_manifest_file, ManifestFile};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SyncTotals {
    files_processed: usize,
    files_skipped: usize,
    rows_parsed: usize,
    inserted: u64,
    updated: u64,
    errors: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpsertOutcome {
    Inserted,
    Updated,
    Failed,
}

impl SyncTotals {
    fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Failed => self.errors += 1,
        }
    }
}

/// Run a full manifest sync.
///
/// CLI flags override the configured manifest directory and orders.json
/// path. With `dry_run` every file is parsed and per-file counts are
/// printed, but nothing touches the database.
///
/// # Errors
///
/// Returns an error for invalid invocation only: malformed orders.json, an
/// unreadable manifests directory, or an unreachable database. Unreadable
/// individual workbooks and per-record write failures are logged, counted,
/// and skipped.
pub(crate) async fn run_sync(
    config: &AppConfig,
    manifests_dir: Option<PathBuf>,
    orders_json: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let manifests_dir = manifests_dir.unwrap_or_else(|| config.manifests_dir.clone());
    let orders_json = orders_json.unwrap_or_else(|| config.orders_json.clone());

    println!("Manifests dir: {}", manifests_dir.display());
    println!("Orders JSON:   {}", orders_json.display());

    let orders = load_orders(&orders_json)?;
    println!("Loaded {} orders from orders.json", orders.len());

    let files = find_manifest_files(&manifests_dir)?;
    println!("Found {} manifest workbooks", files.len());

    if files.is_empty() {
        println!("No manifest files found. Exiting.");
        return Ok(());
    }

    if dry_run {
        run_dry(&files, &orders);
        return Ok(());
    }

    let pool_config = lotdb_db::PoolConfig::from_app_config(config);
    let pool = lotdb_db::connect_pool(&config.database_url, pool_config).await?;
    lotdb_db::ensure_schema(&pool).await?;

    let mut totals = SyncTotals::default();

    for manifest in &files {
        let records = match parse_file(manifest, &orders) {
            Some(records) => records,
            None => {
                totals.files_skipped += 1;
                continue;
            }
        };

        for record in &records {
            totals.record(upsert_with_retry(&pool, record).await);
        }

        totals.files_processed += 1;
        totals.rows_parsed += records.len();
        println!(
            "  {}: {} product rows (order {})",
            manifest
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            records.len(),
            manifest.order_id
        );
    }

    if totals.rows_parsed == 0 {
        println!("No rows parsed. Exiting.");
        return Ok(());
    }

    let stats = lotdb_db::fetch_manifest_stats(&pool).await?;

    println!("\n--- Sync Complete ---");
    println!(
        "Upserted:      {} inserted, {} updated ({} errors)",
        totals.inserted, totals.updated, totals.errors
    );
    if totals.files_skipped > 0 {
        println!("Skipped:       {} unreadable files", totals.files_skipped);
    }
    println!("Total in DB:   {} manifest rows", stats.total_rows);
    println!("Orders:        {}", stats.distinct_orders);
    println!("Total items:   {}", stats.total_quantity);
    println!("Total retail:  ${:.2}", stats.total_retail);
    println!("Unique UPCs:   {}", stats.distinct_upcs);

    Ok(())
}

/// Parse one workbook against its order aggregate, or `None` when the file
/// is unreadable (logged and skipped; the run continues).
fn parse_file(
    manifest: &ManifestFile,
    orders: &std::collections::HashMap<String, OrderAggregate>,
) -> Option<Vec<ManifestRecord>> {
    let aggregate = orders
        .get(&manifest.order_id)
        .cloned()
        .unwrap_or_else(|| OrderAggregate::zeroed(&manifest.order_id));

    match parse_manifest_file(&manifest.path, &manifest.order_id, &aggregate) {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::error!(
                path = %manifest.path.display(),
                order_id = %manifest.order_id,
                error = %e,
                "skipping unreadable manifest file"
            );
            None
        }
    }
}

/// Upsert one record, retrying exactly once on failure.
///
/// Each attempt is a self-contained statement on a freshly acquired pooled
/// connection; the retry shares no transaction or statement state with the
/// failed attempt. A second failure is a permanent error for this record.
async fn upsert_with_retry(pool: &sqlx::PgPool, record: &ManifestRecord) -> UpsertOutcome {
    match lotdb_db::upsert_manifest_item(pool, record).await {
        Ok(true) => UpsertOutcome::Inserted,
        Ok(false) => UpsertOutcome::Updated,
        Err(first) => {
            let (order_id, _, product_name, upc) = record.identity();
            tracing::warn!(
                order_id,
                product_name,
                upc,
                error = %first,
                "upsert failed; retrying once"
            );
            match lotdb_db::upsert_manifest_item(pool, record).await {
                Ok(true) => UpsertOutcome::Inserted,
                Ok(false) => UpsertOutcome::Updated,
                Err(second) => {
                    tracing::error!(
                        order_id,
                        product_name,
                        upc,
                        error = %second,
                        "upsert failed twice; recorded as permanent error"
                    );
                    UpsertOutcome::Failed
                }
            }
        }
    }
}

/// Dry run: parse everything, print per-file counts and grand totals,
/// write nothing.
fn run_dry(files: &[ManifestFile], orders: &std::collections::HashMap<String, OrderAggregate>) {
    let mut rows_parsed = 0usize;
    let mut files_skipped = 0usize;
    let mut total_quantity = 0i64;
    let mut total_retail = 0.0f64;

    for manifest in files {
        let Some(records) = parse_file(manifest, orders) else {
            files_skipped += 1;
            continue;
        };
        println!(
            "  {}: {} product rows (order {})",
            manifest
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            records.len(),
            manifest.order_id
        );
        rows_parsed += records.len();
        total_quantity += records.iter().map(|r| i64::from(r.quantity)).sum::<i64>();
        total_retail += records.iter().map(|r| r.total_retail).sum::<f64>();
    }

    println!("\n--- Dry Run ---");
    println!("Rows parsed:   {rows_parsed}");
    if files_skipped > 0 {
        println!("Skipped:       {files_skipped} unreadable files");
    }
    println!("Total items:   {total_quantity}");
    println!("Total retail:  ${total_retail:.2}");
}
