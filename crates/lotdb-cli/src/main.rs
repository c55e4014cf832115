mod stats;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lotdb-cli")]
#[command(about = "Liquidation manifest sync and reporting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse manifest workbooks and upsert normalized rows into Postgres
    Sync {
        /// Directory containing order_manifest_<order_id>.xlsx files
        #[arg(long)]
        manifests_dir: Option<PathBuf>,
        /// Path to orders.json with per-order financial metadata
        #[arg(long)]
        orders_json: Option<PathBuf>,
        /// Parse and report per-file counts without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print aggregate totals and per-order rollups from the manifest table
    Stats {
        /// Maximum number of order rollups to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = lotdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync {
            manifests_dir,
            orders_json,
            dry_run,
        } => sync::run_sync(&config, manifests_dir, orders_json, dry_run).await,
        Commands::Stats { limit } => stats::run_stats(&config, limit).await,
    }
}
