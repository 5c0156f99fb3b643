//! xjh-seed - load content into an XJ hub database
//!
//! **Usage:**
//! ```bash
//! xjh-seed [--database <PATH>] [--config <PATH>] [--reset] [--dry-run] builtin
//! xjh-seed load seeds/example.toml
//! xjh-seed count
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xjh_common::config::{resolve_database_path, TomlConfig};
use xjh_common::db::{count_table, init_database, tables_in_construction_order};
use xjh_seed::{content, SeedDocument, SeedReport, Seeder};

/// Command-line arguments for xjh-seed
#[derive(Parser, Debug)]
#[command(name = "xjh-seed")]
#[command(about = "Seed an XJ hub database with content")]
#[command(version)]
struct Args {
    /// Database file (overrides XJH_DATABASE and the config file)
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Empty every content table before loading
    #[arg(long)]
    reset: bool,

    /// Run the load and roll it back
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the built-in content set
    Builtin,
    /// Load a seed document (.json or .toml)
    Load {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the row count of every content table
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config decides the log level, so it loads under a temporary subscriber
    let config = tracing::subscriber::with_default(tracing_subscriber::fmt().finish(), || {
        TomlConfig::load_or_default(args.config.as_deref())
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_deref().unwrap_or("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting XJ hub seeder (xjh-seed) v{}", env!("CARGO_PKG_VERSION"));

    let db_path = resolve_database_path(args.database.as_deref(), &config);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    match &args.command {
        Command::Count => {
            if args.reset || args.dry_run {
                warn!("--reset and --dry-run have no effect on count");
            }
            print_counts(&pool).await?;
        }
        Command::Builtin => {
            let report = seed(&pool, &args, Source::Builtin).await?;
            println!("Seeded {}", report);
        }
        Command::Load { file } => {
            let document = SeedDocument::from_path(file)
                .with_context(|| format!("Failed to read seed document {}", file.display()))?;
            let report = seed(&pool, &args, Source::Document(&document)).await?;
            println!("Seeded {}", report);
        }
    }

    pool.close().await;
    Ok(())
}

/// What a seed run inserts
enum Source<'d> {
    Builtin,
    Document(&'d SeedDocument),
}

/// Run one load inside a seeder, honoring --reset and --dry-run
async fn seed(pool: &SqlitePool, args: &Args, source: Source<'_>) -> Result<SeedReport> {
    let started = Utc::now();
    let mut seeder = Seeder::begin(pool).await.context("Failed to begin seed transaction")?;

    if args.reset {
        let deleted = seeder.truncate().await.context("Failed to reset content tables")?;
        info!("Reset removed {} rows", deleted);
    }

    let loaded = match source {
        Source::Builtin => content::go(&mut seeder).await,
        Source::Document(document) => document.load(&mut seeder).await,
    };
    loaded.context("Seed aborted, nothing was written")?;

    let report = if args.dry_run {
        info!("Dry run: rolling back");
        seeder.rollback().await?
    } else {
        seeder.commit().await.context("Failed to commit seed")?
    };

    let elapsed = Utc::now() - started;
    info!("Seeded {} records in {} ms", report.total(), elapsed.num_milliseconds());
    Ok(report)
}

async fn print_counts(pool: &SqlitePool) -> Result<()> {
    for table in tables_in_construction_order() {
        let count = count_table(pool, table.table_name)
            .await
            .with_context(|| format!("Failed to count {}", table.table_name))?;
        println!("{:<28} {:<32} {}", table.kind, table.table_name, count);
    }
    Ok(())
}
