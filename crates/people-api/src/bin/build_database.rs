//! build-database: recreate the people database and load the sample data.
//!
//! Deletes the existing SQLite file, applies migrations, then inserts three
//! sample people and their notes.

use clap::Parser;
use tracing::info;

use people_api::telemetry::{init_tracing, LogConfig};
use people_db::{remove_database_file, seed, Database, PoolConfig, SAMPLE_PEOPLE};

#[derive(Parser)]
#[command(name = "build-database")]
#[command(author, version, about = "Recreate the people database with sample data")]
struct Cli {
    /// Database to rebuild (falls back to DATABASE_URL, then sqlite://people.db)
    #[arg(short, long, env = "DATABASE_URL", default_value = people_db::DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Seed the people only, without their notes
    #[arg(long)]
    no_notes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _file_guard = init_tracing(&LogConfig::from_env(), "people_db=info,build_database=info");

    let cli = Cli::parse();

    if remove_database_file(&cli.database_url).await? {
        info!(database_url = %cli.database_url, "Removed existing database");
    }

    let db = Database::connect_with_config(&cli.database_url, PoolConfig::default()).await?;
    db.migrate().await?;

    let summary = seed(db.pool(), SAMPLE_PEOPLE, !cli.no_notes).await?;
    db.pool().close().await;

    println!(
        "Built {} with {} people and {} notes",
        cli.database_url, summary.people, summary.notes
    );
    Ok(())
}
