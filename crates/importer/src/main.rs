use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use storage::services::reconcile::{parse_batch_text, reconcile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bulk-import participants from a delimited sheet export.
///
/// Reads lines in the admin format `Name, Badges, Posts` (comma or tab
/// separated) and reconciles them against the participant store, the same
/// code path as the batch endpoint.
#[derive(Parser)]
#[command(name = "leaderboard-import")]
#[command(about = "Participant bulk importer", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the delimited participant file
    #[arg(long)]
    file: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Parse and report without writing to the store
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("importer={log_level},storage={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Reading participant file: {}", cli.file.display());
    let text = tokio::fs::read_to_string(&cli.file).await?;

    let entries = parse_batch_text(&text);
    if entries.is_empty() {
        tracing::warn!("No valid entries found in {}", cli.file.display());
        return Ok(());
    }
    tracing::info!("Parsed {} entr(y/ies)", entries.len());

    if cli.dry_run {
        for entry in &entries {
            tracing::info!(
                "  {} — {} badge(s), {} post(s)",
                entry.name.as_deref().unwrap_or("<missing name>"),
                entry.badges,
                entry.posts
            );
        }
        tracing::info!("Dry run, store not touched");
        return Ok(());
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    let summary = reconcile(&pool, &entries).await;

    tracing::info!(
        "Summary: {} created, {} updated, {} failed",
        summary.created,
        summary.updated,
        summary.errors.len()
    );
    for error in &summary.errors {
        tracing::error!(
            "  {} <{}>: {}",
            error.name.as_deref().unwrap_or("?"),
            error.email.as_deref().unwrap_or("?"),
            error.error
        );
    }

    if !summary.errors.is_empty() {
        return Err(format!("{} entr(y/ies) failed to import", summary.errors.len()).into());
    }

    Ok(())
}
