//! ml-stats - Voting analytics server for music-league competitions
//!
//! Serves read-only aggregate statistics (round totals, standings,
//! leaderboards, favorite songs, voter taste similarity) over a vote
//! ledger maintained by an external importer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use ml_stats::config::{Config, DEFAULT_DB_PATH, DEFAULT_PORT};
use ml_stats::{build_router, db, AppState};

/// Command-line arguments for ml-stats
#[derive(Parser, Debug)]
#[command(name = "ml-stats")]
#[command(about = "Voting analytics server for music-league competitions")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "ML_STATS_PORT")]
    port: u16,

    /// Path to the ledger database
    #[arg(short, long, default_value = DEFAULT_DB_PATH, env = "ML_STATS_DB")]
    database: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = Config::new(args.database, args.port);

    info!("Starting ml-stats v{}", env!("CARGO_PKG_VERSION"));
    info!("Database path: {}", config.db_path.display());

    // The ledger is append-only and owned elsewhere; connect read-only.
    let pool = match db::connect_readonly(&config.db_path).await {
        Ok(pool) => {
            info!("Connected to ledger database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    info!("ml-stats listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
