use account_api::AppState;
use account_metrics::{MetricsService, TracingService};
use account_service::{load_config, prepare_data_dir};
use account_store::{connect_pool, AccountStore};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "account-service-server")]
#[command(about = "Account REST API Service", version)]
struct Cli {
    /// Path to a TOML config file (defaults to configs/default.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Serve the REST API (default)
    Serve,
    /// Drop and recreate the accounts table
    DbCreate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    TracingService::init(&config.logging)?;

    info!("Starting Account Service");
    info!("Configuration loaded: {:?}", config);

    prepare_data_dir(&config.data.db_url);
    let pool = connect_pool(&config.data).await?;
    let store = AccountStore::open(pool.clone()).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::DbCreate => {
            store.reset().await?;
            info!("Database tables recreated");
        }
        Command::Serve => {
            let metrics = Arc::new(MetricsService::new()?);
            let state = AppState::new(config, Arc::new(store), metrics);
            account_api::start_server(state).await?;
            info!("Shutting down Account Service...");
        }
    }

    pool.close().await;
    info!("Account Service shutdown complete");
    Ok(())
}
