pub mod migrations;
pub mod store;

pub use store::AccountStore;

use account_models::{AccountError, DataConfig};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Open a connection pool for the configured database, creating the SQLite
/// file when it does not exist yet.
pub async fn connect_pool(config: &DataConfig) -> Result<SqlitePool, AccountError> {
    let options = SqliteConnectOptions::from_str(&config.db_url)
        .map_err(|e| AccountError::ConfigError {
            reason: format!("invalid database url '{}': {}", config.db_url, e),
        })?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(AccountError::SqlxError)?;

    info!(db_url = %config.db_url, "Database connected");
    Ok(pool)
}
