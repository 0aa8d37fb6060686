use sqlx::{Pool, Sqlite};
use tracing::info;

/// Embedded migration scripts
const MIGRATION_001_ACCOUNTS: &str = include_str!("../migrations/001_accounts.sql");
const MIGRATION_002_ACCOUNTS_NAME_INDEX: &str =
    include_str!("../migrations/002_accounts_name_index.sql");

/// Run all embedded migrations. Every script is idempotent.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    info!("Running migration 001: Accounts table");
    sqlx::query(MIGRATION_001_ACCOUNTS).execute(pool).await?;

    info!("Running migration 002: Accounts name index");
    sqlx::query(MIGRATION_002_ACCOUNTS_NAME_INDEX)
        .execute(pool)
        .await?;

    info!("All migrations completed successfully");
    Ok(())
}

/// Drop the accounts table so the next migration run starts from scratch.
pub async fn drop_tables(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    info!("Dropping accounts table");
    sqlx::query("DROP TABLE IF EXISTS accounts")
        .execute(pool)
        .await?;
    Ok(())
}
