use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

/// A private in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to a single connection that never expires.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// Poll until a condition is met or timeout
pub async fn poll_until<F, Fut>(
    description: &str,
    timeout_duration: Duration,
    mut condition: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<bool>>,
{
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        if start.elapsed() >= timeout_duration {
            anyhow::bail!("Timeout waiting for: {}", description);
        }

        if condition().await.unwrap_or(false) {
            return Ok(());
        }

        tokio::time::sleep(poll_interval).await;
    }
}
