use account_models::{Account, AccountError, NewAccount};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, instrument};

use crate::migrations;

/// SQLite-backed account repository.
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a store and bring its schema up to date.
    pub async fn open(pool: SqlitePool) -> Result<Self, AccountError> {
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), AccountError> {
        migrations::run_migrations(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError {
                reason: e.to_string(),
            })
    }

    /// Drop and recreate the accounts table.
    pub async fn reset(&self) -> Result<(), AccountError> {
        migrations::drop_tables(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        self.migrate().await?;
        info!("Accounts table recreated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), AccountError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        Ok(())
    }

    #[instrument(skip(self, account), fields(name = %account.name))]
    pub async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let result = sqlx::query(
            "INSERT INTO accounts (name, email, address, phone_number, date_joined) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .execute(&self.pool)
        .await
        .map_err(AccountError::SqlxError)?;

        let id = result.last_insert_rowid();
        debug!(account_id = id, "Inserted account");
        Ok(Account::from_new(id, account))
    }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query("SELECT * FROM accounts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        rows.iter().map(account_from_row).collect()
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: i64) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        row.as_ref().map(account_from_row).transpose()
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query("SELECT * FROM accounts WHERE name = ? ORDER BY id")
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        rows.iter().map(account_from_row).collect()
    }

    /// Overwrite every field of an existing account. Returns `None` when no
    /// account has this id.
    #[instrument(skip(self, account))]
    pub async fn update(
        &self,
        id: i64,
        account: NewAccount,
    ) -> Result<Option<Account>, AccountError> {
        let result = sqlx::query(
            "UPDATE accounts SET name = ?, email = ?, address = ?, phone_number = ?, date_joined = ? WHERE id = ?",
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AccountError::SqlxError)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Account::from_new(id, account)))
    }

    /// Returns whether a row was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, AccountError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AccountError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(AccountError::SqlxError)?;
        row.try_get("total").map_err(AccountError::SqlxError)
    }
}

fn account_from_row(row: &SqliteRow) -> Result<Account, AccountError> {
    let date_joined: NaiveDate = row.try_get("date_joined").map_err(AccountError::SqlxError)?;
    Ok(Account {
        id: row.try_get("id").map_err(AccountError::SqlxError)?,
        name: row.try_get("name").map_err(AccountError::SqlxError)?,
        email: row.try_get("email").map_err(AccountError::SqlxError)?,
        address: row.try_get("address").map_err(AccountError::SqlxError)?,
        phone_number: row
            .try_get("phone_number")
            .map_err(AccountError::SqlxError)?,
        date_joined,
    })
}
