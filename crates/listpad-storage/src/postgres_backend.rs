//! PostgreSQL listing store.
//!
//! Writes each listing as one row of the `listings` table. The table is
//! created on connect if it does not exist; no other schema management is
//! performed.
//!
//! Feature-gated behind `postgres-backend`. Uses `sqlx` with the Tokio
//! runtime for fully async operations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{LISTINGS_TABLE, ListingRecord, ListingStore, StoreError};

/// A listing store backed by PostgreSQL.
///
/// Thread-safe via `PgPool` (connection pool).
///
/// # Examples
///
/// ```no_run
/// # use listpad_storage::PostgresStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = PostgresStore::connect("postgres://localhost/listpad").await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PostgresStore {
    /// Connect to PostgreSQL and make sure the `listings` table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the connection or table creation
    /// fails.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connect {
                target: "[redacted]".to_owned(),
                reason: e.to_string(),
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS listings (\
                id             BIGSERIAL   PRIMARY KEY, \
                name           TEXT        NOT NULL, \
                website        TEXT        NOT NULL, \
                about          TEXT        NOT NULL, \
                contact_number TEXT        NOT NULL, \
                created_at     TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Connect {
            target: "[redacted]".to_owned(),
            reason: format!("table creation failed: {e}"),
        })?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl ListingStore for PostgresStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "postgres"
    }

    async fn insert(&self, record: &ListingRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO listings (name, website, about, contact_number) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&record.name)
        .bind(&record.website)
        .bind(&record.about)
        .bind(&record.contact_number)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Insert {
            table: LISTINGS_TABLE.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
