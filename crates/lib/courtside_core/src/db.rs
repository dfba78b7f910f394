//! Connection pool lifecycle.
//!
//! One `Database` is created at startup, handed to the API as a
//! [`PgStore`](crate::store::PgStore), and closed explicitly on shutdown.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::info;

use crate::store::PgStore;

/// How long a request may wait for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while opening or migrating the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Owned handle to the PostgreSQL pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await?;
        info!(max_connections, "database pool opened");
        Ok(Self { pool })
    }

    /// Apply the SQL files under `courtside_core/migrations/`.
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Store facade sharing this pool.
    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }

    /// Close every connection. Clones of the pool become unusable.
    pub async fn close(self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
