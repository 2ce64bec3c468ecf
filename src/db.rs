//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating and managing a PostgreSQL connection pool
//! - Running database migrations automatically
//! - Building the process-wide document store at startup

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::config::{Config, StorageBackend};
use crate::store::{
    DocumentStore, StoreError, memory::MemoryStore, postgres::PgDocumentStore,
};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// The pool is created once at startup and shared by every request through
/// the document store. It is never reconnected per request.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each one runs only once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}

/// Build the document store selected by configuration.
///
/// For PostgreSQL this connects, migrates, and pings once so a bad
/// deployment fails at startup instead of on the first request.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url()?, config.db_max_connections).await?;
            tracing::info!("Database pool created");

            run_migrations(&pool).await.map_err(StoreError::from)?;
            tracing::info!("Database migrations complete");

            let store = PgDocumentStore::new(pool);
            store.ping().await?;
            tracing::info!("Pinged database, connection is healthy");

            Ok(Arc::new(store))
        }
    }
}
