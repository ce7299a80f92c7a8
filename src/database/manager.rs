use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const SAMPLES_DDL: &str = "CREATE TABLE IF NOT EXISTS samples (
    id      INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    card_id INTEGER NOT NULL,
    state   TEXT    NOT NULL,
    wts     BOOLEAN NOT NULL
)";

const WISHES_DDL: &str = "CREATE TABLE IF NOT EXISTS wishes (
    id      INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    card_id INTEGER NOT NULL
)";

static POOL: OnceCell<SqlitePool> = OnceCell::const_new();

/// Process-wide connection pool for the record store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Get the shared pool, opening the store and applying the schema on first use
    pub async fn pool() -> Result<&'static SqlitePool, StoreError> {
        POOL.get_or_try_init(Self::open).await
    }

    async fn open() -> Result<SqlitePool, StoreError> {
        let url = &config::config().database_url;

        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Self::init_schema(&pool).await?;

        info!("Opened record store at {}", url);
        Ok(pool)
    }

    /// Create the record collections, idempotently
    pub async fn init_schema(pool: &SqlitePool) -> Result<(), StoreError> {
        sqlx::query(SAMPLES_DDL).execute(pool).await?;
        sqlx::query(WISHES_DDL).execute(pool).await?;
        Ok(())
    }

    /// Acquire a connection held exclusively for the duration of one request.
    /// The pool reclaims it when the guard drops, on every exit path.
    pub async fn acquire() -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(Self::pool().await?.acquire().await?)
    }

    /// Pings the store to ensure connectivity
    pub async fn health_check() -> Result<(), StoreError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
