use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;

/// Open (creating if missing) the rota database and bring its schema up to date.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool> {
    info!(url = %config.database_url, "opening rota database");

    // --- connection settings ---
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // --- pool ---
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    // --- tables ---
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// In-memory database with the schema applied. Exactly one connection that
/// is never recycled, since every SQLite memory connection is its own database.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
