// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use tracing::{debug, info};

use crate::error::Result;

/// Open (and create if needed) the SQLite database and bring its schema up to date.
///
/// The returned pool is the connection provider handed to the store; every
/// store operation borrows one connection from it for its own duration.
///
/// In-memory databases live inside a single connection, so their pool is
/// always capped at one.
pub async fn create_db_pool(db_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let max_connections = if is_in_memory(db_url) {
        1
    } else {
        max_connections.max(1)
    };

    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!(db_url, "Creating database");
        Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;

    migrate(&pool).await?;
    debug!(db_url, "Database ready");

    Ok(pool)
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub async fn create_test_pool() -> Result<SqlitePool> {
    create_db_pool("sqlite::memory:", 1).await
}
