//! Persistence for friends and notes
//!
//! - `schema`: numbered migrations for the `friends` and `notes` tables
//! - `models`: rows, API payloads and request types
//! - `repository`: every SQL statement the services run

pub mod models;
pub mod repository;
pub mod schema;

pub use models::*;
pub use repository::Repository;
pub use schema::initialize_database;

use crate::config::{DB_BUSY_TIMEOUT, DB_MAX_CONNECTIONS};
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Open a pool on the database file with WAL and foreign keys enforced
async fn open_pool(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .busy_timeout(DB_BUSY_TIMEOUT)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Open the friendzone database, creating and migrating it as needed.
///
/// Migrations finish on a single connection before the shared pool opens.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    tracing::info!("Opening friendzone database at {:?}", db_path);

    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let migrator = open_pool(db_path, 1).await?;
    initialize_database(&migrator).await?;
    migrator.close().await;

    let pool = open_pool(db_path, DB_MAX_CONNECTIONS).await?;
    tracing::debug!("Database pool ready with {} connections", DB_MAX_CONNECTIONS);

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_pool_in_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("friends.db");

        let pool = create_pool(&db_path).await.unwrap();

        assert!(db_path.exists());
        assert_eq!(schema::schema_version(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("friends.db");

        let pool = create_pool(&db_path).await.unwrap();
        Repository::new(pool.clone())
            .create_friend(&CreateFriendRequest::named("Kept"))
            .await
            .unwrap();
        pool.close().await;

        let reopened = create_pool(&db_path).await.unwrap();
        let friends = Repository::new(reopened).list_friends().await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].name, "Kept");
    }
}
