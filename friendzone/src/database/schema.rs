//! Friend and note schema, applied as numbered migrations
//!
//! Each migration runs in its own transaction and is recorded in the
//! `migrations` table, so reopening an existing database only applies what
//! is new.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;

/// One schema step
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "friends and notes tables",
    sql: include_str!("migrations/001_initial_schema.sql"),
}];

/// Bring the friends/notes schema up to the latest migration
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    // Note cascade on friend delete needs this per connection
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    let from = schema_version(pool).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();

    if pending.is_empty() {
        tracing::debug!("Friendzone schema is current at version {}", from);
        return Ok(());
    }

    for migration in pending {
        tracing::info!(
            "Migrating schema to version {} ({})",
            migration.version,
            migration.name
        );

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.sql).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO migrations (version) VALUES (?)")
            .bind(migration.version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
    }

    tracing::info!(
        "Friendzone schema ready at version {}",
        schema_version(pool).await?
    );
    Ok(())
}

/// Highest applied migration, 0 for a fresh database
pub async fn schema_version(pool: &SqlitePool) -> Result<i64> {
    let version: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_database() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();

        assert_eq!(schema_version(&pool).await.unwrap(), 1);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name IN ('friends', 'notes')
             ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["friends", "notes"]);
    }

    #[tokio::test]
    async fn test_cascade_removes_notes() {
        let pool = memory_pool().await;
        initialize_database(&pool).await.unwrap();

        sqlx::query("INSERT INTO friends (name) VALUES ('Ivy')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO notes (friend_id, text, timestamp)
             VALUES (1, 'hi', '2024-01-01T00:00:00+00:00')",
        )
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("DELETE FROM friends WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let notes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(notes, 0);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();
        initialize_database(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = memory_pool().await;

        initialize_database(&pool).await.unwrap();

        let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(foreign_keys, 1);
    }
}
