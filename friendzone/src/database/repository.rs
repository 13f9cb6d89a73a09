//! Repository layer for database operations
//!
//! This module provides the friend and note queries. Note creation and the
//! matching `last_contacted` update share one transaction.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const FRIEND_COLUMNS: &str =
    "id, name, emails, phones, birthday, last_contacted, keep_in_touch";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new friend; `last_contacted` always starts out null
    pub async fn create_friend(&self, req: &CreateFriendRequest) -> Result<Friend> {
        let row = sqlx::query_as::<_, FriendRow>(&format!(
            r#"
            INSERT INTO friends (name, emails, phones, birthday, last_contacted, keep_in_touch)
            VALUES (?, ?, ?, ?, NULL, ?)
            RETURNING {FRIEND_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(encode_list(req.emails.as_deref())?)
        .bind(encode_list(req.phones.as_deref())?)
        .bind(req.birthday)
        .bind(req.keep_in_touch)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created friend: {}", row.id);
        row.try_into()
    }

    /// Get a friend by ID
    pub async fn get_friend(&self, id: i64) -> Result<Option<Friend>> {
        let row = sqlx::query_as::<_, FriendRow>(&format!(
            "SELECT {FRIEND_COLUMNS} FROM friends WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Friend::try_from).transpose()
    }

    /// List all friends in storage order
    pub async fn list_friends(&self) -> Result<Vec<Friend>> {
        let rows = sqlx::query_as::<_, FriendRow>(&format!("SELECT {FRIEND_COLUMNS} FROM friends"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Friend::try_from).collect()
    }

    /// Friends flagged keep-in-touch, least recently contacted first
    pub async fn list_keep_in_touch_friends(&self) -> Result<Vec<Friend>> {
        let rows = sqlx::query_as::<_, FriendRow>(&format!(
            r#"
            SELECT {FRIEND_COLUMNS} FROM friends
            WHERE keep_in_touch = 1
            ORDER BY last_contacted ASC NULLS FIRST, id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Friend::try_from).collect()
    }

    /// Update only the fields present in the request
    pub async fn update_friend(&self, req: &UpdateFriendRequest) -> Result<Friend> {
        if req.is_empty() {
            return self
                .get_friend(req.id)
                .await?
                .ok_or(AppError::FriendNotFound(req.id));
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE friends SET ");
        {
            let mut fields = builder.separated(", ");

            if let Some(name) = &req.name {
                fields.push("name = ").push_bind_unseparated(name.clone());
            }

            if let Some(emails) = &req.emails {
                fields
                    .push("emails = ")
                    .push_bind_unseparated(encode_list(emails.as_deref())?);
            }

            if let Some(phones) = &req.phones {
                fields
                    .push("phones = ")
                    .push_bind_unseparated(encode_list(phones.as_deref())?);
            }

            if let Some(birthday) = req.birthday {
                fields.push("birthday = ").push_bind_unseparated(birthday);
            }

            if let Some(last_contacted) = req.last_contacted {
                fields
                    .push("last_contacted = ")
                    .push_bind_unseparated(last_contacted);
            }

            if let Some(keep_in_touch) = req.keep_in_touch {
                fields
                    .push("keep_in_touch = ")
                    .push_bind_unseparated(keep_in_touch);
            }
        }

        builder.push(" WHERE id = ").push_bind(req.id);
        builder.push(" RETURNING ").push(FRIEND_COLUMNS);

        let row = builder
            .build_query_as::<FriendRow>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::FriendNotFound(req.id))?;

        tracing::debug!("Updated friend: {}", req.id);
        row.try_into()
    }

    /// Delete a friend; notes go with it through the cascading foreign key.
    /// Returns whether a row was removed.
    pub async fn delete_friend(&self, id: i64) -> Result<bool> {
        let rows = sqlx::query("DELETE FROM friends WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Deleted friend {} ({} row(s))", id, rows);
        Ok(rows > 0)
    }

    /// Insert a note and stamp its friend's `last_contacted` with the same time
    pub async fn create_note(
        &self,
        req: &CreateNoteRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<Note> {
        let mut tx = self.pool.begin().await?;

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (friend_id, text, timestamp)
            VALUES (?, ?, ?)
            RETURNING id, friend_id, text, timestamp
            "#,
        )
        .bind(req.friend_id)
        .bind(&req.text)
        .bind(timestamp)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| note_insert_error(e, req.friend_id))?;

        sqlx::query("UPDATE friends SET last_contacted = ? WHERE id = ?")
            .bind(timestamp)
            .bind(req.friend_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!("Created note: {} for friend: {}", note.id, note.friend_id);
        Ok(note)
    }

    /// List notes for a friend, newest first
    pub async fn list_notes_for_friend(&self, friend_id: i64) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, friend_id, text, timestamp FROM notes
            WHERE friend_id = ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .bind(friend_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    /// Newest notes across all friends, joined with the friend's current name
    pub async fn list_recent_activities(&self, limit: i64) -> Result<Vec<RecentActivity>> {
        let activities = sqlx::query_as::<_, RecentActivity>(
            r#"
            SELECT n.id, n.friend_id, f.name AS friend_name, n.text, n.timestamp
            FROM notes n
            INNER JOIN friends f ON f.id = n.friend_id
            ORDER BY n.timestamp DESC, n.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}

fn note_insert_error(err: sqlx::Error, friend_id: i64) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::ForeignKeyViolation { friend_id }
        }
        other => other.into(),
    }
}
