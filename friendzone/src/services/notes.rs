//! Notes service
//!
//! Logged interactions with friends. Creating a note is also what marks a
//! friend as contacted.

use super::validation::require_text;
use crate::config::RECENT_ACTIVITY_LIMIT;
use crate::database::{CreateNoteRequest, Note, RecentActivity, Repository};
use crate::error::Result;
use chrono::Utc;

/// Service for managing notes
#[derive(Clone)]
pub struct NotesService {
    repo: Repository,
}

impl NotesService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a note stamped with the current time
    pub async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        require_text("Note text", &req.text)?;

        tracing::info!("Creating note for friend: {}", req.friend_id);

        let note = self.repo.create_note(&req, Utc::now()).await?;

        tracing::info!("Note created successfully: {}", note.id);

        Ok(note)
    }

    /// The most recent notes across all friends
    pub async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>> {
        self.repo.list_recent_activities(RECENT_ACTIVITY_LIMIT).await
    }
}
