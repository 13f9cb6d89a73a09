//! Note-related commands
//!
//! Logging interactions and reading the activity feed.

use crate::app::AppState;
use crate::database::{CreateNoteRequest, Note, RecentActivity};
use crate::error::Result;
use axum::extract::State;
use axum::Json;

use super::extract::ApiJson;

/// Log an interaction with a friend
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateNoteRequest>,
) -> Result<Json<Note>> {
    state.notes_service.create_note(req).await.map(Json)
}

/// Newest notes across all friends
pub async fn get_recent_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentActivity>>> {
    state.notes_service.get_recent_activities().await.map(Json)
}
