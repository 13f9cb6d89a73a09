//! Friend-related commands
//!
//! CRUD operations for friends and the keep-in-touch list.

use crate::app::AppState;
use crate::database::{
    CreateFriendRequest, DeleteResult, Friend, FriendWithNotes, IdInput, UpdateFriendRequest,
};
use crate::error::Result;
use axum::extract::State;
use axum::Json;

use super::extract::{ApiJson, ApiQuery};

/// Create a new friend
pub async fn create_friend(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateFriendRequest>,
) -> Result<Json<Friend>> {
    state.friends_service.create_friend(req).await.map(Json)
}

/// List all friends
pub async fn get_friends(State(state): State<AppState>) -> Result<Json<Vec<Friend>>> {
    state.friends_service.get_friends().await.map(Json)
}

/// Get a friend with notes; responds with `null` for an unknown id
pub async fn get_friend_by_id(
    State(state): State<AppState>,
    ApiQuery(input): ApiQuery<IdInput>,
) -> Result<Json<Option<FriendWithNotes>>> {
    state
        .friends_service
        .get_friend_by_id(input.id)
        .await
        .map(Json)
}

/// Update the fields present in the body
pub async fn update_friend(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateFriendRequest>,
) -> Result<Json<Friend>> {
    state.friends_service.update_friend(req).await.map(Json)
}

/// Delete a friend and their notes
pub async fn delete_friend(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<IdInput>,
) -> Result<Json<DeleteResult>> {
    state.friends_service.delete_friend(input.id).await.map(Json)
}

/// Friends flagged keep-in-touch, stalest first
pub async fn get_keep_in_touch_friends(
    State(state): State<AppState>,
) -> Result<Json<Vec<Friend>>> {
    state
        .friends_service
        .get_keep_in_touch_friends()
        .await
        .map(Json)
}
