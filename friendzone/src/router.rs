//! Axum router construction.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::app::AppState;
use crate::commands;

/// Build the complete router with every remote procedure.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/healthcheck", get(commands::healthcheck))
        // Friends
        .route("/api/createFriend", post(commands::create_friend))
        .route("/api/getFriends", get(commands::get_friends))
        .route("/api/getFriendById", get(commands::get_friend_by_id))
        .route("/api/updateFriend", post(commands::update_friend))
        .route("/api/deleteFriend", post(commands::delete_friend))
        .route(
            "/api/getKeepInTouchFriends",
            get(commands::get_keep_in_touch_friends),
        )
        // Notes
        .route("/api/createNote", post(commands::create_note))
        .route(
            "/api/getRecentActivities",
            get(commands::get_recent_activities),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
