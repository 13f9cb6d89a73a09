//! Remote procedures exposed to API clients
//!
//! This module organizes handlers into logical submodules:
//! - `friends`: Friend CRUD operations and the keep-in-touch list
//! - `notes`: Note creation and the recent activity feed
//!
//! Queries are served over `GET`, mutations over `POST` with a JSON body.

pub mod extract;
pub mod friends;
pub mod notes;

use axum::Json;
use chrono::{DateTime, Utc};

// Re-export all handlers for convenient registration in the router
pub use friends::*;
pub use notes::*;

// ===== General Commands =====

/// Liveness probe
pub async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

/// Healthcheck response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
