//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through AppState.

use crate::config::Config;
use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{FriendsService, NotesService};
use sqlx::SqlitePool;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub friends_service: FriendsService,
    pub notes_service: NotesService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let repo = Repository::new(pool);
        Self {
            friends_service: FriendsService::new(repo.clone()),
            notes_service: NotesService::new(repo),
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: &Config) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Database path: {:?}", config.db_path);

    let pool = create_pool(&config.db_path).await?;
    let state = AppState::new(pool);

    tracing::info!("Application initialized successfully");

    Ok(state)
}
