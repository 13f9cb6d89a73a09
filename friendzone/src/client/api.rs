//! API backends for the terminal UI
//!
//! [`CrmApi`] mirrors the server's remote procedures one method per
//! operation. [`HttpApi`] talks to a running server; [`LocalApi`] calls the
//! services in-process against a local database.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app::AppState;
use crate::commands::HealthStatus;
use crate::config::CLIENT_REQUEST_TIMEOUT;
use crate::database::{
    CreateFriendRequest, CreateNoteRequest, DeleteResult, Friend, FriendWithNotes, IdInput, Note,
    RecentActivity, UpdateFriendRequest,
};
use crate::error::{AppError, Result};

/// Remote procedure surface used by the UI
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn healthcheck(&self) -> Result<HealthStatus>;

    async fn create_friend(&self, req: CreateFriendRequest) -> Result<Friend>;

    async fn get_friends(&self) -> Result<Vec<Friend>>;

    /// `Ok(None)` for an unknown id
    async fn get_friend_by_id(&self, id: i64) -> Result<Option<FriendWithNotes>>;

    async fn update_friend(&self, req: UpdateFriendRequest) -> Result<Friend>;

    async fn delete_friend(&self, id: i64) -> Result<DeleteResult>;

    async fn create_note(&self, req: CreateNoteRequest) -> Result<Note>;

    async fn get_keep_in_touch_friends(&self) -> Result<Vec<Friend>>;

    async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>>;
}

/// HTTP client for a FriendZone server
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(CLIENT_REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/api/{}", self.base_url, procedure)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        procedure: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!("query {}", procedure);

        let response = self
            .client
            .get(self.url(procedure))
            .query(params)
            .send()
            .await?;

        decode(response).await
    }

    async fn mutate<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        procedure: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("mutation {}", procedure);

        let response = self
            .client
            .post(self.url(procedure))
            .json(body)
            .send()
            .await?;

        decode(response).await
    }
}

/// Turn a response into `T`, or into [`AppError::Api`] for non-2xx statuses
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(text);

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CrmApi for HttpApi {
    async fn healthcheck(&self) -> Result<HealthStatus> {
        self.query("healthcheck", &[]).await
    }

    async fn create_friend(&self, req: CreateFriendRequest) -> Result<Friend> {
        self.mutate("createFriend", &req).await
    }

    async fn get_friends(&self) -> Result<Vec<Friend>> {
        self.query("getFriends", &[]).await
    }

    async fn get_friend_by_id(&self, id: i64) -> Result<Option<FriendWithNotes>> {
        self.query("getFriendById", &[("id", id.to_string())]).await
    }

    async fn update_friend(&self, req: UpdateFriendRequest) -> Result<Friend> {
        self.mutate("updateFriend", &req).await
    }

    async fn delete_friend(&self, id: i64) -> Result<DeleteResult> {
        self.mutate("deleteFriend", &IdInput { id }).await
    }

    async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        self.mutate("createNote", &req).await
    }

    async fn get_keep_in_touch_friends(&self) -> Result<Vec<Friend>> {
        self.query("getKeepInTouchFriends", &[]).await
    }

    async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>> {
        self.query("getRecentActivities", &[]).await
    }
}

/// In-process backend calling the services directly
#[derive(Clone)]
pub struct LocalApi {
    state: AppState,
}

impl LocalApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CrmApi for LocalApi {
    async fn healthcheck(&self) -> Result<HealthStatus> {
        Ok(crate::commands::healthcheck().await.0)
    }

    async fn create_friend(&self, req: CreateFriendRequest) -> Result<Friend> {
        self.state.friends_service.create_friend(req).await
    }

    async fn get_friends(&self) -> Result<Vec<Friend>> {
        self.state.friends_service.get_friends().await
    }

    async fn get_friend_by_id(&self, id: i64) -> Result<Option<FriendWithNotes>> {
        self.state.friends_service.get_friend_by_id(id).await
    }

    async fn update_friend(&self, req: UpdateFriendRequest) -> Result<Friend> {
        self.state.friends_service.update_friend(req).await
    }

    async fn delete_friend(&self, id: i64) -> Result<DeleteResult> {
        self.state.friends_service.delete_friend(id).await
    }

    async fn create_note(&self, req: CreateNoteRequest) -> Result<Note> {
        self.state.notes_service.create_note(req).await
    }

    async fn get_keep_in_touch_friends(&self) -> Result<Vec<Friend>> {
        self.state.friends_service.get_keep_in_touch_friends().await
    }

    async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>> {
        self.state.notes_service.get_recent_activities().await
    }
}
