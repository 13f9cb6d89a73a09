//! Friends service
//!
//! Business logic for friend records: validation before persistence,
//! detail views with notes, and the keep-in-touch priority list.

use super::validation::{require_text, validate_emails};
use crate::database::{
    CreateFriendRequest, DeleteResult, Friend, FriendWithNotes, Repository, UpdateFriendRequest,
};
use crate::error::Result;

/// Service for managing friends
#[derive(Clone)]
pub struct FriendsService {
    repo: Repository,
}

impl FriendsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a new friend
    pub async fn create_friend(&self, req: CreateFriendRequest) -> Result<Friend> {
        require_text("Name", &req.name)?;
        validate_emails(req.emails.as_deref())?;

        tracing::info!("Creating friend: {}", req.name);

        let friend = self.repo.create_friend(&req).await?;

        tracing::info!("Friend created successfully: {}", friend.id);

        Ok(friend)
    }

    /// List all friends
    pub async fn get_friends(&self) -> Result<Vec<Friend>> {
        self.repo.list_friends().await
    }

    /// Get a friend with all of their notes, or `None` for an unknown id
    pub async fn get_friend_by_id(&self, id: i64) -> Result<Option<FriendWithNotes>> {
        let Some(friend) = self.repo.get_friend(id).await? else {
            return Ok(None);
        };

        let notes = self.repo.list_notes_for_friend(id).await?;

        Ok(Some(FriendWithNotes { friend, notes }))
    }

    /// Update the fields present in the request
    pub async fn update_friend(&self, req: UpdateFriendRequest) -> Result<Friend> {
        if let Some(name) = &req.name {
            require_text("Name", name)?;
        }
        if let Some(emails) = &req.emails {
            validate_emails(emails.as_deref())?;
        }

        tracing::debug!("Updating friend: {}", req.id);

        let friend = self.repo.update_friend(&req).await?;

        tracing::debug!("Friend updated successfully: {}", friend.id);

        Ok(friend)
    }

    /// Delete a friend and their notes
    pub async fn delete_friend(&self, id: i64) -> Result<DeleteResult> {
        tracing::info!("Deleting friend: {}", id);

        let success = self.repo.delete_friend(id).await?;

        if success {
            tracing::info!("Friend deleted successfully: {}", id);
        } else {
            tracing::info!("No friend to delete with id: {}", id);
        }

        Ok(DeleteResult { success })
    }

    /// Friends to reach out to, never-contacted first, then stalest contact
    pub async fn get_keep_in_touch_friends(&self) -> Result<Vec<Friend>> {
        self.repo.list_keep_in_touch_friends().await
    }
}
