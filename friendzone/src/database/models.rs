//! Database models
//!
//! Rust structs representing database entities and request payloads.
//! All models use serde for serialization to API clients.

use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A contact the user tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub id: i64,
    pub name: String,
    /// `None` when never set; an empty list is a distinct stored state
    pub emails: Option<Vec<String>>,
    pub phones: Option<Vec<String>>,
    pub birthday: Option<NaiveDate>,
    pub last_contacted: Option<DateTime<Utc>>,
    pub keep_in_touch: bool,
}

/// Raw `friends` row; list columns hold JSON arrays
#[derive(Debug, FromRow)]
pub struct FriendRow {
    pub id: i64,
    pub name: String,
    pub emails: Option<String>,
    pub phones: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub last_contacted: Option<DateTime<Utc>>,
    pub keep_in_touch: bool,
}

impl TryFrom<FriendRow> for Friend {
    type Error = AppError;

    fn try_from(row: FriendRow) -> Result<Self> {
        Ok(Friend {
            id: row.id,
            name: row.name,
            emails: decode_list(row.emails.as_deref())?,
            phones: decode_list(row.phones.as_deref())?,
            birthday: row.birthday,
            last_contacted: row.last_contacted,
            keep_in_touch: row.keep_in_touch,
        })
    }
}

/// Encode an optional string list for storage, keeping `None` as SQL NULL
pub fn encode_list(list: Option<&[String]>) -> Result<Option<String>> {
    list.map(serde_json::to_string).transpose().map_err(Into::into)
}

fn decode_list(raw: Option<&str>) -> Result<Option<Vec<String>>> {
    raw.map(serde_json::from_str).transpose().map_err(Into::into)
}

/// A logged interaction with a friend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub friend_id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Friend detail including every note, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendWithNotes {
    #[serde(flatten)]
    pub friend: Friend,
    pub notes: Vec<Note>,
}

/// Entry in the global activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecentActivity {
    pub id: i64,
    pub friend_id: i64,
    pub friend_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Create friend request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFriendRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default = "default_keep_in_touch")]
    pub keep_in_touch: bool,
}

fn default_keep_in_touch() -> bool {
    true
}

impl CreateFriendRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emails: None,
            phones: None,
            birthday: None,
            keep_in_touch: true,
        }
    }
}

/// Update friend request
///
/// Nullable fields are double options: the outer `None` leaves the stored
/// value alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFriendRequest {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub emails: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub phones: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_contacted: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_in_touch: Option<bool>,
}

impl UpdateFriendRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// True when no field besides the id is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.emails.is_none()
            && self.phones.is_none()
            && self.birthday.is_none()
            && self.last_contacted.is_none()
            && self.keep_in_touch.is_none()
    }
}

/// Marks a key as present, so an explicit `null` becomes `Some(None)`
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Create note request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub friend_id: i64,
    pub text: String,
}

/// Delete friend outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
}

/// Lookup by id, used by the query string of `getFriendById` and body of `deleteFriend`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdInput {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdateFriendRequest =
            serde_json::from_str(r#"{"id": 1, "emails": null, "name": "Ann"}"#).unwrap();

        assert_eq!(req.emails, Some(None));
        assert_eq!(req.phones, None);
        assert_eq!(req.name.as_deref(), Some("Ann"));
        assert!(!req.is_empty());

        let bare: UpdateFriendRequest = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(bare.is_empty());
    }

    #[test]
    fn test_update_request_serializes_only_present_fields() {
        let mut req = UpdateFriendRequest::new(4);
        req.phones = Some(None);
        req.keep_in_touch = Some(false);

        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"id": 4, "phones": null, "keep_in_touch": false})
        );
    }

    #[test]
    fn test_create_request_defaults_keep_in_touch() {
        let req: CreateFriendRequest = serde_json::from_str(r#"{"name": "Bo"}"#).unwrap();

        assert!(req.keep_in_touch);
        assert!(req.emails.is_none());
    }

    #[test]
    fn test_friend_row_keeps_empty_list_distinct_from_null() {
        let row = FriendRow {
            id: 1,
            name: "Cy".to_string(),
            emails: Some("[]".to_string()),
            phones: None,
            birthday: None,
            last_contacted: None,
            keep_in_touch: true,
        };

        let friend = Friend::try_from(row).unwrap();

        assert_eq!(friend.emails, Some(vec![]));
        assert_eq!(friend.phones, None);
    }

    #[test]
    fn test_friend_with_notes_flattens_friend_fields() {
        let detail = FriendWithNotes {
            friend: Friend {
                id: 2,
                name: "Di".to_string(),
                emails: None,
                phones: Some(vec!["555".to_string()]),
                birthday: NaiveDate::from_ymd_opt(1990, 5, 15),
                last_contacted: None,
                keep_in_touch: false,
            },
            notes: vec![],
        };

        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["name"], "Di");
        assert_eq!(value["birthday"], "1990-05-15");
        assert_eq!(value["notes"], serde_json::json!([]));
    }
}
