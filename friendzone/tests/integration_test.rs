//! Integration tests for Friendzone
//!
//! These tests run the real router against an on-disk database and drive it
//! over HTTP, covering:
//! - Every remote procedure and its error statuses
//! - The recent activity cap
//! - A terminal client session against the live server

use friendzone::app::AppState;
use friendzone::client::state::FormTarget;
use friendzone::client::{App, CrmApi, HttpApi};
use friendzone::database::{
    create_pool, CreateFriendRequest, CreateNoteRequest, UpdateFriendRequest,
};
use friendzone::error::AppError;
use friendzone::router::build_router;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Helper to start a server on an ephemeral port backed by a fresh database
async fn start_server_url() -> (String, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(&db_path).await.unwrap();
    let router = build_router(AppState::new(pool));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), temp_dir)
}

async fn start_server() -> (HttpApi, TempDir) {
    let (base_url, temp_dir) = start_server_url().await;
    (HttpApi::new(base_url).unwrap(), temp_dir)
}

fn api_status(err: AppError) -> u16 {
    match err {
        AppError::Api { status, .. } => status,
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_healthcheck() {
    let (api, _temp) = start_server().await;

    let health = api.healthcheck().await.unwrap();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_friend_crud_over_http() {
    let (api, _temp) = start_server().await;

    let mut req = CreateFriendRequest::named("Alice Johnson");
    req.emails = Some(vec!["alice@example.com".to_string()]);
    req.phones = Some(vec!["555-0123".to_string()]);
    req.birthday = chrono::NaiveDate::from_ymd_opt(1990, 5, 15);
    let alice = api.create_friend(req).await.unwrap();

    assert!(alice.id > 0);
    assert!(alice.keep_in_touch);
    assert_eq!(alice.last_contacted, None);

    // Lists omitted stay null; an explicit empty list stays empty
    let bare = api
        .create_friend(CreateFriendRequest::named("Bare"))
        .await
        .unwrap();
    assert_eq!(bare.emails, None);
    assert_eq!(bare.phones, None);

    let mut empty = CreateFriendRequest::named("Empty");
    empty.emails = Some(vec![]);
    let empty = api.create_friend(empty).await.unwrap();
    assert_eq!(empty.emails, Some(vec![]));

    let friends = api.get_friends().await.unwrap();
    assert_eq!(friends.len(), 3);

    let detail = api.get_friend_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(detail.friend.name, "Alice Johnson");
    assert!(detail.notes.is_empty());

    let mut patch = UpdateFriendRequest::new(alice.id);
    patch.name = Some("Alice J.".to_string());
    patch.phones = Some(None);
    let updated = api.update_friend(patch).await.unwrap();
    assert_eq!(updated.name, "Alice J.");
    assert_eq!(updated.phones, None);
    assert_eq!(
        updated.emails,
        Some(vec!["alice@example.com".to_string()])
    );

    let deleted = api.delete_friend(alice.id).await.unwrap();
    assert!(deleted.success);
    assert!(api.get_friend_by_id(alice.id).await.unwrap().is_none());

    let again = api.delete_friend(alice.id).await.unwrap();
    assert!(!again.success);
}

#[tokio::test]
async fn test_error_statuses() {
    let (api, _temp) = start_server().await;

    let err = api
        .create_friend(CreateFriendRequest::named(""))
        .await
        .unwrap_err();
    assert_eq!(api_status(err), 400);

    // Whitespace still counts as a name
    let spaced = api
        .create_friend(CreateFriendRequest::named("   "))
        .await
        .unwrap();
    assert_eq!(spaced.name, "   ");

    let mut bad_email = CreateFriendRequest::named("Bad");
    bad_email.emails = Some(vec!["not-an-email".to_string()]);
    let err = api.create_friend(bad_email).await.unwrap_err();
    assert_eq!(api_status(err), 400);

    let mut patch = UpdateFriendRequest::new(9999);
    patch.name = Some("Ghost".to_string());
    let err = api.update_friend(patch).await.unwrap_err();
    assert_eq!(api_status(err), 404);

    let err = api
        .create_note(CreateNoteRequest {
            friend_id: 9999,
            text: "Orphan".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(api_status(err), 409);

    assert!(api.get_recent_activities().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (base_url, _temp) = start_server_url().await;
    let client = reqwest::Client::new();

    let malformed = [
        client
            .post(format!("{}/api/createFriend", base_url))
            .json(&serde_json::json!({})),
        client
            .post(format!("{}/api/createNote", base_url))
            .json(&serde_json::json!({"friend_id": 1})),
        client
            .post(format!("{}/api/createFriend", base_url))
            .json(&serde_json::json!({"name": "A", "emails": ["x@y.com", null]})),
        client
            .post(format!("{}/api/deleteFriend", base_url))
            .header("content-type", "application/json")
            .body("{not json"),
        client.get(format!("{}/api/getFriendById?id=abc", base_url)),
    ];

    for request in malformed {
        let response = request.send().await.unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap().starts_with("Validation error"));
    }
}

#[tokio::test]
async fn test_notes_and_feeds() {
    let (api, _temp) = start_server().await;

    let ann = api
        .create_friend(CreateFriendRequest::named("Ann"))
        .await
        .unwrap();
    let ben = api
        .create_friend(CreateFriendRequest::named("Ben"))
        .await
        .unwrap();
    let mut quiet = CreateFriendRequest::named("Quiet");
    quiet.keep_in_touch = false;
    api.create_friend(quiet).await.unwrap();

    // Never-contacted friends come first
    let keep = api.get_keep_in_touch_friends().await.unwrap();
    assert_eq!(
        keep.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![ann.id, ben.id]
    );

    let note = api
        .create_note(CreateNoteRequest {
            friend_id: ann.id,
            text: "Coffee".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(note.friend_id, ann.id);

    let detail = api.get_friend_by_id(ann.id).await.unwrap().unwrap();
    assert_eq!(detail.friend.last_contacted, Some(note.timestamp));
    assert_eq!(detail.notes.len(), 1);

    let keep = api.get_keep_in_touch_friends().await.unwrap();
    assert_eq!(
        keep.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![ben.id, ann.id]
    );

    for i in 0..60 {
        api.create_note(CreateNoteRequest {
            friend_id: ben.id,
            text: format!("Note {}", i),
        })
        .await
        .unwrap();
    }

    let activities = api.get_recent_activities().await.unwrap();
    assert_eq!(activities.len(), 50);
    assert_eq!(activities[0].text, "Note 59");
    assert_eq!(activities[0].friend_name, "Ben");
    assert!(activities
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[tokio::test]
async fn test_client_session_against_server() {
    let (api, _temp) = start_server().await;
    let mut app = App::new(api);

    assert!(app.load_all().await);
    assert!(app.state.friends.is_empty());

    app.open_add_friend();
    app.set_name(FormTarget::Add, "Dana");
    app.add_email(FormTarget::Add, "dana@example.com");
    assert!(app.submit_add_friend().await);
    assert_eq!(app.state.friends.len(), 1);

    let id = app.state.friends[0].id;
    assert!(app.select_friend(id).await);
    assert!(app.submit_note("Called about the trip").await);

    assert_eq!(app.state.recent_activities.len(), 1);
    assert_eq!(
        app.state.selected_friend.as_ref().unwrap().notes[0].text,
        "Called about the trip"
    );

    assert!(app.delete_friend(id).await);
    assert!(app.state.friends.is_empty());
    assert!(app.state.recent_activities.is_empty());
    assert!(app.api().get_friend_by_id(id).await.unwrap().is_none());
}
