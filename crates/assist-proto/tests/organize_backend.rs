//! Drives `OrganizeClient` against an in-process mock of the organize backend.
//!
//! Run with: cargo test -p assist-proto --test organize_backend

use std::sync::{Arc, Mutex};

use assist_proto::client::OrganizeClient;
use assist_proto::config::BackendConfig;
use assist_proto::error::RequestError;
use assist_proto::model::{GenreEntry, InputValues, DEFAULT_NESTED_GENRE_KEY};
use assist_proto::request::SubmissionRequest;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Canned answer plus a log of every request the mock received.
#[derive(Clone)]
struct MockBackend {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn organize(
    State(mock): State<MockBackend>,
    Path(kind): Path<String>,
    Json(payload): Json<Value>,
) -> (StatusCode, String) {
    mock.received
        .lock()
        .unwrap()
        .push((format!("/organize/{}", kind), payload));
    (mock.status, mock.body.clone())
}

/// Start the mock on an ephemeral port; returns its base URL and request log.
async fn spawn_backend(
    status: StatusCode,
    body: &str,
) -> (String, Arc<Mutex<Vec<(String, Value)>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let mock = MockBackend {
        status,
        body: body.to_string(),
        received: received.clone(),
    };
    let app = Router::new()
        .route("/organize/:kind", post(organize))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), received)
}

fn client_for(base_url: &str) -> OrganizeClient {
    OrganizeClient::new(
        BackendConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        },
        DEFAULT_NESTED_GENRE_KEY,
    )
    .unwrap()
}

fn request(inputs: InputValues) -> SubmissionRequest {
    SubmissionRequest::from_inputs(&inputs).expect("inputs should not be empty")
}

#[tokio::test]
async fn playlist_link_posts_to_playlist_endpoint() {
    let (base, received) = spawn_backend(StatusCode::OK, r#"{"rock":["SongA","SongB"]}"#).await;
    let req = request(InputValues {
        link: "https://open.spotify.com/playlist/X".into(),
        ..Default::default()
    });

    let result = client_for(&base).organize(&req).await.unwrap();

    assert_eq!(
        result.get("rock"),
        Some(&GenreEntry::Flat(vec!["SongA".into(), "SongB".into()]))
    );
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "/organize/playlist");
    assert_eq!(
        received[0].1,
        json!({"link": "https://open.spotify.com/playlist/X"})
    );
}

#[tokio::test]
async fn typed_text_posts_to_text_endpoint() {
    let (base, received) = spawn_backend(
        StatusCode::OK,
        r#"{"organized songs":[["Indie",["SongC"]]]}"#,
    )
    .await;
    let req = request(InputValues {
        text: "Song - Artist".into(),
        ..Default::default()
    });

    let result = client_for(&base).organize(&req).await.unwrap();

    assert_eq!(
        result.get("organized songs"),
        Some(&GenreEntry::Nested(vec![("Indie".into(), vec!["SongC".into()])]))
    );
    let received = received.lock().unwrap();
    assert_eq!(received[0].0, "/organize/text");
    assert_eq!(received[0].1, json!({"text": "Song - Artist"}));
}

#[tokio::test]
async fn pair_list_response_is_understood() {
    let (base, _) = spawn_backend(
        StatusCode::OK,
        r#"[["Synthpop",["Midnight City - M83"]],["Unknown (Text Input)",["???"]]]"#,
    )
    .await;
    let req = request(InputValues {
        file_content: "Midnight City - M83\n???\n".into(),
        ..Default::default()
    });

    let result = client_for(&base).organize(&req).await.unwrap();
    let genres: Vec<&str> = result.genres().map(|(g, _)| g).collect();
    assert_eq!(genres, vec!["Synthpop", "Unknown (Text Input)"]);
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let (base, _) = spawn_backend(StatusCode::BAD_REQUEST, r#"{"error":"bad format"}"#).await;
    let req = request(InputValues {
        text: "???".into(),
        ..Default::default()
    });

    let err = client_for(&base).organize(&req).await.unwrap_err();
    assert_eq!(
        err,
        RequestError::Http {
            status: 400,
            message: "bad format".into(),
        }
    );
    assert!(err.to_string().contains("bad format"));
}

#[tokio::test]
async fn missing_error_field_falls_back_to_status_text() {
    let (base, _) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "<h1>boom</h1>").await;
    let req = request(InputValues {
        text: "x".into(),
        ..Default::default()
    });

    let err = client_for(&base).organize(&req).await.unwrap_err();
    assert_eq!(
        err,
        RequestError::Http {
            status: 500,
            message: "Internal Server Error".into(),
        }
    );
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let (base, _) = spawn_backend(StatusCode::OK, r#"{"rock":"not a list"}"#).await;
    let req = request(InputValues {
        text: "x".into(),
        ..Default::default()
    });

    let err = client_for(&base).organize(&req).await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let req = request(InputValues {
        text: "x".into(),
        ..Default::default()
    });
    let err = client_for(&format!("http://{}", addr))
        .organize(&req)
        .await
        .unwrap_err();
    assert!(err.is_transport(), "got {:?}", err);
    assert!(err.to_string().starts_with("Failed to connect to backend"));
}
