//! Relay endpoint tests against a stub backend.
//!
//! Each test spins up a throwaway backend on an ephemeral port that serves
//! a canned SSE response, then points a relay at it and reads the client
//! side of the bridge.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use futures::stream;
use pretty_assertions::assert_eq;

use nova_core::client::{ChatBackend, RelayClient};
use nova_core::protocol::{ChatRequest, ChatTurn};
use nova_core::store::ChatStore;
use nova_relay::server::{build_router, RelayState};

/// Serve `parts` as consecutive body chunks of an SSE response.
async fn spawn_backend(status: StatusCode, parts: Vec<&'static str>) -> String {
    let app = Router::new().route(
        "/sse/chat-completion",
        post(move || async move {
            let chunks = parts
                .iter()
                .map(|part| Ok::<_, Infallible>(Bytes::from_static(part.as_bytes())))
                .collect::<Vec<_>>();
            Response::builder()
                .status(status)
                .header(header::CONTENT_TYPE, "text/event-stream")
                .body(Body::from_stream(stream::iter(chunks)))
                .unwrap()
        }),
    );
    spawn_app(app).await
}

async fn spawn_relay(backend_url: String) -> String {
    let state = Arc::new(RelayState::new(backend_url));
    spawn_app(build_router(state)).await
}

async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_chat(relay_url: &str, body: String) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{relay_url}/api/chat"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .unwrap()
}

fn hello_request() -> String {
    serde_json::to_string(&ChatRequest::new(vec![ChatTurn::user("hi")])).unwrap()
}

#[tokio::test]
async fn reframes_sse_into_json_lines() {
    let backend = spawn_backend(
        StatusCode::OK,
        vec![
            "data: {\"type\":\"chunk\",\"content\":\"Hel\",\"thread_id\":\"t1\"}\n\n",
            "data: {\"type\":\"chunk\",\"content\":\"lo\"}\n\n",
        ],
    )
    .await;
    let relay = spawn_relay(backend).await;

    let response = post_chat(&relay, hello_request()).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let text = response.text().await.unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["content"], "Hel");
    assert_eq!(lines[0]["thread_id"], "t1");
    assert_eq!(lines[1]["content"], "lo");
}

#[tokio::test]
async fn event_split_across_reads_is_reassembled() {
    let backend = spawn_backend(
        StatusCode::OK,
        vec![
            "data: {\"type\":\"chunk\",\"con",
            "tent\":\"He",
            "llo\"}\n\n",
        ],
    )
    .await;
    let relay = spawn_relay(backend).await;

    let text = post_chat(&relay, hello_request()).await.text().await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event["content"], "Hello");
}

#[tokio::test]
async fn trailing_event_without_newline_is_flushed() {
    let backend = spawn_backend(
        StatusCode::OK,
        vec!["data: {\"type\":\"chunk\",\"content\":\"tail\"}"],
    )
    .await;
    let relay = spawn_relay(backend).await;

    let text = post_chat(&relay, hello_request()).await.text().await.unwrap();
    let event: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(event["content"], "tail");
}

#[tokio::test]
async fn unparseable_payloads_are_dropped_not_fatal() {
    let backend = spawn_backend(
        StatusCode::OK,
        vec![
            "data: not json at all\n\n",
            "data: {\"type\":\"chunk\",\"content\":\"ok\"}\n\n",
        ],
    )
    .await;
    let relay = spawn_relay(backend).await;

    let text = post_chat(&relay, hello_request()).await.text().await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event["content"], "ok");
}

#[tokio::test]
async fn backend_failure_maps_to_generic_error() {
    let backend = spawn_backend(StatusCode::SERVICE_UNAVAILABLE, vec!["busy"]).await;
    let relay = spawn_relay(backend).await;

    let response = post_chat(&relay, hello_request()).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to connect to chat service");
}

#[tokio::test]
async fn unreachable_backend_maps_to_generic_error() {
    // Nothing listens here
    let relay = spawn_relay("http://127.0.0.1:1".to_string()).await;

    let response = post_chat(&relay, hello_request()).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to connect to chat service");
}

#[tokio::test]
async fn invalid_request_body_maps_to_generic_error() {
    let backend = spawn_backend(StatusCode::OK, vec![]).await;
    let relay = spawn_relay(backend).await;

    let response = post_chat(&relay, "not json".to_string()).await;
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn round_trip_through_client_and_store() {
    let backend = spawn_backend(
        StatusCode::OK,
        vec![
            "data: {\"type\":\"chunk\",\"content\":\"Hel\",\"thread_id\":\"t1\"}\n\n",
            "data: {\"type\":\"chunk\",\"content\":\"lo\"}\n\n",
        ],
    )
    .await;
    let relay = spawn_relay(backend).await;

    let client = RelayClient::new(relay);
    assert!(client.health_check().await);

    let mut store = ChatStore::new(client);
    store.create_session();
    store.send_message("test").await;

    let session = store.active_session().unwrap();
    assert_eq!(session.message_count(), 2);
    assert_eq!(session.messages[0].content, "test");
    assert_eq!(session.messages[1].content, "Hello");
    assert_eq!(session.thread_id.as_deref(), Some("t1"));
    assert!(!store.is_loading());
}
