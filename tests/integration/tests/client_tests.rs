//! Client integration tests
//!
//! Each test spins up an in-process scripted WebSocket server and drives
//! a real client session against it.
//!
//! Run with: cargo test -p integration-tests --test client_tests

use futures_util::{SinkExt, StreamExt};
use integration_tests::{wait_for_room, ScriptedServer, ServerWs};
use room_client::{ConnectionState, RoomClient};
use room_core::LIVENESS_PAYLOAD;
use serde_json::json;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

const WAIT: Duration = Duration::from_secs(2);

fn text(value: serde_json::Value) -> Message {
    Message::text(value.to_string())
}

/// Keep the connection open, consuming client frames (heartbeats)
async fn hold_open(mut ws: ServerWs) {
    while ws.next().await.is_some() {}
}

// ============================================================================
// State reduction
// ============================================================================

#[tokio::test]
async fn test_room_snapshot_replaces_state() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"a": 1, "users": ["alice"]}})))
            .await
            .unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(
        wait_for_room(
            client.session(),
            &json!({"a": 1, "users": ["alice"]}),
            WAIT
        )
        .await
    );
}

#[tokio::test]
async fn test_patch_applies_to_state() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"a": 1}}))).await.unwrap();
        ws.send(text(
            json!({"patch": [{"op": "replace", "path": "/a", "value": 2}]}),
        ))
        .await
        .unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(wait_for_room(client.session(), &json!({"a": 2}), WAIT).await);
}

#[tokio::test]
async fn test_patches_apply_in_delivery_order() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"n": 0, "xs": []}}))).await.unwrap();
        ws.send(text(json!({"patch": [{"op": "replace", "path": "/n", "value": 1}]})))
            .await
            .unwrap();
        ws.send(text(json!({"patch": [{"op": "add", "path": "/xs/-", "value": "a"}]})))
            .await
            .unwrap();
        ws.send(text(json!({"patch": [
            {"op": "test", "path": "/n", "value": 1},
            {"op": "add", "path": "/xs/-", "value": "b"},
            {"op": "move", "from": "/n", "path": "/m"}
        ]})))
        .await
        .unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(wait_for_room(client.session(), &json!({"m": 1, "xs": ["a", "b"]}), WAIT).await);
}

#[tokio::test]
async fn test_failed_test_op_keeps_prior_state() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"a": 1}}))).await.unwrap();
        // precondition fails; the whole patch must be dropped
        ws.send(text(json!({"patch": [
            {"op": "test", "path": "/a", "value": 99},
            {"op": "replace", "path": "/a", "value": 3}
        ]})))
        .await
        .unwrap();
        // the session must still be reducing afterwards
        ws.send(text(
            json!({"patch": [{"op": "replace", "path": "/a", "value": 2}]}),
        ))
        .await
        .unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(wait_for_room(client.session(), &json!({"a": 2}), WAIT).await);
    // the rejected replace never landed
    assert_ne!(client.session().room(), Some(json!({"a": 3})));
}

#[tokio::test]
async fn test_server_error_leaves_state_unchanged() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"a": 1}}))).await.unwrap();
        ws.send(text(json!({"error": "room is read-only"})))
            .await
            .unwrap();
        ws.send(text(
            json!({"patch": [{"op": "add", "path": "/b", "value": 2}]}),
        ))
        .await
        .unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(wait_for_room(client.session(), &json!({"a": 1, "b": 2}), WAIT).await);
}

#[tokio::test]
async fn test_malformed_and_unrecognized_frames_do_not_kill_session() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(Message::text("{room")).await.unwrap();
        ws.send(text(json!({"presence": ["alice"]}))).await.unwrap();
        ws.send(text(json!({"room": {"a": 1}}))).await.unwrap();
        hold_open(ws).await;
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();

    assert!(wait_for_room(client.session(), &json!({"a": 1}), WAIT).await);
    assert!(client.session().is_connected());
}

// ============================================================================
// Connection lifecycle
// ============================================================================

#[tokio::test]
async fn test_connects_to_room_path() {
    let server = ScriptedServer::spawn_on_path("/ws/lobby", hold_open)
        .await
        .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();
    assert!(client.session().is_connected());
}

#[tokio::test]
async fn test_connection_refused() {
    let server = ScriptedServer::spawn(hold_open).await.unwrap();
    let mut config = server.client_config("lobby", 30_000);
    // nothing listens on port 1 locally
    config.server.port = 1;

    assert!(RoomClient::connect(&config).await.is_err());
}

#[tokio::test]
async fn test_clean_close_ends_session() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        ws.send(text(json!({"room": {"a": 1}}))).await.unwrap();
        ws.close(None).await.ok();
        while ws.next().await.is_some() {}
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 30_000))
        .await
        .unwrap();
    let session = client.session().clone();

    client.closed().await.unwrap();
    assert_eq!(session.state(), ConnectionState::Disconnected);
    server.finished().await.unwrap();
}

// ============================================================================
// Heartbeat
// ============================================================================

#[tokio::test]
async fn test_heartbeat_liveness_then_silence_after_close() {
    let server = ScriptedServer::spawn(|mut ws| async move {
        // liveness at t~0 and then on the interval
        let mut seen = 0;
        while seen < 3 {
            match ws.next().await {
                Some(Ok(Message::Text(t))) => {
                    assert_eq!(t, LIVENESS_PAYLOAD);
                    seen += 1;
                }
                Some(Ok(_)) => {}
                other => panic!("connection ended early: {other:?}"),
            }
        }

        ws.close(None).await.ok();

        // cancellation takes effect within one interval: at most one
        // in-flight liveness frame may still arrive
        let mut trailing = 0;
        while let Some(Ok(msg)) = ws.next().await {
            if matches!(msg, Message::Text(_)) {
                trailing += 1;
            }
        }
        assert!(trailing <= 1, "heartbeat kept firing after close: {trailing}");
    })
    .await
    .unwrap();

    let client = RoomClient::connect(&server.client_config("lobby", 100))
        .await
        .unwrap();

    client.closed().await.unwrap();
    server.finished().await.unwrap();
}
