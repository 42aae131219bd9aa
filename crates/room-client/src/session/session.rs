//! A single room session
//!
//! Owns the local room state (a mirror of the server's room value) and the
//! channel used to send frames back over the WebSocket. Passed by
//! reference into handlers; there is no global mutable state.

use parking_lot::RwLock;
use room_core::{patch, PatchError, PatchOp};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connection is open
    Connected,
    /// Connection is closed; no further sends or state changes
    Disconnected,
}

/// A single room session
pub struct Session {
    /// Unique session ID (local, for log correlation)
    id: String,

    /// Local mirror of the room state; unset until the first snapshot
    room: RwLock<Option<Value>>,

    /// Current connection state
    state: RwLock<ConnectionState>,

    /// Channel to send frames to the WebSocket
    outbound: mpsc::Sender<Message>,
}

impl Session {
    /// Create a new session around an outbound channel
    pub fn new(outbound: mpsc::Sender<Message>) -> Arc<Self> {
        Arc::new(Self {
            id: Self::generate_id(),
            room: RwLock::new(None),
            state: RwLock::new(ConnectionState::Connected),
            outbound,
        })
    }

    /// Generate a new session ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Snapshot of the current room state (`None` before the first snapshot)
    #[must_use]
    pub fn room(&self) -> Option<Value> {
        self.room.read().clone()
    }

    /// Replace the room state wholesale
    pub fn replace_room(&self, value: Value) {
        *self.room.write() = Some(value);
    }

    /// Apply a patch to the room state
    ///
    /// The op sequence is applied transactionally: on any failure the
    /// prior state is kept. A room that has not received a snapshot yet
    /// is patched as JSON `null`.
    pub fn apply_patch(&self, ops: &[PatchOp]) -> Result<(), PatchError> {
        let mut room = self.room.write();
        let current = room.clone().unwrap_or(Value::Null);
        let next = patch::apply(&current, ops)?;
        *room = Some(next);
        Ok(())
    }

    /// Get the current connection state
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Set the connection state
    pub fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    /// Whether the session is still connected
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Send a text frame on the connection
    ///
    /// Fails once the outbound channel is closed (connection torn down).
    pub async fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.outbound
            .send(Message::text(text))
            .await
            .map_err(|_| SendError::Closed)
    }
}

/// Error sending on the session's outbound channel
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("outbound channel closed")]
    Closed,
}
