//! Server message format
//!
//! Every inbound text frame is a JSON object carrying exactly one of
//! `room`, `patch`, or `error`. When a frame carries more than one, the
//! precedence is `room` > `patch` > `error`; a frame carrying none is an
//! unrecognized shape the caller must decide how to report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patch::PatchOp;

/// The fixed liveness payload sent by the client on each heartbeat
pub const LIVENESS_PAYLOAD: &str = "ok";

/// A server-pushed message
///
/// Unknown members are tolerated; only the three protocol members are
/// inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Full room snapshot; replaces local state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Value>,

    /// Ordered JSON Patch operation sequence to apply to local state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Vec<PatchOp>>,

    /// Server-reported error; logged only, state unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A classified server message
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// Replace local state with this value
    Snapshot(Value),
    /// Apply these operations to local state
    Patch(Vec<PatchOp>),
    /// Server-side failure report
    Error(String),
}

impl ServerMessage {
    /// Classify into an event, consuming the message
    ///
    /// Returns `None` for unrecognized shapes (no protocol member present).
    #[must_use]
    pub fn into_event(self) -> Option<RoomEvent> {
        if let Some(room) = self.room {
            Some(RoomEvent::Snapshot(room))
        } else if let Some(patch) = self.patch {
            Some(RoomEvent::Patch(patch))
        } else {
            self.error.map(RoomEvent::Error)
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.room.is_some() {
            "room"
        } else if self.patch.is_some() {
            "patch"
        } else if self.error.is_some() {
            "error"
        } else {
            "unrecognized"
        };
        write!(f, "ServerMessage({kind})")
    }
}
