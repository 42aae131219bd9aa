//! Room snapshot handler

use super::HandlerResult;
use crate::session::Session;
use serde_json::Value;

/// Handles full room snapshots
pub struct SnapshotHandler;

impl SnapshotHandler {
    /// Replace the session's room state with the pushed value
    pub fn handle(session: &Session, value: Value) -> HandlerResult<()> {
        session.replace_room(value);

        tracing::info!(
            session_id = %session.id(),
            "Room snapshot applied"
        );

        Ok(())
    }
}
