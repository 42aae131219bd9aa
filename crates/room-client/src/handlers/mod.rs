//! Message handlers
//!
//! Reduces decoded server messages into the session's room state.

mod error;
mod patch;
mod remote;
mod snapshot;

pub use error::{HandlerError, HandlerResult};
pub use patch::PatchHandler;
pub use remote::RemoteErrorHandler;
pub use snapshot::SnapshotHandler;

use crate::session::Session;
use room_core::{RoomEvent, ServerMessage};

/// Dispatch incoming server messages to the appropriate handlers
pub struct MessageReducer;

impl MessageReducer {
    /// Reduce one server message into the session
    ///
    /// Unrecognized shapes (none of `room`/`patch`/`error` present) are
    /// reported and otherwise ignored; the session stays up with its
    /// state unchanged.
    pub fn reduce(session: &Session, message: ServerMessage) -> HandlerResult<()> {
        match message.into_event() {
            Some(RoomEvent::Snapshot(value)) => SnapshotHandler::handle(session, value),
            Some(RoomEvent::Patch(ops)) => PatchHandler::handle(session, &ops),
            Some(RoomEvent::Error(message)) => RemoteErrorHandler::handle(session, &message),
            None => {
                tracing::warn!(
                    session_id = %session.id(),
                    "Unrecognized message shape, ignoring"
                );
                Ok(())
            }
        }
    }
}
