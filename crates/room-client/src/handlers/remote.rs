//! Server-reported error handler

use super::HandlerResult;
use crate::session::Session;

/// Handles `error` messages pushed by the server
pub struct RemoteErrorHandler;

impl RemoteErrorHandler {
    /// Report the error; state is unchanged and the session stays up
    pub fn handle(session: &Session, message: &str) -> HandlerResult<()> {
        tracing::error!(
            session_id = %session.id(),
            error = %message,
            "Server reported an error"
        );

        Ok(())
    }
}
