//! Patch handler

use super::HandlerResult;
use crate::session::Session;
use room_core::PatchOp;

/// Handles incremental room patches
pub struct PatchHandler;

impl PatchHandler {
    /// Apply an ordered op sequence to the session's room state
    ///
    /// On failure the session keeps its prior state and the error
    /// surfaces to the caller; it is never swallowed.
    pub fn handle(session: &Session, ops: &[PatchOp]) -> HandlerResult<()> {
        session.apply_patch(ops).map_err(|e| {
            tracing::warn!(
                session_id = %session.id(),
                error = %e,
                ops = ops.len(),
                "Patch rejected, keeping prior state"
            );
            e
        })?;

        tracing::debug!(
            session_id = %session.id(),
            ops = ops.len(),
            "Patch applied"
        );

        Ok(())
    }
}
