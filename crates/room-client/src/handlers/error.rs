//! Handler error types

use room_core::PatchError;
use thiserror::Error;

/// Handler error type
///
/// Every reducer error leaves the prior state intact; none of them tears
/// the connection down.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Patch application failed; prior state was kept
    #[error("Patch failed: {0}")]
    Patch(#[from] PatchError),
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
