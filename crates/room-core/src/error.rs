//! Domain errors - error types for patch application

use thiserror::Error;

use crate::pointer::PointerError;

/// Errors from applying a JSON Patch operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The operation carried a malformed pointer
    #[error(transparent)]
    Pointer(#[from] PointerError),

    /// The target (or `from`) path does not address an existing value
    #[error("path does not exist: {0:?}")]
    PathNotFound(String),

    /// A token addressing into an array is not a valid index
    #[error("invalid array index {index:?} at {path:?}")]
    InvalidIndex { path: String, index: String },

    /// An `add` index past the end of the array
    #[error("index {index} out of bounds at {path:?} (len {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// A `test` operation's value did not match the document
    #[error("test failed at {0:?}: value does not match")]
    TestFailed(String),

    /// `remove` of the root pointer has no defined meaning
    #[error("cannot remove the root value")]
    RemoveRoot,

    /// `move` where `path` lies inside the subtree rooted at `from`
    #[error("cannot move {from:?} into its own child {path:?}")]
    MoveIntoChild { from: String, path: String },
}
