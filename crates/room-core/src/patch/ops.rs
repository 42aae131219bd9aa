//! Patch operation types
//!
//! Wire form per RFC 6902: objects tagged by an `op` member, with `path`
//! (and `from` for move/copy) as JSON Pointer strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single JSON Patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert a value at `path` (object member, array slot, or root)
    Add { path: String, value: Value },
    /// Remove the value at `path`, which must exist
    Remove { path: String },
    /// Replace the value at `path`, which must exist
    Replace { path: String, value: Value },
    /// Remove the value at `from` and insert it at `path`
    Move { from: String, path: String },
    /// Insert a copy of the value at `from` at `path`
    Copy { from: String, path: String },
    /// Assert that the value at `path` equals `value`
    Test { path: String, value: Value },
}

impl PatchOp {
    /// The RFC 6902 name of this operation
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Move { .. } => "move",
            Self::Copy { .. } => "copy",
            Self::Test { .. } => "test",
        }
    }

    /// The target path of this operation
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Move { path, .. }
            | Self::Copy { path, .. }
            | Self::Test { path, .. } => path,
        }
    }
}

impl std::fmt::Display for PatchOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.path())
    }
}
