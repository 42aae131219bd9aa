//! # room-core
//!
//! Domain layer for room state synchronization: JSON Pointer (RFC 6901),
//! JSON Patch (RFC 6902), and the wire protocol types.
//! This crate has zero dependencies on infrastructure (runtime, transport, etc.).

pub mod error;
pub mod patch;
pub mod pointer;
pub mod protocol;

// Re-export commonly used types at crate root
pub use error::PatchError;
pub use patch::PatchOp;
pub use pointer::{JsonPointer, PointerError};
pub use protocol::{RoomEvent, ServerMessage, LIVENESS_PAYLOAD};
