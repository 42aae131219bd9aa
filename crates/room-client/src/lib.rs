//! # room-client
//!
//! WebSocket client that joins a room, mirrors server-pushed state
//! (snapshots and JSON patches) into a local session, and keeps the
//! connection alive with a periodic liveness payload.

pub mod client;
pub mod handlers;
pub mod heartbeat;
pub mod session;

// Re-export commonly used types at crate root
pub use client::RoomClient;
pub use heartbeat::Heartbeat;
pub use session::{ConnectionState, Session};
