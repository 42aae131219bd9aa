//! Wire protocol definitions
//!
//! Defines the server-pushed message format and the outbound liveness
//! payload.

mod messages;

pub use messages::{RoomEvent, ServerMessage, LIVENESS_PAYLOAD};
