//! Client session
//!
//! The explicit session object that owns the local room state and the
//! outbound message channel.

mod session;

pub use session::{ConnectionState, SendError, Session};
