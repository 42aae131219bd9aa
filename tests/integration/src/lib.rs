//! Integration test support
//!
//! Utilities for driving a real client session against an in-process
//! scripted WebSocket server.

pub mod helpers;

pub use helpers::{wait_for_room, ScriptedServer, ServerWs};
