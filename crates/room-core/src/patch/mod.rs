//! JSON Patch (RFC 6902)
//!
//! Operation types and their sequential, transactional application to a
//! `serde_json::Value` document.

mod apply;
mod ops;

pub use apply::apply;
pub use ops::PatchOp;
