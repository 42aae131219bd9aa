//! Patch application
//!
//! Applies an ordered operation sequence to a document. Application is
//! transactional over the whole sequence: the input document is never
//! observed half-patched, and the first failing operation aborts with its
//! error.

use serde_json::Value;

use super::PatchOp;
use crate::error::PatchError;
use crate::pointer::{parse_array_index, JsonPointer};

/// Apply a patch to a document, returning the new document
///
/// The input is left untouched; on error the caller keeps its prior state.
pub fn apply(doc: &Value, ops: &[PatchOp]) -> Result<Value, PatchError> {
    let mut out = doc.clone();
    for op in ops {
        apply_one(&mut out, op)?;
    }
    Ok(out)
}

fn apply_one(doc: &mut Value, op: &PatchOp) -> Result<(), PatchError> {
    match op {
        PatchOp::Add { path, value } => {
            let ptr = JsonPointer::parse(path)?;
            insert(doc, &ptr, value.clone())
        }
        PatchOp::Remove { path } => {
            let ptr = JsonPointer::parse(path)?;
            remove(doc, &ptr).map(|_| ())
        }
        PatchOp::Replace { path, value } => {
            let ptr = JsonPointer::parse(path)?;
            let target = ptr
                .resolve_mut(doc)
                .ok_or_else(|| PatchError::PathNotFound(path.clone()))?;
            *target = value.clone();
            Ok(())
        }
        PatchOp::Move { from, path } => {
            let from_ptr = JsonPointer::parse(from)?;
            let to_ptr = JsonPointer::parse(path)?;
            if from_ptr.is_proper_prefix_of(&to_ptr) {
                return Err(PatchError::MoveIntoChild {
                    from: from.clone(),
                    path: path.clone(),
                });
            }
            let value = remove(doc, &from_ptr)?;
            insert(doc, &to_ptr, value)
        }
        PatchOp::Copy { from, path } => {
            let from_ptr = JsonPointer::parse(from)?;
            let to_ptr = JsonPointer::parse(path)?;
            let value = from_ptr
                .resolve(doc)
                .ok_or_else(|| PatchError::PathNotFound(from.clone()))?
                .clone();
            insert(doc, &to_ptr, value)
        }
        PatchOp::Test { path, value } => {
            let ptr = JsonPointer::parse(path)?;
            let current = ptr
                .resolve(doc)
                .ok_or_else(|| PatchError::PathNotFound(path.clone()))?;
            if current == value {
                Ok(())
            } else {
                Err(PatchError::TestFailed(path.clone()))
            }
        }
    }
}

/// Insert per `add` semantics: object member set-or-replace, array slot
/// shift-insert (with `-` meaning one past the end), root replacement.
fn insert(doc: &mut Value, ptr: &JsonPointer, value: Value) -> Result<(), PatchError> {
    let Some((parent, last)) = ptr.split_last() else {
        *doc = value;
        return Ok(());
    };

    let container = parent
        .resolve_mut(doc)
        .ok_or_else(|| PatchError::PathNotFound(ptr.to_string()))?;

    match container {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = if last == "-" {
                items.len()
            } else {
                parse_array_index(last).ok_or_else(|| PatchError::InvalidIndex {
                    path: ptr.to_string(),
                    index: last.to_string(),
                })?
            };
            if index > items.len() {
                return Err(PatchError::IndexOutOfBounds {
                    path: ptr.to_string(),
                    index,
                    len: items.len(),
                });
            }
            items.insert(index, value);
            Ok(())
        }
        // parent exists but is a scalar: nothing can be added below it
        _ => Err(PatchError::PathNotFound(ptr.to_string())),
    }
}

/// Remove the value at `ptr`, returning it
fn remove(doc: &mut Value, ptr: &JsonPointer) -> Result<Value, PatchError> {
    let Some((parent, last)) = ptr.split_last() else {
        return Err(PatchError::RemoveRoot);
    };

    let container = parent
        .resolve_mut(doc)
        .ok_or_else(|| PatchError::PathNotFound(ptr.to_string()))?;

    match container {
        Value::Object(map) => map
            .remove(last)
            .ok_or_else(|| PatchError::PathNotFound(ptr.to_string())),
        Value::Array(items) => {
            let index = parse_array_index(last)
                .filter(|&i| i < items.len())
                .ok_or_else(|| PatchError::PathNotFound(ptr.to_string()))?;
            Ok(items.remove(index))
        }
        _ => Err(PatchError::PathNotFound(ptr.to_string())),
    }
}
