//! Deep merge of JSON values

use serde_json::Value;

use crate::error::{Error, Result};

/// Merge `incoming` into `target`.
///
/// - array + array: concatenation
/// - array + anything else: the value is appended as one element
/// - object + object: members merged recursively with these same rules
/// - object + array: [`Error::MergeConflict`]
/// - everything else: `incoming` replaces `target`
///
/// The pointer in a returned conflict is relative to `target`.
pub fn merge_into(target: &mut Value, incoming: Value) -> Result<()> {
    merge_at(target, incoming, "")
}

fn merge_at(target: &mut Value, incoming: Value, at: &str) -> Result<()> {
    match (target, incoming) {
        (Value::Array(existing), Value::Array(items)) => existing.extend(items),
        (Value::Array(existing), item) => existing.push(item),
        (Value::Object(_), Value::Array(_)) => {
            return Err(Error::MergeConflict {
                pointer: if at.is_empty() { "/".to_string() } else { at.to_string() },
                existing: "object",
                incoming: "array",
            });
        }
        (Value::Object(existing), Value::Object(members)) => {
            for (key, value) in members {
                match existing.get_mut(&key) {
                    Some(slot) => merge_at(slot, value, &format!("{at}/{key}"))?,
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
    Ok(())
}
