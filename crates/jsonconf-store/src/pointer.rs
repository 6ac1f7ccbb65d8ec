//! Pointer parsing and traversal utilities
//!
//! # Pointer Syntax
//!
//! - Slash-separated keys: `/config/database/host`
//! - Array indexing: `/items[0]/name`, negative indices count from the end
//! - Append marker: `/items[]` (only meaningful when writing)
//! - Stacked brackets: `/matrix[0][1]`
//! - Bare brackets address the current container: `/[0]` is the first
//!   element of a root array
//!
//! # Examples
//!
//! ```
//! use jsonconf_store::pointer::{Pointer, PathSegment};
//!
//! let pointer = Pointer::parse("config/servers[-1]/host").unwrap();
//! assert_eq!(pointer.as_str(), "/config/servers[-1]/host");
//! assert_eq!(pointer.segments(), &[
//!     PathSegment::Key("config".to_string()),
//!     PathSegment::Key("servers".to_string()),
//!     PathSegment::Index(-1),
//!     PathSegment::Key("host".to_string()),
//! ]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::merge::merge_into;

/// A segment of a pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A member of an object (e.g., "database" in `/config/database`)
    Key(String),
    /// An element of an array; negative values count from the end
    Index(isize),
    /// The append marker `[]`
    Append,
}

/// Normalize a raw pointer string.
///
/// Empty input yields `/`; otherwise surrounding slashes and spaces are
/// trimmed and a single leading `/` is added.
///
/// ```
/// use jsonconf_store::normalize_pointer;
///
/// assert_eq!(normalize_pointer(""), "/");
/// assert_eq!(normalize_pointer(" /server/port/ "), "/server/port");
/// ```
pub fn normalize_pointer(raw: &str) -> String {
    format!("/{}", raw.trim_matches(|c| c == '/' || c == ' '))
}

/// A parsed, normalized pointer into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    raw: String,
    segments: Vec<PathSegment>,
}

impl Pointer {
    /// The document root, `/`.
    pub fn root() -> Self {
        Self {
            raw: "/".to_string(),
            segments: Vec::new(),
        }
    }

    /// Normalize and parse a pointer string.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize_pointer(raw);
        let mut segments = Vec::new();
        for part in normalized.split('/').filter(|p| !p.is_empty()) {
            parse_part(part, &normalized, &mut segments)?;
        }
        Ok(Self {
            raw: normalized,
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split one slash-delimited part into a key and its bracket suffixes.
fn parse_part(part: &str, pointer: &str, segments: &mut Vec<PathSegment>) -> Result<()> {
    let (key, mut rest) = match part.find('[') {
        Some(idx) => part.split_at(idx),
        None => (part, ""),
    };
    if !key.is_empty() {
        segments.push(PathSegment::Key(key.to_string()));
    }

    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return Err(Error::invalid_pointer(
                pointer,
                format!("unexpected text '{rest}' after array index"),
            ));
        };
        let close = inner
            .find(']')
            .ok_or_else(|| Error::invalid_pointer(pointer, "unterminated '['"))?;
        let index = inner[..close].trim();
        if index.is_empty() {
            segments.push(PathSegment::Append);
        } else {
            let parsed = index.parse::<isize>().map_err(|_| {
                Error::invalid_pointer(pointer, format!("'{index}' is not an array index"))
            })?;
            segments.push(PathSegment::Index(parsed));
        }
        rest = &inner[close + 1..];
    }
    Ok(())
}

impl FromStr for Pointer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Map a possibly negative index onto `0..len`.
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let idx = index as usize;
        (idx < len).then_some(idx)
    } else {
        let back = index.unsigned_abs();
        (back <= len).then(|| len - back)
    }
}

/// Get the value a pointer addresses.
pub fn lookup<'a>(value: &'a Value, pointer: &Pointer) -> Result<&'a Value> {
    let mut current = value;
    for segment in pointer.segments() {
        current = match segment {
            PathSegment::Key(key) => current
                .as_object()
                .and_then(|map| map.get(key))
                .ok_or_else(|| Error::not_found(pointer.as_str()))?,
            PathSegment::Index(index) => current
                .as_array()
                .and_then(|arr| resolve_index(*index, arr.len()).map(|i| &arr[i]))
                .ok_or_else(|| Error::not_found(pointer.as_str()))?,
            PathSegment::Append => {
                return Err(Error::invalid_pointer(
                    pointer.as_str(),
                    "the append marker '[]' cannot be read",
                ));
            }
        };
    }
    Ok(current)
}

fn lookup_mut<'a>(value: &'a mut Value, segments: &[PathSegment]) -> Option<&'a mut Value> {
    let mut current = value;
    for segment in segments {
        current = match segment {
            PathSegment::Key(key) => current.as_object_mut()?.get_mut(key)?,
            PathSegment::Index(index) => {
                let arr = current.as_array_mut()?;
                let idx = resolve_index(*index, arr.len())?;
                &mut arr[idx]
            }
            PathSegment::Append => return None,
        };
    }
    Some(current)
}

/// Write `new_value` at the pointer, creating intermediate containers.
///
/// Keys create objects and indices or the append marker create arrays.
/// An index equal to the array length appends. With `overwrite` false the
/// value is merged into whatever is already there (see [`merge_into`]).
pub fn insert(root: &mut Value, pointer: &Pointer, new_value: Value, overwrite: bool) -> Result<()> {
    let segments = pointer.segments();
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        current = child_for_write(current, segment, segments.get(i + 1), pointer)?;
    }

    if overwrite {
        *current = new_value;
        Ok(())
    } else {
        merge_into(current, new_value).map_err(|conflict| match conflict {
            Error::MergeConflict {
                pointer: nested,
                existing,
                incoming,
            } => Error::MergeConflict {
                pointer: join_pointer(pointer.as_str(), &nested),
                existing,
                incoming,
            },
            other => other,
        })
    }
}

fn join_pointer(base: &str, nested: &str) -> String {
    match (base, nested) {
        (_, "/") => base.to_string(),
        ("/", _) => nested.to_string(),
        _ => format!("{base}{nested}"),
    }
}

fn child_for_write<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    next: Option<&PathSegment>,
    pointer: &Pointer,
) -> Result<&'a mut Value> {
    let placeholder = || match next {
        Some(PathSegment::Key(_)) => Value::Object(Map::new()),
        Some(_) => Value::Array(Vec::new()),
        None => Value::Null,
    };

    match segment {
        PathSegment::Key(key) => {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let map = current.as_object_mut().ok_or_else(|| Error::PathSetFailed {
                pointer: pointer.to_string(),
                reason: format!("cannot add member '{key}' to a non-object value"),
            })?;
            Ok(map.entry(key.clone()).or_insert_with(placeholder))
        }
        PathSegment::Index(index) => {
            if current.is_null() {
                *current = Value::Array(Vec::new());
            }
            let arr = current.as_array_mut().ok_or_else(|| Error::PathSetFailed {
                pointer: pointer.to_string(),
                reason: format!("cannot index [{index}] into a non-array value"),
            })?;
            let len = arr.len();
            let position = if *index >= 0 && *index as usize == len {
                arr.push(placeholder());
                len
            } else {
                resolve_index(*index, len).ok_or_else(|| Error::IndexOutOfBounds {
                    pointer: pointer.to_string(),
                    index: *index,
                    len,
                })?
            };
            Ok(&mut arr[position])
        }
        PathSegment::Append => {
            if current.is_null() {
                *current = Value::Array(Vec::new());
            }
            let arr = current.as_array_mut().ok_or_else(|| Error::PathSetFailed {
                pointer: pointer.to_string(),
                reason: "cannot append to a non-array value".to_string(),
            })?;
            arr.push(placeholder());
            let last = arr.len() - 1;
            Ok(&mut arr[last])
        }
    }
}

/// Remove the value a pointer addresses.
///
/// Returns `None` when nothing is there. Removing the root resets the
/// document to an empty object and returns the previous content.
pub fn remove(root: &mut Value, pointer: &Pointer) -> Result<Option<Value>> {
    let Some((last, parents)) = pointer.segments().split_last() else {
        return Ok(Some(std::mem::replace(root, Value::Object(Map::new()))));
    };
    if pointer.segments().contains(&PathSegment::Append) {
        return Err(Error::invalid_pointer(
            pointer.as_str(),
            "the append marker '[]' cannot be deleted",
        ));
    }

    let Some(parent) = lookup_mut(root, parents) else {
        return Ok(None);
    };
    let removed = match last {
        PathSegment::Key(key) => parent.as_object_mut().and_then(|map| map.shift_remove(key)),
        PathSegment::Index(index) => parent.as_array_mut().and_then(|arr| {
            let idx = resolve_index(*index, arr.len())?;
            Some(arr.remove(idx))
        }),
        PathSegment::Append => None,
    };
    Ok(removed)
}
