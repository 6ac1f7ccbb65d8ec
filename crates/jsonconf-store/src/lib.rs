//! Pointer-addressed JSON document store
//!
//! A [`JsonDb`] binds one JSON file on disk, loads it lazily and writes it
//! back after every mutation. Locations inside the document are addressed with
//! slash-delimited pointers that understand array indices:
//!
//! - `/server/port` addresses an object member
//! - `/hosts[0]` addresses an array element, `/hosts[-1]` the last one
//! - `/hosts[]` appends (write only)
//!
//! # Examples
//!
//! ```
//! use jsonconf_store::pointer::{lookup, insert, Pointer};
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! insert(&mut doc, &Pointer::parse("/server/hosts[]").unwrap(), json!("a"), true).unwrap();
//! insert(&mut doc, &Pointer::parse("/server/hosts[]").unwrap(), json!("b"), true).unwrap();
//!
//! let last = lookup(&doc, &Pointer::parse("/server/hosts[-1]").unwrap()).unwrap();
//! assert_eq!(last, &json!("b"));
//! ```

pub mod db;
pub mod error;
pub mod merge;
pub mod pointer;

pub use db::{DbOptions, JsonDb};
pub use error::{Error, Result};
pub use merge::merge_into;
pub use pointer::{PathSegment, Pointer, normalize_pointer};
