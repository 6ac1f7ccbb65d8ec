//! Filesystem primitives for jsonconf
//!
//! Provides forward-slash normalized paths and safe I/O operations used by the
//! document store: atomic writes, text reads and on-demand file creation.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
