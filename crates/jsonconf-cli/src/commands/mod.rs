//! Command implementations for jsonconf-cli

pub mod array;
pub mod read;
pub mod write;

pub use array::{run_append, run_clear, run_pop, run_push, run_shift};
pub use read::{run_get, run_list, run_package, run_path};
pub use write::{run_delete, run_merge, run_set};

use serde_json::Value;

use crate::error::Result;

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Print a value as pretty JSON on stdout.
pub fn print_value(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
