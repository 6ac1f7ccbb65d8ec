//! Read-only commands

use colored::Colorize;
use serde_json::Value;

use jsonconf_core::Config;

use crate::commands::{parse_value, print_value};
use crate::error::Result;

/// Print the evaluated value at `pointer`, or `default` when it cannot be read.
pub fn run_get(config: &Config, name: &str, pointer: &str, default: Option<&str>) -> Result<()> {
    let value = match default {
        Some(raw) => config.get_or_default(name, pointer, parse_value(raw))?,
        None => config.get(name, pointer)?,
    };
    print_value(&value)
}

/// Print one `pointer<TAB>value` line per member of the value at `pointer`.
pub fn run_list(config: &Config, name: &str, pointer: &str) -> Result<()> {
    let mut lines = Vec::new();
    config.for_each(name, pointer, |value, _, path| {
        lines.push(format!("{}\t{}", path.cyan(), value));
    })?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Print a value from the manifest.
pub fn run_package(config: &Config, pointer: &str, default: Option<&str>) -> Result<()> {
    let default = default.map(parse_value).unwrap_or(Value::Null);
    print_value(&config.package_json(pointer, default))
}

/// Print the file backing `name`.
pub fn run_path(config: &Config, name: &str) -> Result<()> {
    println!("{}", config.resolve_file_path(name)?.to_native().display());
    Ok(())
}
