//! Commands that modify a configuration

use colored::Colorize;

use jsonconf_core::Config;

use crate::commands::parse_value;
use crate::error::Result;

/// Write a value at `pointer`.
pub fn run_set(config: &Config, name: &str, pointer: &str, raw: &str) -> Result<()> {
    config.set(name, pointer, parse_value(raw))?;
    println!("{} Set {} in {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    Ok(())
}

/// Remove the value at `pointer`. Nothing there is not an error.
pub fn run_delete(config: &Config, name: &str, pointer: &str) -> Result<()> {
    if config.delete(name, pointer)? {
        println!("{} Deleted {} from {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    } else {
        eprintln!(
            "{} Nothing at {} in {}.",
            "warning:".yellow().bold(),
            pointer,
            name
        );
    }
    Ok(())
}

/// Deep-merge a value into `pointer`.
pub fn run_merge(config: &Config, name: &str, pointer: &str, raw: &str) -> Result<()> {
    config.merge(name, pointer, parse_value(raw))?;
    println!("{} Merged into {} in {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    Ok(())
}
