//! Array helper commands

use colored::Colorize;

use jsonconf_core::Config;

use crate::commands::{parse_value, print_value};
use crate::error::Result;

pub fn run_append(config: &Config, name: &str, pointer: &str, raw: &str) -> Result<()> {
    config.append(name, pointer, parse_value(raw))?;
    println!("{} Appended to {} in {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    Ok(())
}

pub fn run_push(config: &Config, name: &str, pointer: &str, raw: &str) -> Result<()> {
    config.push(name, pointer, parse_value(raw))?;
    println!("{} Prepended to {} in {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    Ok(())
}

/// Remove the first element and print it.
pub fn run_shift(config: &Config, name: &str, pointer: &str) -> Result<()> {
    print_value(&config.shift(name, pointer)?)
}

/// Remove the last element and print it.
pub fn run_pop(config: &Config, name: &str, pointer: &str) -> Result<()> {
    print_value(&config.pop(name, pointer)?)
}

pub fn run_clear(config: &Config, name: &str, pointer: &str) -> Result<()> {
    config.clear(name, pointer)?;
    println!("{} Cleared {} in {}.", "OK".green().bold(), pointer.cyan(), name.cyan());
    Ok(())
}
