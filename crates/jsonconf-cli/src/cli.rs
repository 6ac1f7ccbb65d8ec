//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// jsonconf - Read and write templated JSON configuration files
#[derive(Parser, Debug)]
#[command(name = "jsonconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "JSONCONF_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration directory, relative to the root
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// VALUE arguments are parsed as JSON; anything that is not valid JSON is
/// taken as a plain string.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the evaluated value at a pointer
    ///
    /// Examples:
    ///   jsonconf get settings /theme
    ///   jsonconf get settings /port --default 8080
    Get {
        /// Configuration name
        name: String,

        /// Pointer inside the configuration
        #[arg(default_value = "/")]
        pointer: String,

        /// Value to print when the pointer cannot be read
        #[arg(long, allow_hyphen_values = true)]
        default: Option<String>,
    },

    /// Write a value, creating the configuration if needed
    Set {
        name: String,
        pointer: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Remove the value at a pointer
    Delete { name: String, pointer: String },

    /// Deep-merge a value into the value at a pointer
    Merge {
        name: String,
        pointer: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List the members of an object or array, one per line
    List {
        name: String,
        #[arg(default_value = "/")]
        pointer: String,
    },

    /// Add a value at the end of an array
    Append {
        name: String,
        pointer: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Insert a value at the front of an array
    Push {
        name: String,
        pointer: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Remove and print the first element of an array
    Shift { name: String, pointer: String },

    /// Remove and print the last element of an array
    Pop { name: String, pointer: String },

    /// Empty an array
    Clear { name: String, pointer: String },

    /// Print a value from package.json
    Package {
        #[arg(default_value = "/")]
        pointer: String,

        /// Value to print when the manifest or pointer is missing
        #[arg(long, allow_hyphen_values = true)]
        default: Option<String>,
    },

    /// Print the file backing a configuration name
    Path { name: String },
}
