//! Templated access to project JSON configuration files
//!
//! A [`Config`] is rooted at a project directory. Logical configuration names
//! map to `{config_dir}/{name}.json`, where the configuration directory is the
//! root unless moved explicitly or by the manifest's `configurationDirectory`
//! key. Values are addressed with pointers such as `/server/hosts[0]` and are
//! evaluated for `{{ resolver.method(args) }}` expressions on every read.
//!
//! # Example
//!
//! ```
//! use jsonconf_core::Config;
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = Config::open(dir.path()).unwrap();
//!
//! config.set("database", "/host", json!("localhost")).unwrap();
//! config.set("app", "/dsn", json!("db://{{ config.get(\"database\", \"/host\") }}")).unwrap();
//!
//! assert_eq!(config.get("app", "/dsn").unwrap(), json!("db://localhost"));
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod resolver;

pub use config::{Config, ConfigBuilder, EntryKey};
pub use connection::ConnectionCache;
pub use error::{Error, ErrorKind, Result};
pub use manifest::{MANIFEST_FILE, ManifestSlot};
pub use paths::{DirSpec, PathResolver};
pub use resolver::{CONFIG_RESOLVER, ConfigResolver};
