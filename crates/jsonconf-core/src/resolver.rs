//! The `config` template resolver
//!
//! Lets configuration values reference other configuration values and
//! manifest fields:
//!
//! ```text
//! {{ config.get("database", "/host") }}
//! {{ config.getOrDefault("database", "/port", 5432) }}
//! {{ config.shift("queue", "/jobs") }}
//! {{ config.pop("queue", "/jobs") }}
//! {{ config.packageJson("version", "0.0.0") }}
//! ```

use std::sync::Weak;

use jsonconf_template::{Call, Resolver, Result};
use serde_json::Value;

use crate::Config;

/// Name the resolver is registered under.
pub const CONFIG_RESOLVER: &str = "config";

/// Delegates template calls back to the owning [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config: Weak<Config>,
}

impl ConfigResolver {
    pub fn new(config: Weak<Config>) -> Self {
        Self { config }
    }
}

impl Resolver for ConfigResolver {
    fn resolve(&self, call: &Call) -> Result<Value> {
        let config = self
            .config
            .upgrade()
            .ok_or_else(|| call.failure("configuration has been dropped"))?;

        match call.method.as_str() {
            "get" => {
                call.expect_args(2, 2)?;
                config
                    .get(call.str_arg(0)?, call.str_arg(1)?)
                    .map_err(|e| call.failure(e))
            }
            "getOrDefault" | "get_or_default" => {
                call.expect_args(2, 3)?;
                let default = call.arg(2).cloned().unwrap_or(Value::Null);
                config
                    .get_or_default(call.str_arg(0)?, call.str_arg(1)?, default)
                    .map_err(|e| call.failure(e))
            }
            "shift" => {
                call.expect_args(2, 2)?;
                config
                    .shift(call.str_arg(0)?, call.str_arg(1)?)
                    .map_err(|e| call.failure(e))
            }
            "pop" => {
                call.expect_args(2, 2)?;
                config
                    .pop(call.str_arg(0)?, call.str_arg(1)?)
                    .map_err(|e| call.failure(e))
            }
            "packageJson" | "package_json" => {
                call.expect_args(0, 2)?;
                let pointer = match call.arg(0) {
                    Some(_) => call.str_arg(0)?,
                    None => "",
                };
                let default = call.arg(1).cloned().unwrap_or(Value::Null);
                Ok(config.package_json(pointer, default))
            }
            _ => Err(call.unknown_method()),
        }
    }
}
