//! Locating the project the command operates on

use std::path::PathBuf;
use std::sync::Arc;

use jsonconf_core::Config;

use crate::error::{CliError, Result};

/// Root and configuration directory requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub root: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

impl CliContext {
    pub fn new(root: Option<PathBuf>, config_dir: Option<PathBuf>) -> Self {
        Self { root, config_dir }
    }

    /// The project root, falling back to the current directory.
    pub fn root(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) if !root.is_dir() => Err(CliError::user(format!(
                "Root directory {} does not exist",
                root.display()
            ))),
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Open the configuration for this context.
    pub fn open(&self) -> Result<Arc<Config>> {
        let root = self.root()?;
        tracing::debug!(root = %root.display(), "Opening project");
        let mut builder = Config::builder(&root);
        if let Some(dir) = &self.config_dir {
            builder = builder.config_dir(dir.clone());
        }
        Ok(builder.build()?)
    }
}
