//! Mapping from logical configuration names to files
//!
//! Each logical name `name` lives at `{config_dir}/{name}.json`. The
//! configuration directory defaults to the project root and may be moved to
//! any existing directory.

use std::path::{Path, PathBuf};

use jsonconf_fs::NormalizedPath;

use crate::{Error, Result};

/// Extension appended to logical configuration names.
pub const CONFIG_EXTENSION: &str = "json";

/// A directory specification: one path, or segments joined in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirSpec {
    Path(PathBuf),
    Segments(Vec<String>),
}

impl From<&str> for DirSpec {
    fn from(s: &str) -> Self {
        Self::Path(PathBuf::from(s))
    }
}

impl From<String> for DirSpec {
    fn from(s: String) -> Self {
        Self::Path(PathBuf::from(s))
    }
}

impl From<PathBuf> for DirSpec {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for DirSpec {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<Vec<String>> for DirSpec {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

impl From<&[&str]> for DirSpec {
    fn from(segments: &[&str]) -> Self {
        Self::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DirSpec {
    fn from(segments: [&str; N]) -> Self {
        Self::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

/// Trim the characters the name may be wrapped in.
pub fn trim_name(name: &str) -> &str {
    name.trim_matches(|c| c == '/' || c == '\\' || c == ' ')
}

/// Resolves logical configuration names against the active directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: NormalizedPath,
    config_dir: NormalizedPath,
}

impl PathResolver {
    /// Create a resolver whose configuration directory is `root`.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            config_dir: root.clone(),
            root,
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config_dir(&self) -> &NormalizedPath {
        &self.config_dir
    }

    /// File backing the logical configuration `name`.
    pub fn resolve_file_path(&self, name: &str) -> Result<NormalizedPath> {
        let trimmed = trim_name(name);
        if trimmed.is_empty() {
            return Err(Error::invalid_path(name, "configuration name is empty"));
        }
        Ok(self
            .config_dir
            .join(&format!("{trimmed}.{CONFIG_EXTENSION}")))
    }

    /// Resolve a directory spec against the root without touching state.
    pub fn resolve_dir(&self, spec: &DirSpec) -> Result<NormalizedPath> {
        let relative = match spec {
            DirSpec::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(Error::invalid_path("", "directory path is empty"));
                }
                NormalizedPath::new(path)
            }
            DirSpec::Segments(segments) => {
                if segments.is_empty() {
                    return Err(Error::invalid_path("", "no directory segments given"));
                }
                segments
                    .iter()
                    .skip(1)
                    .fold(NormalizedPath::new(&segments[0]), |acc, s| acc.join(s))
            }
        };
        Ok(relative.resolve_against(&self.root))
    }

    /// Make `spec` the active configuration directory.
    ///
    /// Relative paths resolve against the root. The directory must exist.
    pub fn set_configuration_directory(&mut self, spec: impl Into<DirSpec>) -> Result<()> {
        let dir = self.resolve_dir(&spec.into())?;
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound {
                path: dir.to_native(),
            });
        }
        tracing::debug!(config_dir = %dir, "Configuration directory changed");
        self.config_dir = dir;
        Ok(())
    }
}
