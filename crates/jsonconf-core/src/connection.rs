//! Cache of open document handles, one per logical configuration name

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use jsonconf_fs::{NormalizedPath, io};
use jsonconf_store::JsonDb;

use crate::paths::trim_name;
use crate::{Error, Result};

/// Content written to a configuration file created on demand.
const EMPTY_DOCUMENT: &str = "{}";

/// Open [`JsonDb`] handles keyed by logical configuration name.
///
/// A handle is opened on first use and kept for the lifetime of the cache.
/// It stays bound to the file it was opened on, even if the configuration
/// directory changes later.
#[derive(Debug, Default)]
pub struct ConnectionCache {
    handles: Mutex<HashMap<String, JsonDb>>,
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, JsonDb>> {
        // A panic inside an operation leaves the map itself intact
        self.handles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `op` against the handle for `name`.
    ///
    /// When no handle is cached yet, `path` is where the document lives. A
    /// missing file is an error unless `create_if_missing` is set, in which
    /// case it is created (with parent directories) as an empty object.
    pub fn with_connection<T>(
        &self,
        name: &str,
        path: &NormalizedPath,
        create_if_missing: bool,
        op: impl FnOnce(&mut JsonDb) -> Result<T>,
    ) -> Result<T> {
        let key = trim_name(name);
        let mut handles = self.lock();

        if !handles.contains_key(key) {
            if !path.is_file() {
                if !create_if_missing {
                    return Err(Error::ConfigNotFound {
                        name: key.to_string(),
                        path: path.to_native(),
                    });
                }
                io::create_file_if_missing(path, EMPTY_DOCUMENT)?;
            }
            tracing::debug!(name = key, path = %path, "Opening configuration");
            handles.insert(key.to_string(), JsonDb::open(path.clone()));
        }

        let db = handles
            .get_mut(key)
            .ok_or_else(|| Error::invalid_path(name, "connection vanished from cache"))?;
        op(db)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.lock().contains_key(trim_name(name))
    }

    /// Number of open handles.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
