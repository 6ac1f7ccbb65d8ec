//! Read-only access to the project manifest (`package.json`)

use std::sync::Mutex;

use jsonconf_fs::NormalizedPath;
use jsonconf_store::pointer::{self, Pointer};
use jsonconf_store::{DbOptions, JsonDb};
use serde_json::{Map, Value};

use crate::Result;

/// File name of the project manifest, relative to the root.
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest key naming an alternative configuration directory.
pub const CONFIG_DIR_KEY: &str = "configurationDirectory";

/// Single lazily opened handle on the manifest.
///
/// The manifest is never written. While the file is absent it reads as an
/// empty object and nothing is cached, so a manifest created later is seen.
#[derive(Debug)]
pub struct ManifestSlot {
    path: NormalizedPath,
    handle: Mutex<Option<JsonDb>>,
}

impl ManifestSlot {
    pub fn new(root: &NormalizedPath) -> Self {
        Self {
            path: root.join(MANIFEST_FILE),
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.handle
            .lock()
            .map(|handle| handle.is_some())
            .unwrap_or(false)
    }

    /// Raw value at `pointer`, without template evaluation.
    pub fn read(&self, pointer: &str) -> Result<Value> {
        let mut slot = self
            .handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if slot.is_none() {
            if !self.path.is_file() {
                let empty = Value::Object(Map::new());
                return Ok(pointer::lookup(&empty, &Pointer::parse(pointer)?)?.clone());
            }
            tracing::debug!(path = %self.path, "Opening manifest");
            *slot = Some(JsonDb::with_options(
                self.path.clone(),
                DbOptions {
                    save_on_push: false,
                    human_readable: true,
                },
            ));
        }

        match slot.as_mut() {
            Some(db) => Ok(db.get_data(pointer)?),
            None => Ok(Value::Object(Map::new())),
        }
    }
}
