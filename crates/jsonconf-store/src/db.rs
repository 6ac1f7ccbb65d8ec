//! File-backed JSON document handle

use jsonconf_fs::{NormalizedPath, io};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::pointer::{self, Pointer};

/// Behaviour switches for a [`JsonDb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbOptions {
    /// Write the document back to disk after every `push`/`delete`.
    pub save_on_push: bool,
    /// Pretty-print the document when saving.
    pub human_readable: bool,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            save_on_push: true,
            human_readable: true,
        }
    }
}

/// An open handle on one JSON document.
///
/// The file is read lazily on first access and the parsed content stays in
/// memory afterwards. A missing file reads as an empty object; it is only
/// created on the first save.
#[derive(Debug)]
pub struct JsonDb {
    path: NormalizedPath,
    options: DbOptions,
    data: Option<Value>,
}

impl JsonDb {
    /// Open a handle with the default options (save on push, pretty output).
    pub fn open(path: NormalizedPath) -> Self {
        Self::with_options(path, DbOptions::default())
    }

    pub fn with_options(path: NormalizedPath, options: DbOptions) -> Self {
        Self {
            path,
            options,
            data: None,
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn options(&self) -> DbOptions {
        self.options
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Discard the in-memory copy and read the file again.
    pub fn reload(&mut self) -> Result<()> {
        self.data = Some(read_document(&self.path)?);
        Ok(())
    }

    fn data(&mut self) -> Result<&mut Value> {
        if self.data.is_none() {
            self.reload()?;
        }
        Ok(self.data.get_or_insert_with(|| Value::Object(Map::new())))
    }

    /// Return a copy of the value at `pointer`.
    pub fn get_data(&mut self, pointer: &str) -> Result<Value> {
        let pointer = Pointer::parse(pointer)?;
        let data = self.data()?;
        pointer::lookup(data, &pointer).cloned()
    }

    /// Check whether `pointer` resolves to a value.
    pub fn exists(&mut self, pointer: &str) -> Result<bool> {
        match self.get_data(pointer) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Write `value` at `pointer`.
    ///
    /// With `overwrite` false the value is deep-merged into the existing one.
    /// On error the document is unchanged.
    pub fn push(&mut self, pointer: &str, value: Value, overwrite: bool) -> Result<()> {
        let pointer = Pointer::parse(pointer)?;
        let data = self.data()?;
        // A failed insert must leave the cached document untouched
        let mut updated = data.clone();
        pointer::insert(&mut updated, &pointer, value, overwrite)?;
        *data = updated;
        tracing::debug!(path = %self.path, pointer = %pointer, overwrite, "Pushed value");
        self.save_if_configured()
    }

    /// Remove the value at `pointer`.
    ///
    /// Returns `false` without touching the file when nothing was there.
    pub fn delete(&mut self, pointer: &str) -> Result<bool> {
        let pointer = Pointer::parse(pointer)?;
        let data = self.data()?;
        if pointer::remove(data, &pointer)?.is_none() {
            return Ok(false);
        }
        tracing::debug!(path = %self.path, pointer = %pointer, "Deleted value");
        self.save_if_configured()?;
        Ok(true)
    }

    /// Write the in-memory document to disk.
    pub fn save(&mut self) -> Result<()> {
        let human_readable = self.options.human_readable;
        let data = self.data()?;
        let content = if human_readable {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        io::write_text(&self.path, &content)?;
        Ok(())
    }

    fn save_if_configured(&mut self) -> Result<()> {
        if self.options.save_on_push {
            self.save()?;
        }
        Ok(())
    }
}

fn read_document(path: &NormalizedPath) -> Result<Value> {
    let content = match io::read_text(path) {
        Ok(content) => content,
        Err(e) if e.is_not_found() => return Ok(Value::Object(Map::new())),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_native(),
        message: e.to_string(),
    })
}
