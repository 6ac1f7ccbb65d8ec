//! The configuration facade
//!
//! [`Config`] ties together name-to-file resolution, the connection cache,
//! the manifest and template evaluation. Every read goes through the
//! evaluator, so stored values may reference other configuration values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use jsonconf_fs::NormalizedPath;
use jsonconf_store::{JsonDb, normalize_pointer};
use jsonconf_template::{DEFAULT_MAX_DEPTH, Evaluator, Resolver, ResolverRegistry};
use serde_json::Value;

use crate::connection::ConnectionCache;
use crate::manifest::{CONFIG_DIR_KEY, ManifestSlot};
use crate::paths::{DirSpec, PathResolver};
use crate::resolver::{CONFIG_RESOLVER, ConfigResolver};
use crate::{Error, Result};

/// Position of an entry visited by [`Config::for_each`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKey {
    Index(usize),
    Key(String),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Builder for [`Config`].
pub struct ConfigBuilder {
    root: PathBuf,
    config_dir: Option<DirSpec>,
    registry: ResolverRegistry,
    max_depth: usize,
}

impl ConfigBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_dir: None,
            registry: ResolverRegistry::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use this configuration directory instead of the root or the
    /// manifest's `configurationDirectory`.
    pub fn config_dir(mut self, spec: impl Into<DirSpec>) -> Self {
        self.config_dir = Some(spec.into());
        self
    }

    /// Register an additional template resolver.
    ///
    /// The name `config` is reserved for the built-in resolver.
    pub fn resolver(mut self, name: impl Into<String>, resolver: impl Resolver + 'static) -> Self {
        self.registry.register(name, resolver);
        self
    }

    /// Bound on nested template resolution.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Result<Arc<Config>> {
        let root = NormalizedPath::new(&self.root).canonicalize_lossy();
        let mut paths = PathResolver::new(root.clone());
        let explicit_dir = self.config_dir.is_some();
        if let Some(spec) = self.config_dir {
            paths.set_configuration_directory(spec)?;
        }

        let mut registry = self.registry;
        let max_depth = self.max_depth;
        let config = Arc::new_cyclic(|weak| {
            registry.register(CONFIG_RESOLVER, ConfigResolver::new(weak.clone()));
            Config {
                paths: Mutex::new(paths),
                connections: ConnectionCache::new(),
                manifest: ManifestSlot::new(&root),
                evaluator: Evaluator::new(registry).with_max_depth(max_depth),
            }
        });

        if !explicit_dir {
            config.apply_manifest_directory();
        }
        tracing::debug!(
            root = %root,
            config_dir = %config.config_dir(),
            "Configuration ready"
        );
        Ok(config)
    }
}

/// Pointer-addressed access to JSON configuration files.
///
/// Each logical configuration name maps to `{config_dir}/{name}.json`.
/// Values are evaluated for template expressions on every read.
#[derive(Debug)]
pub struct Config {
    paths: Mutex<PathResolver>,
    connections: ConnectionCache,
    manifest: ManifestSlot,
    evaluator: Evaluator,
}

impl Config {
    pub fn builder(root: impl AsRef<Path>) -> ConfigBuilder {
        ConfigBuilder::new(root)
    }

    /// Open with default settings rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Arc<Self>> {
        ConfigBuilder::new(root).build()
    }

    /// Open with default settings rooted at the working directory.
    pub fn from_current_dir() -> Result<Arc<Self>> {
        let cwd = std::env::current_dir().map_err(|e| jsonconf_fs::Error::io(".", e))?;
        Self::open(cwd)
    }

    fn paths(&self) -> MutexGuard<'_, PathResolver> {
        self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply_manifest_directory(&self) {
        let Value::String(dir) = self.package_json(CONFIG_DIR_KEY, Value::Null) else {
            return;
        };
        if dir.is_empty() {
            return;
        }
        match self.paths().set_configuration_directory(dir.as_str()) {
            Ok(()) => tracing::debug!(directory = %dir, "Using configurationDirectory from manifest"),
            Err(e) => tracing::warn!(directory = %dir, error = %e, "Ignoring configurationDirectory from manifest"),
        }
    }

    pub fn root(&self) -> NormalizedPath {
        self.paths().root().clone()
    }

    pub fn config_dir(&self) -> NormalizedPath {
        self.paths().config_dir().clone()
    }

    pub fn manifest_path(&self) -> &NormalizedPath {
        self.manifest.path()
    }

    /// Move the configuration directory. Handles already open keep their files.
    pub fn set_configuration_directory(&self, spec: impl Into<DirSpec>) -> Result<()> {
        self.paths().set_configuration_directory(spec)
    }

    pub fn resolve_file_path(&self, name: &str) -> Result<NormalizedPath> {
        self.paths().resolve_file_path(name)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.connections.is_open(name)
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate template expressions in an arbitrary value.
    pub fn evaluate(&self, value: &Value) -> Result<Value> {
        Ok(self.evaluator.evaluate(value)?)
    }

    fn with_connection<T>(
        &self,
        name: &str,
        create_if_missing: bool,
        op: impl FnOnce(&mut JsonDb) -> Result<T>,
    ) -> Result<T> {
        let path = self.resolve_file_path(name)?;
        self.connections
            .with_connection(name, &path, create_if_missing, op)
    }

    /// The stored value, without template evaluation.
    pub fn get_raw(&self, name: &str, pointer: &str) -> Result<Value> {
        let pointer = normalize_pointer(pointer);
        self.with_connection(name, false, |db| {
            db.get_data(&pointer)
                .map_err(|source| value_error(name, &pointer, source))
        })
    }

    /// Read and evaluate the value at `pointer`.
    ///
    /// Fails with [`Error::ValueNotFound`] when the pointer does not resolve
    /// and [`Error::ConfigNotFound`] when the file does not exist. Any other
    /// failure, including template evaluation, is wrapped in
    /// [`Error::Unreadable`].
    pub fn get(&self, name: &str, pointer: &str) -> Result<Value> {
        self.get_raw(name, pointer)
            .and_then(|raw| self.evaluate(&raw))
            .map_err(|source| match source {
                Error::ValueNotFound { .. } | Error::ConfigNotFound { .. } => source,
                other => Error::Unreadable {
                    name: name.to_string(),
                    pointer: normalize_pointer(pointer),
                    source: Box::new(other),
                },
            })
    }

    /// Like [`Config::get`], with absence reported as `None`.
    pub fn find(&self, name: &str, pointer: &str) -> Result<Option<Value>> {
        match self.get(name, pointer) {
            Ok(value) => Ok(Some(value)),
            Err(Error::ValueNotFound { .. } | Error::ConfigNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// [`Config::get`], or the evaluated `default` on any failure.
    pub fn get_or_default(&self, name: &str, pointer: &str, default: Value) -> Result<Value> {
        match self.get(name, pointer) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!(name, pointer, error = %e, "Falling back to default");
                self.evaluate(&default)
            }
        }
    }

    /// Write `value` at `pointer`, creating the file if needed.
    pub fn set(&self, name: &str, pointer: &str, value: Value) -> Result<()> {
        let pointer = normalize_pointer(pointer);
        self.with_connection(name, true, |db| Ok(db.push(&pointer, value, true)?))
    }

    /// Remove the value at `pointer`. Returns whether anything was removed.
    pub fn delete(&self, name: &str, pointer: &str) -> Result<bool> {
        let pointer = normalize_pointer(pointer);
        self.with_connection(name, false, |db| Ok(db.delete(&pointer)?))
    }

    /// Deep-merge `value` into the value at `pointer`, creating the file if
    /// needed. Objects merge member by member and arrays concatenate.
    pub fn merge(&self, name: &str, pointer: &str, value: Value) -> Result<()> {
        let pointer = normalize_pointer(pointer);
        self.with_connection(name, true, |db| Ok(db.push(&pointer, value, false)?))
    }

    /// Visit the members of the value at `pointer`.
    ///
    /// Arrays yield `(element, Index(i), "{pointer}[i]")`, objects yield
    /// `(member, Key(k), "{pointer}/k")` and any other value is visited once
    /// as `(value, Index(0), pointer)`.
    pub fn for_each<F>(&self, name: &str, pointer: &str, mut callback: F) -> Result<()>
    where
        F: FnMut(&Value, &EntryKey, &str),
    {
        let value = self.get(name, pointer)?;
        let base = normalize_pointer(pointer);
        match &value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    callback(item, &EntryKey::Index(i), &format!("{base}[{i}]"));
                }
            }
            Value::Object(members) => {
                for (key, member) in members {
                    callback(member, &EntryKey::Key(key.clone()), &child_pointer(&base, key));
                }
            }
            other => callback(other, &EntryKey::Index(0), &base),
        }
        Ok(())
    }

    /// Add `value` at the end of the array at `pointer`.
    ///
    /// A non-array value `v` becomes `[v, value]`. See [`Config::push`] for
    /// the front-inserting counterpart.
    pub fn append(&self, name: &str, pointer: &str, value: Value) -> Result<()> {
        let base = normalize_pointer(pointer);
        match self.get_raw(name, &base)? {
            Value::Array(_) => self.set(name, &format!("{base}[]"), value),
            current => self.set(name, &base, Value::Array(vec![current, value])),
        }
    }

    /// Insert `value` at the front of the array at `pointer`.
    ///
    /// Despite the name this prepends: a non-array value `v` becomes
    /// `[value, v]`. Use [`Config::append`] to add at the end.
    pub fn push(&self, name: &str, pointer: &str, value: Value) -> Result<()> {
        let base = normalize_pointer(pointer);
        match self.get_raw(name, &base)? {
            Value::Array(mut items) => {
                items.insert(0, value);
                self.set(name, &base, Value::Array(items))
            }
            current => self.set(name, &base, Value::Array(vec![value, current])),
        }
    }

    /// Remove and return the first element of the array at `pointer`.
    pub fn shift(&self, name: &str, pointer: &str) -> Result<Value> {
        self.take(name, pointer, 0)
    }

    /// Remove and return the last element of the array at `pointer`.
    pub fn pop(&self, name: &str, pointer: &str) -> Result<Value> {
        self.take(name, pointer, -1)
    }

    fn take(&self, name: &str, pointer: &str, index: isize) -> Result<Value> {
        let element = format!("{}[{index}]", normalize_pointer(pointer));
        let value = self.get(name, &element)?;
        self.delete(name, &element)?;
        Ok(value)
    }

    /// Replace the array at `pointer` with an empty one.
    pub fn clear(&self, name: &str, pointer: &str) -> Result<()> {
        let base = normalize_pointer(pointer);
        match self.get_raw(name, &base)? {
            Value::Array(_) => self.set(name, &base, Value::Array(Vec::new())),
            _ => Err(Error::InvalidArgument {
                name: name.to_string(),
                pointer: base,
                message: "configuration value is not an array".to_string(),
            }),
        }
    }

    /// Evaluated manifest value at `pointer`, or `default` on any failure
    /// (including an absent manifest).
    pub fn package_json(&self, pointer: &str, default: Value) -> Value {
        match self
            .manifest
            .read(pointer)
            .and_then(|raw| self.evaluate(&raw))
        {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(pointer, error = %e, "Manifest value unavailable, using default");
                default
            }
        }
    }
}

/// Pointer failures become [`Error::ValueNotFound`]; I/O and parse errors
/// stay storage errors.
fn value_error(name: &str, pointer: &str, source: jsonconf_store::Error) -> Error {
    if source.is_not_found() || matches!(source, jsonconf_store::Error::InvalidPointer { .. }) {
        Error::ValueNotFound {
            name: name.to_string(),
            pointer: pointer.to_string(),
            source,
        }
    } else {
        Error::Store(source)
    }
}

fn child_pointer(base: &str, key: &str) -> String {
    if base == "/" {
        format!("/{key}")
    } else {
        format!("{base}/{key}")
    }
}
