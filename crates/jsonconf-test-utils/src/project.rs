//! [`TestProject`] fixture for configuration scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary project directory with helpers for test setup and assertion.
///
/// # Example
///
/// ```rust
/// use jsonconf_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::new();
/// project.write_config("settings", &json!({"theme": "dark"}));
/// project.assert_file_contains("settings.json", "dark");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `package.json` at the root.
    pub fn with_manifest(self, manifest: &Value) -> Self {
        self.write_json("package.json", manifest);
        self
    }

    /// Create a directory (and parents) relative to the root.
    pub fn with_dir(self, path: &str) -> Self {
        fs::create_dir_all(self.root().join(path)).unwrap();
        self
    }

    /// Path of the file backing configuration `name` in the root directory.
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.root().join(format!("{name}.json"))
    }

    /// Write configuration `name` into the root directory.
    pub fn write_config(&self, name: &str, value: &Value) {
        self.write_json(&format!("{name}.json"), value);
    }

    /// Write `value` as pretty JSON to `path` relative to the root.
    pub fn write_json(&self, path: &str, value: &Value) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    /// Parse the JSON file at `path` relative to the root.
    ///
    /// # Panics
    /// Panics if the file is missing or not valid JSON.
    pub fn read_json(&self, path: &str) -> Value {
        let full_path = self.root().join(path);
        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", full_path.display()))
    }

    /// Parse configuration `name` from the root directory.
    pub fn read_config(&self, name: &str) -> Value {
        self.read_json(&format!("{name}.json"))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
