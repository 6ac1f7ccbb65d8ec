//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes and repeated separators collapse to
/// one, except for a leading `//` which marks a network path. Conversion to
/// the platform-native form happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// An empty or `.` segment leaves the path unchanged.
    pub fn join(&self, segment: &str) -> Self {
        if segment.is_empty() || segment == "." {
            return self.clone();
        }
        let joined = if self.inner.is_empty() || self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Resolve this path against `base` when it is relative.
    pub fn resolve_against(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(&self.inner)
        }
    }

    /// Canonicalize through the filesystem when the path exists.
    ///
    /// Uses `dunce` so Windows paths stay free of the `\\?\` prefix.
    /// Returns the path unchanged when it cannot be canonicalized.
    pub fn canonicalize_lossy(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(canonical) => Self::new(canonical),
            Err(_) => self.clone(),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    pub fn is_absolute(&self) -> bool {
        self.to_native().is_absolute() || self.inner.starts_with('/')
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Normalize separators: backslashes to slashes, runs of slashes collapsed.
fn clean(raw: &str) -> String {
    let replaced = raw.replace('\\', "/");
    let network = replaced.starts_with("//") && !replaced.starts_with("///");
    let (prefix, rest) = if network {
        ("//", &replaced[2..])
    } else {
        ("", replaced.as_str())
    };

    let mut out = String::with_capacity(replaced.len());
    out.push_str(prefix);
    let mut previous_slash = network;
    for ch in rest.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    out
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
