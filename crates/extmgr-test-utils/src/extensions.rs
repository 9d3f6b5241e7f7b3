//! [`ExtensionsDir`] builder for fake editor extension installs.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// A temporary directory laid out like the editor's extensions folder.
///
/// # Example
///
/// ```rust
/// use extmgr_test_utils::ExtensionsDir;
///
/// let dir = ExtensionsDir::new();
/// dir.add("ms-python.python", "2024.1.0", &["ms-python.vscode-pylance"], &[]);
/// assert!(dir.path().join("ms-python.python-2024.1.0/package.json").exists());
/// ```
pub struct ExtensionsDir {
    root: Root,
}

enum Root {
    Owned(TempDir),
    Borrowed(PathBuf),
}

impl Default for ExtensionsDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionsDir {
    /// Create an empty extensions directory in a fresh temp dir.
    pub fn new() -> Self {
        Self {
            root: Root::Owned(TempDir::new().expect("ExtensionsDir::new: failed to create temp dir")),
        }
    }

    /// Use an existing directory (created if missing).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        fs::create_dir_all(&path).expect("ExtensionsDir::at: failed to create directory");
        Self {
            root: Root::Borrowed(path),
        }
    }

    /// Root path of the extensions directory.
    pub fn path(&self) -> &Path {
        match &self.root {
            Root::Owned(temp) => temp.path(),
            Root::Borrowed(path) => path,
        }
    }

    /// Install a fake extension and return its folder name.
    ///
    /// `id` is `<publisher>.<name>`; the case is written as given so tests
    /// can exercise normalization.
    pub fn add(&self, id: &str, version: &str, dependencies: &[&str], pack: &[&str]) -> String {
        let (publisher, name) = id
            .split_once('.')
            .expect("ExtensionsDir::add: id must be <publisher>.<name>");

        let mut manifest = Map::new();
        manifest.insert("name".into(), json!(name));
        manifest.insert("publisher".into(), json!(publisher));
        manifest.insert("version".into(), json!(version));
        manifest.insert("engines".into(), json!({ "vscode": "^1.80.0" }));
        if !dependencies.is_empty() {
            manifest.insert("extensionDependencies".into(), json!(dependencies));
        }
        if !pack.is_empty() {
            manifest.insert("extensionPack".into(), json!(pack));
        }

        let folder = format!("{}-{}", id.to_lowercase(), version);
        let content = serde_json::to_string_pretty(&Value::Object(manifest))
            .expect("ExtensionsDir::add: failed to serialize manifest");
        self.add_raw(&folder, &content);
        folder
    }

    /// Write an arbitrary `package.json` into `folder`.
    pub fn add_raw(&self, folder: &str, manifest: &str) {
        let dir = self.path().join(folder);
        fs::create_dir_all(&dir).expect("ExtensionsDir::add_raw: failed to create folder");
        fs::write(dir.join("package.json"), manifest)
            .expect("ExtensionsDir::add_raw: failed to write manifest");
    }

    /// Record `folder` in the `.obsolete` list.
    pub fn mark_obsolete(&self, folder: &str) {
        let path = self.path().join(".obsolete");
        let mut entries: Map<String, Value> = fs::read_to_string(&path)
            .ok()
            .and_then(|c| serde_json::from_str(&c).ok())
            .unwrap_or_default();
        entries.insert(folder.to_string(), Value::Bool(true));
        fs::write(&path, Value::Object(entries).to_string())
            .expect("ExtensionsDir::mark_obsolete: failed to write .obsolete");
    }
}
