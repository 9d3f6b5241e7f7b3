//! Ingestion of an editor extensions directory.
//!
//! The editor installs each extension into its own folder, named
//! `<publisher>.<name>-<version>`, with a `package.json` manifest at the
//! folder root. Folders the editor has already scheduled for deletion are
//! listed in a `.obsolete` JSON file next to them.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::record::ExtensionRecord;

/// Manifest file name inside every extension folder.
pub const MANIFEST_FILENAME: &str = "package.json";

/// File listing folders pending deletion.
pub const OBSOLETE_FILENAME: &str = ".obsolete";

/// The subset of an extension's `package.json` this tool cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub publisher: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub is_builtin: bool,
    #[serde(default)]
    pub extension_dependencies: Vec<String>,
    #[serde(default)]
    pub extension_pack: Vec<String>,
}

impl PackageManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Load a manifest from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content).map_err(|source| Error::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The `<publisher>.<name>` identifier, if both parts are present.
    pub fn id(&self) -> Option<String> {
        match (self.publisher.as_deref(), self.name.as_deref()) {
            (Some(publisher), Some(name)) if !publisher.trim().is_empty() && !name.trim().is_empty() => {
                Some(format!("{}.{}", publisher.trim(), name.trim()))
            }
            _ => None,
        }
    }

    /// Convert into a normalized record.
    ///
    /// `builtin` forces the built-in flag regardless of the manifest.
    pub fn into_record(self, path: &Path, builtin: bool) -> Result<ExtensionRecord> {
        let id = self.id().ok_or_else(|| Error::MissingIdentity {
            path: path.to_path_buf(),
        })?;
        let mut record = ExtensionRecord::new(id)
            .with_builtin(builtin || self.is_builtin)
            .with_dependencies(&self.extension_dependencies)
            .with_pack_members(&self.extension_pack);
        if let Some(version) = self.version {
            record = record.with_version(version);
        }
        Ok(record)
    }
}

/// Scan an extensions directory and build one record per extension.
///
/// Folders without a manifest are ignored. Malformed manifests are skipped
/// with a warning. When several folders hold the same extension the highest
/// version wins. The result is sorted by id.
///
/// # Errors
///
/// Returns [`Error::DirectoryNotFound`] if `dir` is not a directory, or
/// [`Error::Io`] if it cannot be listed.
pub fn scan_extensions_dir(dir: &Path, builtin: bool) -> Result<Vec<ExtensionRecord>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let obsolete = read_obsolete(dir);

    let mut folders: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    let mut found: BTreeMap<String, ExtensionRecord> = BTreeMap::new();

    for folder in folders {
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if obsolete.get(&folder_name).copied().unwrap_or(false) {
            tracing::debug!(folder = %folder_name, "Skipping obsolete extension folder");
            continue;
        }

        let manifest_path = folder.join(MANIFEST_FILENAME);
        if !manifest_path.is_file() {
            continue;
        }

        let record = match PackageManifest::from_path(&manifest_path)
            .and_then(|m| m.into_record(&manifest_path, builtin))
        {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable extension manifest");
                continue;
            }
        };

        match found.get(record.id()) {
            Some(existing) if !is_newer(record.version(), existing.version()) => {
                tracing::debug!(id = record.id(), folder = %folder_name, "Ignoring older copy");
            }
            _ => {
                found.insert(record.id().to_string(), record);
            }
        }
    }

    tracing::debug!(dir = %dir.display(), count = found.len(), "Scanned extensions directory");
    Ok(found.into_values().collect())
}

fn read_obsolete(dir: &Path) -> HashMap<String, bool> {
    let path = dir.join(OBSOLETE_FILENAME);
    let Ok(content) = fs::read_to_string(&path) else {
        return HashMap::new();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed obsolete list");
        HashMap::new()
    })
}

/// Whether `candidate` is a strictly higher version than `current`.
///
/// A parseable version beats an unparseable one. Ties keep `current`.
fn is_newer(candidate: Option<&str>, current: Option<&str>) -> bool {
    let parse = |v: Option<&str>| v.and_then(|s| semver::Version::parse(s.trim()).ok());
    match (parse(candidate), parse(current)) {
        (Some(a), Some(b)) => a > b,
        (Some(_), None) => true,
        _ => false,
    }
}
