//! Tool settings and platform directories.

use std::path::{Path, PathBuf};

use extmgr_registry::ProtectedList;
use serde::{Deserialize, Serialize};

use crate::io::load_toml_or_default;
use crate::{Error, Result};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "extension-manager";

/// File name of the settings document.
pub const SETTINGS_FILENAME: &str = "config.toml";

/// Editor CLI used when nothing else is configured.
pub const DEFAULT_EDITOR_COMMAND: &str = "code";

/// Resolve the application config directory.
///
/// `base_override` replaces the platform directory from
/// `dirs::config_dir()`; the application sub-directory is appended in both
/// cases.
pub fn resolve_app_dir(base_override: Option<&Path>) -> Result<PathBuf> {
    let base = match base_override {
        Some(dir) => dir.to_path_buf(),
        None => dirs::config_dir().ok_or(Error::NoConfigDir)?,
    };
    Ok(base.join(APP_DIR_NAME))
}

/// The editor's default per-user extensions directory.
pub fn default_extensions_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vscode").join("extensions"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// How to reach the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Editor CLI command.
    pub command: String,
    /// Per-user extensions directory.
    pub extensions_dir: Option<PathBuf>,
    /// Directory of extensions shipped with the editor.
    pub builtin_dir: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_EDITOR_COMMAND.to_string(),
            extensions_dir: None,
            builtin_dir: None,
        }
    }
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor: EditorSettings,
    /// Extra ids that are never installed or uninstalled.
    pub protected: Vec<String>,
}

impl Settings {
    pub fn path(app_dir: &Path) -> PathBuf {
        app_dir.join(SETTINGS_FILENAME)
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load(app_dir: &Path) -> Result<Self> {
        load_toml_or_default(&Self::path(app_dir))
    }

    /// Allow-list built from the built-in entries plus `protected`.
    pub fn protected_list(&self) -> ProtectedList {
        ProtectedList::with_extra(&self.protected)
    }

    /// Configured extensions directory, or the editor's default.
    pub fn extensions_dir(&self) -> Option<PathBuf> {
        match &self.editor.extensions_dir {
            Some(dir) => Some(expand_home(dir)),
            None => default_extensions_dir(),
        }
    }

    pub fn builtin_dir(&self) -> Option<PathBuf> {
        self.editor.builtin_dir.as_deref().map(expand_home)
    }
}
