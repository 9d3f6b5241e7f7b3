//! Error types for extmgr-profiles

use std::path::PathBuf;

/// Result type for extmgr-profiles operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing profiles and settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// No platform configuration directory and no override given.
    #[error("Could not determine the configuration directory; pass --config-dir")]
    NoConfigDir,

    /// A workspace profile was requested without a workspace root.
    #[error("No workspace is open; the workspace profile is unavailable")]
    NoWorkspace,

    #[error("Invalid environment name '{name}': {reason}")]
    InvalidEnvironmentName { name: String, reason: String },

    /// The profile exists as a name but was never saved.
    #[error("Profile '{0}' has not been defined yet")]
    UndefinedProfile(String),

    #[error("Unknown profile '{0}' (expected default, workspace, global or env:<name>)")]
    UnknownProfile(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
