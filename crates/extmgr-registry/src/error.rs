//! Error types for extmgr-registry

use std::path::PathBuf;

/// Result type for extmgr-registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a registry snapshot
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The extensions directory does not exist or is not a directory.
    #[error("extensions directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// I/O error while reading the extensions directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An extension manifest could not be parsed.
    #[error("failed to parse extension manifest at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An extension manifest is missing the fields needed to build an id.
    #[error("extension manifest at {path} has no publisher or name")]
    MissingIdentity { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
