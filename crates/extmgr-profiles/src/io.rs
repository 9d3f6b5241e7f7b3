//! TOML persistence for profile documents
//!
//! Every read-modify-write of a document happens under a [`DocumentLock`]:
//! an exclusive advisory lock on a `<file>.lock` sibling that outlives the
//! document's own inode, which is replaced on each save.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Exclusive lock over one document, released on drop.
#[derive(Debug)]
pub struct DocumentLock {
    file: File,
    path: PathBuf,
}

impl DocumentLock {
    /// Block until the lock for `document` is held.
    ///
    /// Creates the document's parent directory and the lock file if needed.
    pub fn acquire(document: &Path) -> Result<Self> {
        if let Some(parent) = document.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let path = lock_path(document);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;

        file.lock_exclusive()
            .map_err(|_| Error::LockFailed { path: document.to_path_buf() })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release lock");
        }
    }
}

fn lock_path(document: &Path) -> PathBuf {
    let mut name = document.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    document.with_file_name(name)
}

/// Replace `path` with `content` via a synced temp file and a rename.
///
/// Temp names are unique per call, so concurrent writers in one process never
/// share one. Callers that read before writing hold a [`DocumentLock`].
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = path.with_file_name(format!(
        ".{}.{}-{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(path, e));
    }
    Ok(())
}

/// Load a TOML document, or its default when the file does not exist.
pub fn load_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    toml::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` as TOML and write it atomically.
pub fn save_toml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = toml::to_string_pretty(value).map_err(|source| Error::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, content.as_bytes())
}
