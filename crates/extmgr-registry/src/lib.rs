//! Installed extension registry for Extension Manager
//!
//! This crate is the leaf of the workspace. It provides:
//!
//! - [`ExtensionRecord`]: one extension with its declared hard dependencies
//!   and pack members, normalized to lower-case ids on construction
//! - [`RegistrySnapshot`]: an ordered, read-only view over a set of records
//! - [`filter_eligible`]: drops built-in and protected extensions from any
//!   set that is about to be mutated
//! - [`scan_extensions_dir`]: ingestion of an editor extensions directory

pub mod error;
pub mod record;
pub mod scan;
pub mod snapshot;

pub use error::{Error, Result};
pub use record::{ExtensionRecord, normalize_id, normalize_ids};
pub use scan::{PackageManifest, scan_extensions_dir};
pub use snapshot::{ProtectedList, RegistrySnapshot, SELF_EXTENSION_ID, filter_eligible};
