//! Extension records and id normalization.
//!
//! Extension ids are case-insensitive. Every id that enters the system goes
//! through [`normalize_id`] exactly once, when the record is built, so the
//! rest of the workspace can compare ids with plain string equality.
//!
//! # Example
//!
//! ```
//! use extmgr_registry::ExtensionRecord;
//!
//! let record = ExtensionRecord::new("Publisher.Theme-Pack")
//!     .with_pack_members(["Publisher.Dark", "publisher.LIGHT"]);
//!
//! assert_eq!(record.id(), "publisher.theme-pack");
//! assert!(record.bundles("publisher.dark"));
//! assert!(record.bundles("publisher.light"));
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

/// Normalize an extension id to its canonical form (trimmed, lower-case).
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Normalize a list of ids, dropping blanks and duplicates.
///
/// The first occurrence of each id wins, so the input order is preserved.
pub fn normalize_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(|id| normalize_id(id.as_ref()))
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

/// One installed (or installable) extension.
///
/// `dependencies` are hard requirements: the extension cannot work without
/// them. `pack_members` are a soft grouping: a pack exists to install other
/// extensions but none of them need the pack to function.
///
/// Referenced ids may be absent from the registry. A record never lists
/// itself as a dependency or pack member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionRecord {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    is_builtin: bool,
    protected: bool,
    dependencies: BTreeSet<String>,
    pack_members: BTreeSet<String>,
}

impl ExtensionRecord {
    /// Create a record with no relations.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: normalize_id(id.as_ref()),
            version: None,
            is_builtin: false,
            protected: false,
            dependencies: BTreeSet::new(),
            pack_members: BTreeSet::new(),
        }
    }

    /// Set the manifest version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add hard dependencies.
    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let own = self.id.clone();
        self.dependencies
            .extend(normalize_ids(ids).into_iter().filter(|id| *id != own));
        self
    }

    /// Add pack members.
    pub fn with_pack_members<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let own = self.id.clone();
        self.pack_members
            .extend(normalize_ids(ids).into_iter().filter(|id| *id != own));
        self
    }

    /// Mark the record as shipped with the editor.
    pub fn with_builtin(mut self, builtin: bool) -> Self {
        self.is_builtin = builtin;
        self
    }

    /// Mark the record as protected from mutation.
    pub fn with_protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub fn pack_members(&self) -> &BTreeSet<String> {
        &self.pack_members
    }

    /// Whether this extension declares a hard dependency on `id`.
    ///
    /// `id` must already be normalized.
    pub fn requires(&self, id: &str) -> bool {
        self.dependencies.contains(id)
    }

    /// Whether this extension bundles `id` as a pack member.
    ///
    /// `id` must already be normalized.
    pub fn bundles(&self, id: &str) -> bool {
        self.pack_members.contains(id)
    }

    /// Whether this extension is a pack.
    pub fn is_pack(&self) -> bool {
        !self.pack_members.is_empty()
    }

    pub(crate) fn mark_protected(&mut self) {
        self.protected = true;
    }
}
