//! Read-only registry snapshot and eligibility filtering.

use std::collections::{BTreeSet, HashMap};

use crate::record::{ExtensionRecord, normalize_id};

/// Identifier of the editor-side companion extension for this tool.
///
/// It is always protected: uninstalling it from a profile switch would
/// remove the very thing driving the switch.
pub const SELF_EXTENSION_ID: &str = "joaomrsouza.extension-manager";

/// Allow-list of extension ids that are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedList {
    ids: BTreeSet<String>,
}

impl Default for ProtectedList {
    fn default() -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(SELF_EXTENSION_ID.to_string());
        Self { ids }
    }
}

impl ProtectedList {
    /// Create the default allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the default allow-list extended with `extra` ids.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for id in extra {
            list.insert(id.as_ref());
        }
        list
    }

    /// Add an id to the allow-list.
    pub fn insert(&mut self, id: &str) {
        let id = normalize_id(id);
        if !id.is_empty() {
            self.ids.insert(id);
        }
    }

    /// Check if an id is protected. Comparison is case-insensitive.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(&normalize_id(id))
    }

    /// Iterate protected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Remove every record that must never be mutated.
///
/// Built-in extensions, records flagged protected, and ids on the allow-list
/// are dropped. The relative order of the remaining records is kept.
pub fn filter_eligible(records: &[ExtensionRecord], protected: &ProtectedList) -> Vec<ExtensionRecord> {
    records
        .iter()
        .filter(|r| !(r.is_builtin() || r.is_protected() || protected.contains(r.id())))
        .cloned()
        .collect()
}

/// Ordered, id-indexed view over the currently known extensions.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    records: Vec<ExtensionRecord>,
    index: HashMap<String, usize>,
    protected: ProtectedList,
}

impl RegistrySnapshot {
    /// Build a snapshot from records.
    ///
    /// Records whose id appears on `protected` are flagged protected. When an
    /// id appears twice the first record wins.
    pub fn new(records: impl IntoIterator<Item = ExtensionRecord>, protected: ProtectedList) -> Self {
        let mut snapshot = Self {
            records: Vec::new(),
            index: HashMap::new(),
            protected,
        };
        for record in records {
            snapshot.push(record);
        }
        snapshot
    }

    /// Combine user-installed records with the editor's built-in records.
    ///
    /// User records come first, so a user-installed copy of a built-in
    /// extension shadows the bundled one.
    pub fn from_sources(
        user: Vec<ExtensionRecord>,
        builtin: Vec<ExtensionRecord>,
        protected: ProtectedList,
    ) -> Self {
        Self::new(user.into_iter().chain(builtin), protected)
    }

    fn push(&mut self, mut record: ExtensionRecord) {
        if self.index.contains_key(record.id()) {
            tracing::debug!(id = record.id(), "Ignoring duplicate extension record");
            return;
        }
        if self.protected.contains(record.id()) {
            record.mark_protected();
        }
        self.index.insert(record.id().to_string(), self.records.len());
        self.records.push(record);
    }

    /// Look up a record by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&ExtensionRecord> {
        self.index
            .get(&normalize_id(id))
            .map(|&i| &self.records[i])
    }

    /// Check if an extension is known (case-insensitive).
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&normalize_id(id))
    }

    /// All records in snapshot order.
    pub fn records(&self) -> &[ExtensionRecord] {
        &self.records
    }

    /// All ids in snapshot order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(ExtensionRecord::id).collect()
    }

    /// Records eligible for any mutating operation.
    pub fn eligible(&self) -> Vec<ExtensionRecord> {
        filter_eligible(&self.records, &self.protected)
    }

    /// The allow-list this snapshot was built with.
    pub fn protected(&self) -> &ProtectedList {
        &self.protected
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
