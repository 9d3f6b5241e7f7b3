//! Reconciliation of the installed set against a target profile.

use std::collections::{BTreeSet, HashSet};

use extmgr_registry::{ExtensionRecord, RegistrySnapshot, filter_eligible, normalize_ids};
use serde::Serialize;

use crate::resolver::{ResolutionResult, resolve_uninstall_order};

/// What it takes to move the installed set to a target profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    /// Normalized, de-duplicated target ids.
    pub target: Vec<String>,
    /// Target ids that are not installed, in target order.
    pub to_install: Vec<String>,
    /// Installed, eligible extensions outside the target, in snapshot order.
    pub to_uninstall: Vec<ExtensionRecord>,
    /// Installed ids outside the target kept because a wanted extension
    /// requires them, sorted.
    pub retained_dependencies: Vec<String>,
}

impl ReconcilePlan {
    /// Compute the plan for `target` against `snapshot`.
    ///
    /// `to_install = target − installed`.
    /// `to_uninstall = installed − target − protected_dependencies(target)`,
    /// then filtered for eligibility.
    pub fn compute<I, S>(target: I, snapshot: &RegistrySnapshot) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let target = normalize_ids(target);
        let wanted: HashSet<&str> = target.iter().map(String::as_str).collect();
        let required = protected_dependencies(&target, snapshot);

        let to_install = target
            .iter()
            .filter(|id| !snapshot.contains(id))
            .cloned()
            .collect();

        let (retained, removable): (Vec<&ExtensionRecord>, Vec<&ExtensionRecord>) = snapshot
            .records()
            .iter()
            .filter(|r| !wanted.contains(r.id()))
            .partition(|r| required.contains(r.id()));

        let removable: Vec<ExtensionRecord> = removable.into_iter().cloned().collect();
        let to_uninstall = filter_eligible(&removable, snapshot.protected());

        let mut retained_dependencies: Vec<String> =
            retained.iter().map(|r| r.id().to_string()).collect();
        retained_dependencies.sort();

        Self {
            target,
            to_install,
            to_uninstall,
            retained_dependencies,
        }
    }

    /// Whether applying the plan would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty() && self.to_uninstall.is_empty()
    }

    /// Ids of `to_uninstall`, unordered.
    pub fn uninstall_ids(&self) -> Vec<&str> {
        self.to_uninstall.iter().map(ExtensionRecord::id).collect()
    }

    /// Safe order for `to_uninstall`.
    pub fn uninstall_order(&self) -> ResolutionResult {
        resolve_uninstall_order(&self.to_uninstall)
    }
}

/// Ids that must survive because a wanted extension requires them.
///
/// One level only: the union of the `dependencies` declared by each wanted
/// extension that is installed. A dependency of a dependency is not kept.
pub fn protected_dependencies(target: &[String], snapshot: &RegistrySnapshot) -> BTreeSet<String> {
    target
        .iter()
        .filter_map(|id| snapshot.get(id))
        .flat_map(|record| record.dependencies().iter().cloned())
        .collect()
}
