//! Uninstall-order resolution for extension sets.
//!
//! Removing extensions is the mirror image of installing them. An extension
//! that other candidates *require* must outlive all of them, so it is removed
//! after its dependents. A pack is only a convenience bundle: nobody needs it
//! to function, so it is removed once every member it bundles is gone.
//!
//! Relations are evaluated against the candidate set only. Ids outside the
//! set (already removed, never installed, or staying) impose no constraint.
//!
//! # Algorithm
//!
//! Resolution proceeds in passes. Each pass evaluates every unsettled node
//! against the nodes settled by *previous* passes, collects the eligible
//! ones in input order, and only then commits them. Results are therefore
//! independent of scan order within a pass.
//!
//! A pass that settles nothing is a fixpoint: the remaining nodes form a
//! cycle (or hang off one) and will never become eligible. Resolution stops
//! there and reports a partial result.
//!
//! # Example
//!
//! ```
//! use extmgr_core::resolver::resolve_uninstall_order;
//! use extmgr_registry::ExtensionRecord;
//!
//! let candidates = vec![
//!     ExtensionRecord::new("ms-python.vscode-pylance"),
//!     ExtensionRecord::new("ms-python.python").with_dependencies(["ms-python.vscode-pylance"]),
//! ];
//!
//! let result = resolve_uninstall_order(&candidates);
//! assert!(result.complete);
//! assert_eq!(result.ids, vec!["ms-python.python", "ms-python.vscode-pylance"]);
//! ```

use std::collections::HashMap;

use extmgr_registry::ExtensionRecord;
use serde::Serialize;

/// Message attached to a partial resolution.
pub const UNRESOLVED_MESSAGE: &str = "dependency graph could not be fully resolved; \
    resolve remaining extensions manually or retry after removing the resolved subset";

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Ids in the order they can be safely uninstalled.
    pub ids: Vec<String>,
    /// Whether every candidate was ordered.
    pub complete: bool,
    /// Diagnostic for a partial result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Candidates left out of `ids`, in input order.
    pub unresolved: Vec<String>,
    /// Number of passes performed.
    pub passes: usize,
}

impl ResolutionResult {
    /// An empty, complete result.
    pub fn empty() -> Self {
        Self {
            ids: Vec::new(),
            complete: true,
            message: None,
            unresolved: Vec::new(),
            passes: 0,
        }
    }

    /// Position of `id` in the uninstall order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }
}

/// Working state for one candidate.
#[derive(Debug)]
struct ResolutionNode<'a> {
    record: &'a ExtensionRecord,
    settled: bool,
}

/// Graph of uninstall constraints between candidates.
///
/// Built fresh for each resolution and consumed by [`UninstallGraph::resolve`].
#[derive(Debug)]
pub struct UninstallGraph<'a> {
    nodes: Vec<ResolutionNode<'a>>,
    index: HashMap<&'a str, usize>,
    /// `dependents[i]`: candidates that require node `i`, in input order.
    dependents: Vec<Vec<usize>>,
    /// `pack[i]`: candidates bundled by node `i`.
    pack: Vec<Vec<usize>>,
}

impl<'a> UninstallGraph<'a> {
    /// Build the graph for a candidate list.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn new(candidates: &'a [ExtensionRecord]) -> Self {
        let mut nodes = Vec::with_capacity(candidates.len());
        let mut index = HashMap::with_capacity(candidates.len());

        for record in candidates {
            if index.contains_key(record.id()) {
                tracing::warn!(id = record.id(), "Duplicate uninstall candidate ignored");
                continue;
            }
            index.insert(record.id(), nodes.len());
            nodes.push(ResolutionNode {
                record,
                settled: false,
            });
        }

        let mut dependents = vec![Vec::new(); nodes.len()];
        let mut pack = vec![Vec::new(); nodes.len()];

        for (i, node) in nodes.iter().enumerate() {
            for dep in node.record.dependencies() {
                if let Some(&target) = index.get(dep.as_str()) {
                    dependents[target].push(i);
                }
            }
            pack[i] = node
                .record
                .pack_members()
                .iter()
                .filter_map(|member| index.get(member.as_str()).copied())
                .collect();
        }

        Self {
            nodes,
            index,
            dependents,
            pack,
        }
    }

    /// Number of distinct candidates.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Candidates that require `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&i| self.dependents[i].iter().map(|&d| self.nodes[d].record.id()).collect())
            .unwrap_or_default()
    }

    /// Candidates bundled by `id`.
    pub fn pack_of(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&i| self.pack[i].iter().map(|&m| self.nodes[m].record.id()).collect())
            .unwrap_or_default()
    }

    /// Whether node `i` can go, given the nodes settled so far.
    ///
    /// A node nobody requires can go once every pack member it bundles has
    /// gone. A required node can go once every dependent has gone.
    fn is_eligible(&self, i: usize) -> bool {
        let dependents = &self.dependents[i];
        if dependents.is_empty() {
            self.pack[i].iter().all(|&m| self.nodes[m].settled)
        } else {
            dependents.iter().all(|&d| self.nodes[d].settled)
        }
    }

    /// Compute the uninstall order.
    pub fn resolve(mut self) -> ResolutionResult {
        let total = self.nodes.len();
        if total == 0 {
            return ResolutionResult::empty();
        }

        let max_passes = 2 * total;
        let mut order: Vec<usize> = Vec::with_capacity(total);
        let mut passes = 0;

        while order.len() < total && passes < max_passes {
            passes += 1;

            let batch: Vec<usize> = (0..total)
                .filter(|&i| !self.nodes[i].settled && self.is_eligible(i))
                .collect();

            if batch.is_empty() {
                tracing::debug!(pass = passes, "No progress, stopping resolution");
                break;
            }

            for &i in &batch {
                self.nodes[i].settled = true;
            }
            tracing::debug!(
                pass = passes,
                settled = ?batch.iter().map(|&i| self.nodes[i].record.id()).collect::<Vec<_>>(),
                "Resolution pass"
            );
            order.extend(batch);
        }

        let ids: Vec<String> = order
            .iter()
            .map(|&i| self.nodes[i].record.id().to_string())
            .collect();

        if order.len() == total {
            return ResolutionResult {
                ids,
                complete: true,
                message: None,
                unresolved: Vec::new(),
                passes,
            };
        }

        let unresolved: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| !n.settled)
            .map(|n| n.record.id().to_string())
            .collect();
        tracing::warn!(
            resolved = ids.len(),
            unresolved = ?unresolved,
            "Uninstall order only partially resolved"
        );

        ResolutionResult {
            ids,
            complete: false,
            message: Some(UNRESOLVED_MESSAGE.to_string()),
            unresolved,
            passes,
        }
    }
}

/// Compute a safe uninstall order for `candidates`.
///
/// `candidates` must already be filtered with
/// [`extmgr_registry::filter_eligible`]. Never fails: an irreducible cycle
/// yields a partial result with `complete == false`.
pub fn resolve_uninstall_order(candidates: &[ExtensionRecord]) -> ResolutionResult {
    UninstallGraph::new(candidates).resolve()
}
