//! Core orchestration layer for Extension Manager
//!
//! This crate turns a target profile into concrete work:
//!
//! - **Resolver**: safe uninstall order under hard dependencies and packs,
//!   with a bounded loop and a partial result for cycles
//! - **Reconciliation**: install and uninstall sets for a target profile
//! - **ExtensionManager**: runs both batches through an injected [`Executor`]
//!
//! # Architecture
//!
//! ```text
//!            extmgr-cli
//!                |
//!           extmgr-core ---- Executor (editor CLI, dry-run, test doubles)
//!                |
//!         extmgr-registry
//! ```

pub mod error;
pub mod executor;
pub mod manager;
pub mod reconcile;
pub mod resolver;

pub use error::{Error, Result};
pub use executor::{BatchKind, BatchOutcome, Executor};
pub use manager::{ApplyReport, ExtensionManager};
pub use reconcile::{ReconcilePlan, protected_dependencies};
pub use resolver::{ResolutionResult, UNRESOLVED_MESSAGE, UninstallGraph, resolve_uninstall_order};
