//! Injected capability for installing and uninstalling extension batches.
//!
//! The manager never spawns processes itself. The CLI supplies an executor
//! that shells out to the editor, tests supply a recording one.

use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// Which kind of batch is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    Install,
    Uninstall,
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Result of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    /// True iff the batch was non-empty and actually ran.
    pub executed: bool,
    pub message: String,
}

impl BatchOutcome {
    /// A batch that ran.
    pub fn executed(message: impl Into<String>) -> Self {
        Self {
            executed: true,
            message: message.into(),
        }
    }

    /// A batch that did nothing.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            executed: false,
            message: message.into(),
        }
    }

    /// Outcome reported for an empty batch.
    pub fn nothing_to_do(kind: BatchKind) -> Self {
        Self::skipped(format!("No extensions to {kind}"))
    }
}

/// Runs install and uninstall batches.
///
/// Implementations must be idempotent: running a batch whose ids are already
/// in the requested state is a no-op. The manager may run one install batch
/// and one uninstall batch at the same time, hence the `Sync` bound.
pub trait Executor: Sync {
    /// Install every id in `ids`.
    fn install(&self, ids: &[String]) -> Result<BatchOutcome>;

    /// Uninstall `ids`, in the given order.
    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome>;
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        (**self).install(ids)
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        (**self).uninstall(ids)
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        (**self).install(ids)
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        (**self).uninstall(ids)
    }
}
