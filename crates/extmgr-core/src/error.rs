//! Error types for extmgr-core

use crate::executor::BatchKind;

/// Result type for extmgr-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying a reconciliation.
///
/// Resolution itself never fails; these come from the executor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The editor command could not be started.
    #[error("editor command '{command}' could not be started: {source}")]
    EditorNotFound {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The editor command ran but reported failure.
    #[error("{kind} batch of {count} extension(s) failed with exit code {}", describe_exit(.exit_code))]
    BatchFailed {
        kind: BatchKind,
        count: usize,
        exit_code: Option<i32>,
    },

    /// A batch thread panicked.
    #[error("{0} batch panicked")]
    ExecutorPanicked(BatchKind),
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}
