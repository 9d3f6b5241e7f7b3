//! Test doubles shared by the extmgr-core integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use extmgr_core::{BatchKind, BatchOutcome, Error, Executor, Result};

/// Records every batch it receives and reports it as executed.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(BatchKind, Vec<String>)>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(BatchKind, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn batch(&self, kind: BatchKind) -> Option<Vec<String>> {
        self.calls()
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, ids)| ids)
    }

    fn record(&self, kind: BatchKind, ids: &[String]) -> Result<BatchOutcome> {
        self.calls.lock().unwrap().push((kind, ids.to_vec()));
        Ok(BatchOutcome::executed("Task finished"))
    }
}

impl Executor for RecordingExecutor {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.record(BatchKind::Install, ids)
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.record(BatchKind::Uninstall, ids)
    }
}

/// Fails every batch of one kind.
pub struct FailingExecutor {
    pub fails: BatchKind,
}

impl Executor for FailingExecutor {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        if self.fails == BatchKind::Install {
            return Err(Error::BatchFailed {
                kind: BatchKind::Install,
                count: ids.len(),
                exit_code: Some(1),
            });
        }
        Ok(BatchOutcome::executed("Task finished"))
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        if self.fails == BatchKind::Uninstall {
            return Err(Error::BatchFailed {
                kind: BatchKind::Uninstall,
                count: ids.len(),
                exit_code: Some(1),
            });
        }
        Ok(BatchOutcome::executed("Task finished"))
    }
}
