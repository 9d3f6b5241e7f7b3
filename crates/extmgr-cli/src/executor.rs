//! Executors that drive the editor's command line.

use std::process::{Command, Stdio};

use colored::Colorize;
use extmgr_core::{BatchKind, BatchOutcome, Error, Executor, Result};

/// Build a command for the editor CLI.
///
/// On Windows the editor CLI is a `.cmd` shim, which only resolves through
/// `cmd /C`.
fn editor_command(program: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", program]);
        c
    }
    #[cfg(not(windows))]
    {
        Command::new(program)
    }
}

fn batch_flag(kind: BatchKind) -> &'static str {
    match kind {
        BatchKind::Install => "--install-extension",
        BatchKind::Uninstall => "--uninstall-extension",
    }
}

/// Arguments for one batch: the flag repeated before every id.
pub fn batch_args(kind: BatchKind, ids: &[String]) -> Vec<String> {
    let flag = batch_flag(kind);
    ids.iter()
        .flat_map(|id| [flag.to_string(), id.clone()])
        .collect()
}

/// Runs batches through the editor CLI, one process per batch.
///
/// Stdio is inherited so the editor's own progress output is visible.
#[derive(Debug, Clone)]
pub struct CodeCli {
    program: String,
}

impl CodeCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, kind: BatchKind, ids: &[String]) -> Result<BatchOutcome> {
        if ids.is_empty() {
            return Ok(BatchOutcome::nothing_to_do(kind));
        }

        tracing::debug!(program = %self.program, %kind, count = ids.len(), "Running editor");

        let status = editor_command(&self.program)
            .args(batch_args(kind, ids))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::EditorNotFound {
                command: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::BatchFailed {
                kind,
                count: ids.len(),
                exit_code: status.code(),
            });
        }

        Ok(BatchOutcome::executed(format!(
            "Ran {kind} for {} extension(s)",
            ids.len()
        )))
    }
}

impl Executor for CodeCli {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.run(BatchKind::Install, ids)
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.run(BatchKind::Uninstall, ids)
    }
}

/// Prints the command each batch would run and runs nothing.
#[derive(Debug, Clone)]
pub struct DryRun {
    program: String,
}

impl DryRun {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The command line that would be run.
    pub fn describe(&self, kind: BatchKind, ids: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(batch_args(kind, ids));
        parts.join(" ")
    }

    fn run(&self, kind: BatchKind, ids: &[String]) -> Result<BatchOutcome> {
        if ids.is_empty() {
            return Ok(BatchOutcome::nothing_to_do(kind));
        }
        println!(
            "   {} {}",
            "Would run:".dimmed(),
            self.describe(kind, ids).cyan()
        );
        Ok(BatchOutcome::skipped(format!(
            "Dry run: would {kind} {} extension(s)",
            ids.len()
        )))
    }
}

impl Executor for DryRun {
    fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.run(BatchKind::Install, ids)
    }

    fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
        self.run(BatchKind::Uninstall, ids)
    }
}
