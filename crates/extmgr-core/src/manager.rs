//! ExtensionManager: applies reconciliation plans through an executor.

use extmgr_registry::RegistrySnapshot;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::executor::{BatchKind, BatchOutcome, Executor};
use crate::reconcile::ReconcilePlan;
use crate::resolver::ResolutionResult;

/// Report from applying a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub install: BatchOutcome,
    pub uninstall: BatchOutcome,
    /// Uninstall order that was handed to the executor.
    pub resolution: ResolutionResult,
}

impl ApplyReport {
    /// Whether either batch actually ran.
    pub fn changed(&self) -> bool {
        self.install.executed || self.uninstall.executed
    }
}

/// Drives install and uninstall batches for a target profile.
///
/// # Example
///
/// ```
/// use extmgr_core::{BatchOutcome, Executor, ExtensionManager, Result};
/// use extmgr_registry::{ExtensionRecord, ProtectedList, RegistrySnapshot};
///
/// struct Echo;
///
/// impl Executor for Echo {
///     fn install(&self, ids: &[String]) -> Result<BatchOutcome> {
///         Ok(BatchOutcome::executed(format!("installed {}", ids.join(" "))))
///     }
///
///     fn uninstall(&self, ids: &[String]) -> Result<BatchOutcome> {
///         Ok(BatchOutcome::executed(format!("uninstalled {}", ids.join(" "))))
///     }
/// }
///
/// let snapshot = RegistrySnapshot::new(
///     [
///         ExtensionRecord::new("lib.ext"),
///         ExtensionRecord::new("app.ext").with_dependencies(["lib.ext"]),
///         ExtensionRecord::new("keep.ext"),
///     ],
///     ProtectedList::new(),
/// );
///
/// let manager = ExtensionManager::new(Echo);
/// let report = manager.reconcile(["keep.ext", "new.ext"], &snapshot)?;
///
/// assert!(report.resolution.complete);
/// assert_eq!(report.resolution.ids, ["app.ext", "lib.ext"]);
/// assert_eq!(report.install.message, "installed new.ext");
/// assert_eq!(report.uninstall.message, "uninstalled app.ext lib.ext");
/// # Ok::<(), extmgr_core::Error>(())
/// ```
pub struct ExtensionManager<E> {
    executor: E,
}

impl<E: Executor> ExtensionManager<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Compute the plan for `target` without running anything.
    pub fn plan<I, S>(&self, target: I, snapshot: &RegistrySnapshot) -> ReconcilePlan
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ReconcilePlan::compute(target, snapshot)
    }

    /// Plan and apply in one step.
    pub fn reconcile<I, S>(&self, target: I, snapshot: &RegistrySnapshot) -> Result<ApplyReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let plan = self.plan(target, snapshot);
        self.apply(&plan)
    }

    /// Apply a plan.
    ///
    /// The uninstall order is resolved first. A partial resolution is not an
    /// error: the resolved subset is still uninstalled and the report carries
    /// the diagnostic. The install batch and the uninstall batch target
    /// disjoint ids and run concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first executor error, uninstall before install.
    pub fn apply(&self, plan: &ReconcilePlan) -> Result<ApplyReport> {
        let resolution = plan.uninstall_order();

        tracing::debug!(
            install = plan.to_install.len(),
            uninstall = resolution.ids.len(),
            complete = resolution.complete,
            "Applying reconcile plan"
        );

        let (install, uninstall) = std::thread::scope(|scope| {
            let uninstall = scope.spawn(|| self.run(BatchKind::Uninstall, &resolution.ids));
            let install = self.run(BatchKind::Install, &plan.to_install);
            let uninstall = uninstall
                .join()
                .unwrap_or(Err(Error::ExecutorPanicked(BatchKind::Uninstall)));
            (install, uninstall)
        });

        Ok(ApplyReport {
            uninstall: uninstall?,
            install: install?,
            resolution,
        })
    }

    fn run(&self, kind: BatchKind, ids: &[String]) -> Result<BatchOutcome> {
        if ids.is_empty() {
            return Ok(BatchOutcome::nothing_to_do(kind));
        }
        let outcome = match kind {
            BatchKind::Install => self.executor.install(ids)?,
            BatchKind::Uninstall => self.executor.uninstall(ids)?,
        };
        if outcome.executed {
            tracing::info!(%kind, count = ids.len(), "Batch finished");
        }
        Ok(outcome)
    }
}
