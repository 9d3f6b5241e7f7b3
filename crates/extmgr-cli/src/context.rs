//! Per-invocation context: resolved paths, settings and the profile store.
//!
//! Flags win over `config.toml`, which wins over the platform defaults.

use std::path::PathBuf;

use extmgr_core::Executor;
use extmgr_profiles::{ProfileStore, Settings, resolve_app_dir};
use extmgr_registry::{RegistrySnapshot, scan_extensions_dir};

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};
use crate::executor::{CodeCli, DryRun};

/// Everything a command needs to talk to the editor and the profile store.
#[derive(Debug)]
pub struct AppContext {
    pub store: ProfileStore,
    pub settings: Settings,
    pub extensions_dir: PathBuf,
    pub builtin_dir: Option<PathBuf>,
    pub editor_command: String,
    /// Skip confirmations.
    pub assume_yes: bool,
}

impl AppContext {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let app_dir = resolve_app_dir(args.config_dir.as_deref())?;
        let settings = Settings::load(&app_dir)?;

        let workspace = match &args.workspace {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let store = ProfileStore::new(&app_dir, Some(workspace.as_path()));

        let extensions_dir = args
            .extensions_dir
            .clone()
            .or_else(|| settings.extensions_dir())
            .ok_or_else(|| {
                CliError::user("Could not determine the extensions directory; pass --extensions-dir")
            })?;
        let builtin_dir = args.builtin_dir.clone().or_else(|| settings.builtin_dir());
        let editor_command = args
            .code
            .clone()
            .unwrap_or_else(|| settings.editor.command.clone());

        tracing::debug!(
            app_dir = %app_dir.display(),
            workspace = %workspace.display(),
            extensions_dir = %extensions_dir.display(),
            editor = %editor_command,
            "Resolved context"
        );

        Ok(Self {
            store,
            settings,
            extensions_dir,
            builtin_dir,
            editor_command,
            assume_yes: args.yes,
        })
    }

    /// Scan the extension directories into a snapshot.
    pub fn snapshot(&self) -> Result<RegistrySnapshot> {
        let user = scan_extensions_dir(&self.extensions_dir, false)?;
        let builtin = match &self.builtin_dir {
            Some(dir) => scan_extensions_dir(dir, true)?,
            None => Vec::new(),
        };
        Ok(RegistrySnapshot::from_sources(
            user,
            builtin,
            self.settings.protected_list(),
        ))
    }

    /// Ids of every installed extension that may be saved into a profile.
    pub fn eligible_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshot()?
            .eligible()
            .iter()
            .map(|r| r.id().to_string())
            .collect())
    }

    /// Executor for a run, real or dry.
    pub fn executor(&self, dry_run: bool) -> Box<dyn Executor> {
        if dry_run {
            Box::new(DryRun::new(&self.editor_command))
        } else {
            Box::new(CodeCli::new(&self.editor_command))
        }
    }
}
