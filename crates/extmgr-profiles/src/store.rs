//! Layered profile storage.
//!
//! The user layer lives in the application config directory and holds the
//! `default` and `global` profiles plus named environments. The workspace
//! layer lives inside the workspace folder and holds only `workspace`.

use std::path::{Path, PathBuf};

use extmgr_registry::normalize_ids;
use tracing::debug;

use crate::io::{DocumentLock, load_toml_or_default, save_toml};
use crate::profiles::{ProfileName, UserProfiles, WorkspaceProfiles, validate_environment_name};
use crate::{Error, Result};

/// File name of the user profiles document.
pub const PROFILES_FILENAME: &str = "profiles.toml";

/// Workspace-relative path of the workspace profile document.
pub const WORKSPACE_PROFILE_PATH: &str = ".vscode/extension-manager.toml";

/// Reads and writes profiles from both layers.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    user_path: PathBuf,
    workspace_path: Option<PathBuf>,
}

impl ProfileStore {
    /// Create a store rooted at an application config directory.
    ///
    /// # Arguments
    ///
    /// * `app_dir` - Directory holding `profiles.toml`, usually from
    ///   [`crate::resolve_app_dir`]
    /// * `workspace_root` - Open workspace, if any
    pub fn new(app_dir: impl AsRef<Path>, workspace_root: Option<&Path>) -> Self {
        Self {
            user_path: app_dir.as_ref().join(PROFILES_FILENAME),
            workspace_path: workspace_root.map(|root| root.join(WORKSPACE_PROFILE_PATH)),
        }
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    pub fn workspace_path(&self) -> Option<&Path> {
        self.workspace_path.as_deref()
    }

    /// Load the user layer with every id-list normalized.
    pub fn load_user(&self) -> Result<UserProfiles> {
        let profiles: UserProfiles = load_toml_or_default(&self.user_path)?;
        Ok(profiles.normalized())
    }

    /// Load the workspace layer with its id-list normalized.
    pub fn load_workspace(&self) -> Result<WorkspaceProfiles> {
        let path = self.workspace_path.as_deref().ok_or(Error::NoWorkspace)?;
        let profiles: WorkspaceProfiles = load_toml_or_default(path)?;
        Ok(profiles.normalized())
    }

    /// Read a profile. `None` means it was never defined.
    pub fn get(&self, name: &ProfileName) -> Result<Option<Vec<String>>> {
        Ok(match name {
            ProfileName::Default => self.load_user()?.default,
            ProfileName::Global => self.load_user()?.global,
            ProfileName::Workspace => self.load_workspace()?.workspace,
            ProfileName::Environment(env) => self.load_user()?.environments.remove(env),
        })
    }

    /// Read a profile, failing if it was never defined.
    pub fn require(&self, name: &ProfileName) -> Result<Vec<String>> {
        self.get(name)?
            .ok_or_else(|| Error::UndefinedProfile(name.to_string()))
    }

    /// Replace a profile's ids and persist the owning layer.
    ///
    /// The owning document stays locked from load to save, so concurrent
    /// writers to other profiles of the same layer are never lost.
    /// Returns the normalized list that was written.
    pub fn set<I, S>(&self, name: &ProfileName, ids: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = normalize_ids(ids);
        debug!(profile = %name, count = ids.len(), "Saving profile");

        match name {
            ProfileName::Workspace => {
                let path = self.workspace_path.as_deref().ok_or(Error::NoWorkspace)?;
                let _lock = DocumentLock::acquire(path)?;
                let mut profiles = self.load_workspace()?;
                profiles.workspace = Some(ids.clone());
                save_toml(path, &profiles)?;
            }
            ProfileName::Default => self.update_user(|p| p.default = Some(ids.clone()))?,
            ProfileName::Global => self.update_user(|p| p.global = Some(ids.clone()))?,
            ProfileName::Environment(env) => {
                let env = validate_environment_name(env)?;
                self.update_user(|p| {
                    p.environments.insert(env, ids.clone());
                })?;
            }
        }
        Ok(ids)
    }

    fn update_user<R>(&self, apply: impl FnOnce(&mut UserProfiles) -> R) -> Result<R> {
        let _lock = DocumentLock::acquire(&self.user_path)?;
        let mut profiles = self.load_user()?;
        let outcome = apply(&mut profiles);
        save_toml(&self.user_path, &profiles)?;
        Ok(outcome)
    }

    /// Names of every saved environment, sorted.
    pub fn environment_names(&self) -> Result<Vec<String>> {
        Ok(self.load_user()?.environments.into_keys().collect())
    }

    /// Remove an environment. Returns whether it existed.
    pub fn delete_environment(&self, name: &str) -> Result<bool> {
        let name = validate_environment_name(name)?;
        if !self.environment_names()?.contains(&name) {
            return Ok(false);
        }
        let removed = self.update_user(|p| p.environments.remove(&name).is_some())?;
        if removed {
            debug!(environment = %name, "Deleted environment");
        }
        Ok(removed)
    }

    /// Target set for `sync`: the workspace profile followed by `global`.
    ///
    /// An undefined layer counts as empty; both undefined is an error. Without
    /// a workspace root only `global` contributes.
    pub fn sync_target(&self) -> Result<Vec<String>> {
        let workspace = match self.workspace_path {
            Some(_) => self.load_workspace()?.workspace,
            None => None,
        };
        let global = self.load_user()?.global;

        if workspace.is_none() && global.is_none() {
            return Err(Error::UndefinedProfile("sync".to_string()));
        }

        Ok(normalize_ids(
            workspace
                .into_iter()
                .flatten()
                .chain(global.into_iter().flatten()),
        ))
    }
}
