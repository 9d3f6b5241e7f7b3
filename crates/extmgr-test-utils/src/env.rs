//! [`TestEnv`]: an isolated set of directories for end-to-end scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::extensions::ExtensionsDir;

/// Temporary config, workspace and extensions roots under one temp dir.
///
/// # Example
///
/// ```rust,no_run
/// use extmgr_test_utils::TestEnv;
///
/// let env = TestEnv::new();
/// env.extensions().add("a.ext", "1.0.0", &[], &[]);
/// env.write_user_profiles("default = [\"a.ext\"]\n");
/// ```
pub struct TestEnv {
    temp_dir: TempDir,
    extensions: ExtensionsDir,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// Create the directory skeleton.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestEnv::new: failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        fs::create_dir_all(temp_dir.path().join("workspace")).unwrap();
        let extensions = ExtensionsDir::at(temp_dir.path().join("extensions"));
        Self {
            temp_dir,
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory passed as `--config-dir`.
    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Directory passed as `--workspace`.
    pub fn workspace_dir(&self) -> PathBuf {
        self.root().join("workspace")
    }

    /// The fake editor extensions directory.
    pub fn extensions(&self) -> &ExtensionsDir {
        &self.extensions
    }

    /// Path of the user profiles file.
    pub fn user_profiles_path(&self) -> PathBuf {
        self.config_dir().join("extension-manager").join("profiles.toml")
    }

    /// Path of the workspace profile file.
    pub fn workspace_profiles_path(&self) -> PathBuf {
        self.workspace_dir().join(".vscode").join("extension-manager.toml")
    }

    /// Write the user profiles file verbatim.
    pub fn write_user_profiles(&self, content: &str) {
        let path = self.user_profiles_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Write the workspace profile file verbatim.
    pub fn write_workspace_profiles(&self, content: &str) {
        let path = self.workspace_profiles_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Read a file relative to the env root, panicking if missing.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative))
            .unwrap_or_else(|e| panic!("TestEnv::read: {relative}: {e}"))
    }

    /// Install a fake editor CLI that appends its arguments to `editor.log`.
    ///
    /// Returns the script path to pass as `--code`. Unix only.
    #[cfg(unix)]
    pub fn fake_editor(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.root().join("fake-code");
        let log = self.editor_log_path();
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> '{}'\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    /// Path the fake editor logs its invocations to.
    pub fn editor_log_path(&self) -> PathBuf {
        self.root().join("editor.log")
    }

    /// Lines logged by the fake editor, one per invocation.
    pub fn editor_invocations(&self) -> Vec<String> {
        fs::read_to_string(self.editor_log_path())
            .map(|c| c.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
