//! Persisted extension profiles and tool settings
//!
//! Profiles are named id-lists: `default`, `global`, `workspace` and any
//! number of named environments. They are stored as TOML in two layers:
//!
//! - `<config_dir>/extension-manager/profiles.toml` for the user layer
//! - `<workspace>/.vscode/extension-manager.toml` for the workspace layer
//!
//! Tool settings live next to the user layer in `config.toml`.

pub mod error;
pub mod io;
pub mod profiles;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use profiles::{ProfileName, UserProfiles, WorkspaceProfiles, validate_environment_name};
pub use settings::{
    APP_DIR_NAME, DEFAULT_EDITOR_COMMAND, EditorSettings, Settings, default_extensions_dir,
    resolve_app_dir,
};
pub use store::{PROFILES_FILENAME, ProfileStore, WORKSPACE_PROFILE_PATH};
