//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Extension Manager - Switch editor extensions between saved profiles
#[derive(Parser, Debug)]
#[command(name = "extmgr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags accepted by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Base configuration directory (defaults to the platform config dir)
    #[arg(long, global = true, env = "EXTMGR_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Workspace folder (defaults to the current directory)
    #[arg(long, global = true, env = "EXTMGR_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Editor extensions directory
    #[arg(long, global = true, env = "EXTMGR_EXTENSIONS_DIR")]
    pub extensions_dir: Option<PathBuf>,

    /// Directory of extensions bundled with the editor
    #[arg(long, global = true, env = "EXTMGR_BUILTIN_DIR")]
    pub builtin_dir: Option<PathBuf>,

    /// Editor CLI command
    #[arg(long, global = true, env = "EXTMGR_CODE")]
    pub code: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List installed extensions
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Include built-in and protected extensions
        #[arg(long)]
        all: bool,
    },

    /// Save the installed extensions as the default profile
    DefineDefault,

    /// Install and uninstall extensions to match the default profile
    RestoreDefault {
        /// Show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Save the installed extensions as this workspace's profile
    DefineWorkspace,

    /// Save the installed extensions as the global profile
    ///
    /// Global extensions are added to every workspace by `sync`.
    DefineGlobal,

    /// Match the workspace profile plus the global profile
    Sync {
        /// Show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage named environments
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },

    /// Show what switching to a profile would do
    ///
    /// PROFILE is one of default, workspace, global, sync or env:<name>.
    ///
    /// Examples:
    ///   extmgr plan default
    ///   extmgr plan env:python --json
    Plan {
        /// Profile to plan for
        profile: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show a safe uninstall order
    ///
    /// Without ids, every eligible installed extension is ordered.
    Resolve {
        /// Extension ids to order
        ids: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   extmgr completions bash > ~/.local/share/bash-completion/completions/extmgr
    ///   extmgr completions zsh > ~/.zfunc/_extmgr
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Environment subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EnvAction {
    /// Save the installed extensions as a named environment
    Create {
        /// Environment name (prompted if omitted)
        name: Option<String>,
    },

    /// Delete a named environment
    Delete {
        /// Environment name (picked from a list if omitted)
        name: Option<String>,
    },

    /// Switch to a named environment
    Use {
        /// Environment name (picked from a list if omitted)
        name: Option<String>,

        /// Show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// List saved environments
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
