//! Extension Manager CLI
//!
//! Saves the installed editor extensions as profiles and switches between
//! them, uninstalling in an order that respects dependencies and packs.

mod cli;
mod commands;
mod context;
mod error;
mod executor;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.global.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Extension Manager CLI", "extmgr".green().bold());
        println!();
        println!("Run {} for available commands.", "extmgr --help".cyan());
        return Ok(());
    };

    commands::execute(&cli.global, command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use extmgr_profiles::ProfileName;
    use extmgr_test_utils::TestEnv;

    use crate::cli::{Commands, GlobalArgs};
    use crate::context::AppContext;

    fn args(env: &TestEnv) -> GlobalArgs {
        GlobalArgs {
            yes: true,
            config_dir: Some(env.config_dir()),
            workspace: Some(env.workspace_dir()),
            extensions_dir: Some(env.extensions().path().to_path_buf()),
            code: Some("definitely-not-an-editor-binary".into()),
            ..GlobalArgs::default()
        }
    }

    fn context(env: &TestEnv) -> AppContext {
        AppContext::from_args(&args(env)).unwrap()
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_define_default_saves_eligible() {
        let env = TestEnv::new();
        env.extensions().add("Esbenp.Prettier-VSCode", "10.0.0", &[], &[]);
        env.extensions().add("ms-python.python", "2024.1.0", &[], &[]);

        commands::execute(&args(&env), Commands::DefineDefault).unwrap();

        assert_eq!(
            context(&env).store.require(&ProfileName::Default).unwrap(),
            vec!["esbenp.prettier-vscode", "ms-python.python"]
        );
    }

    #[test]
    fn test_up_to_date_restore_never_runs_editor() {
        let env = TestEnv::new();
        env.extensions().add("a.ext", "1.0.0", &[], &[]);
        context(&env).store.set(&ProfileName::Default, ["a.ext"]).unwrap();

        // The editor binary does not exist, so any batch would fail.
        commands::execute(&args(&env), Commands::RestoreDefault { dry_run: false }).unwrap();
    }

    #[test]
    fn test_dry_run_restore_never_runs_editor() {
        let env = TestEnv::new();
        env.extensions().add("a.ext", "1.0.0", &[], &[]);
        context(&env).store.set(&ProfileName::Default, ["b.ext"]).unwrap();

        commands::execute(&args(&env), Commands::RestoreDefault { dry_run: true }).unwrap();
    }

    #[test]
    fn test_restore_with_missing_editor_fails() {
        let env = TestEnv::new();
        env.extensions().add("a.ext", "1.0.0", &[], &[]);
        context(&env).store.set(&ProfileName::Default, ["b.ext"]).unwrap();

        let result = commands::execute(&args(&env), Commands::RestoreDefault { dry_run: false });
        assert!(result.is_err());
    }

    #[test]
    fn test_env_delete_without_environments_is_ok() {
        let env = TestEnv::new();
        let action = cli::EnvAction::Delete { name: None };
        commands::execute(&args(&env), Commands::Env { action }).unwrap();
    }

    #[test]
    fn test_completions_name_the_binary_and_commands() {
        let mut out = Vec::new();
        commands::run_completions(clap_complete::Shell::Bash, &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("extmgr"));
        assert!(script.contains("define-default"));
    }

    #[test]
    fn test_completions_ignore_broken_settings() {
        let env = TestEnv::new();
        let config = env.user_profiles_path().with_file_name("config.toml");
        std::fs::create_dir_all(config.parent().unwrap()).unwrap();
        std::fs::write(&config, "[editor\n").unwrap();

        let shell = clap_complete::Shell::Bash;
        commands::execute(&args(&env), Commands::Completions { shell }).unwrap();
        assert!(commands::execute(&args(&env), Commands::DefineDefault).is_err());
    }
}
