//! Command implementations for extmgr-cli

pub mod environment;
pub mod inspect;
pub mod profile;

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;
use extmgr_core::{ExtensionManager, ReconcilePlan, ResolutionResult};

use crate::cli::{Cli, Commands, EnvAction, GlobalArgs};
use crate::context::AppContext;
use crate::error::Result;
use crate::interactive;

/// Dispatch a parsed command.
///
/// The context is built only for commands that need one, so a broken
/// `config.toml` never blocks shell completions.
pub fn execute(args: &GlobalArgs, command: Commands) -> Result<()> {
    let ctx = || AppContext::from_args(args);
    match command {
        Commands::List { json, all } => inspect::run_list(&ctx()?, json, all),
        Commands::DefineDefault => profile::run_define_default(&ctx()?),
        Commands::RestoreDefault { dry_run } => profile::run_restore_default(&ctx()?, dry_run),
        Commands::DefineWorkspace => profile::run_define_workspace(&ctx()?),
        Commands::DefineGlobal => profile::run_define_global(&ctx()?),
        Commands::Sync { dry_run } => profile::run_sync(&ctx()?, dry_run),
        Commands::Env { action } => {
            let ctx = ctx()?;
            match action {
                EnvAction::Create { name } => environment::run_create(&ctx, name),
                EnvAction::Delete { name } => environment::run_delete(&ctx, name),
                EnvAction::Use { name, dry_run } => environment::run_use(&ctx, name, dry_run),
                EnvAction::List { json } => environment::run_list(&ctx, json),
            }
        }
        Commands::Plan { profile, json } => inspect::run_plan(&ctx()?, &profile, json),
        Commands::Resolve { ids, json } => inspect::run_resolve(&ctx()?, &ids, json),
        Commands::Completions { shell } => run_completions(shell, &mut std::io::stdout()),
    }
}

/// Handle `extmgr completions <SHELL>`
pub fn run_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "extmgr", out);
    Ok(())
}

/// Move the installed set to `target`, reporting under `label`.
///
/// Asks for confirmation unless `dry_run` or `--yes`. Declining is not an
/// error.
pub(crate) fn reconcile_to(
    ctx: &AppContext,
    label: &str,
    target: &[String],
    dry_run: bool,
) -> Result<()> {
    let snapshot = ctx.snapshot()?;
    let plan = ReconcilePlan::compute(target, &snapshot);

    if plan.is_empty() {
        println!("{} {}: Already up to date.", "=>".blue().bold(), label);
        return Ok(());
    }

    let order = plan.uninstall_order();
    print_plan(label, &plan, &order);

    if !dry_run
        && !interactive::confirm(
            &format!("{label}: apply these changes?"),
            ctx.assume_yes,
        )?
    {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let manager = ExtensionManager::new(ctx.executor(dry_run));
    let report = manager.apply(&plan)?;

    warn_partial(&report.resolution);

    if report.changed() {
        println!("{} {}: Finished.", "=>".green().bold(), label);
        println!(
            "{} Reloading the editor is highly recommended.",
            "warning:".yellow().bold()
        );
    } else if dry_run {
        println!("{} {}: Dry run, nothing changed.", "=>".blue().bold(), label);
    } else {
        println!("{} {}: Already up to date.", "=>".blue().bold(), label);
    }
    Ok(())
}

/// Print the install set and the uninstall order.
pub(crate) fn print_plan(label: &str, plan: &ReconcilePlan, order: &ResolutionResult) {
    println!("{} {}", "=>".blue().bold(), label.bold());

    if plan.to_install.is_empty() {
        println!("   {} {}", "Install:".dimmed(), "(none)".dimmed());
    } else {
        println!("   {}", "Install:".dimmed());
        for id in &plan.to_install {
            println!("     {} {}", "+".green(), id);
        }
    }

    if order.ids.is_empty() && order.unresolved.is_empty() {
        println!("   {} {}", "Uninstall:".dimmed(), "(none)".dimmed());
    } else {
        println!("   {}", "Uninstall (in order):".dimmed());
        for id in &order.ids {
            println!("     {} {}", "-".red(), id);
        }
        for id in &order.unresolved {
            println!("     {} {} {}", "?".yellow(), id, "(unresolved)".yellow());
        }
    }

    if !plan.retained_dependencies.is_empty() {
        println!(
            "   {} {}",
            "Kept as dependencies:".dimmed(),
            plan.retained_dependencies.join(", ")
        );
    }
}

/// Warn about extensions left out of a partial resolution.
pub(crate) fn warn_partial(resolution: &ResolutionResult) {
    if resolution.complete {
        return;
    }
    if let Some(message) = &resolution.message {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
    eprintln!(
        "   {} {}",
        "Unresolved:".dimmed(),
        resolution.unresolved.join(", ").yellow()
    );
}
