//! Default, workspace and global profile commands.

use colored::Colorize;
use extmgr_profiles::ProfileName;

use super::reconcile_to;
use crate::context::AppContext;
use crate::error::Result;
use crate::interactive;

/// Save the eligible installed extensions under `name`.
fn define(ctx: &AppContext, name: &ProfileName, description: &str) -> Result<()> {
    let ids = ctx.eligible_ids()?;
    let exists = ctx.store.get(name)?.is_some();

    let prompt = if exists {
        format!(
            "Overwrite the {description} with the {} installed extension(s)?",
            ids.len()
        )
    } else {
        format!(
            "Save the {} installed extension(s) as the {description}?",
            ids.len()
        )
    };
    if !interactive::confirm(&prompt, ctx.assume_yes)? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let saved = ctx.store.set(name, &ids)?;
    println!(
        "{} Saved {} extension(s) as the {}",
        "=>".green().bold(),
        saved.len(),
        description
    );
    Ok(())
}

/// Handle `extmgr define-default`
pub fn run_define_default(ctx: &AppContext) -> Result<()> {
    define(ctx, &ProfileName::Default, "default profile")
}

/// Handle `extmgr define-workspace`
pub fn run_define_workspace(ctx: &AppContext) -> Result<()> {
    define(ctx, &ProfileName::Workspace, "workspace profile")
}

/// Handle `extmgr define-global`
pub fn run_define_global(ctx: &AppContext) -> Result<()> {
    define(ctx, &ProfileName::Global, "global profile")
}

/// Handle `extmgr restore-default [--dry-run]`
pub fn run_restore_default(ctx: &AppContext, dry_run: bool) -> Result<()> {
    let target = ctx.store.require(&ProfileName::Default)?;
    reconcile_to(ctx, "Restore default", &target, dry_run)
}

/// Handle `extmgr sync [--dry-run]`
///
/// The target is the workspace profile plus the global profile.
pub fn run_sync(ctx: &AppContext, dry_run: bool) -> Result<()> {
    let target = ctx.store.sync_target()?;
    reconcile_to(ctx, "Sync", &target, dry_run)
}
