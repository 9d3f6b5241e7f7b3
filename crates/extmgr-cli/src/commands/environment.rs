//! Named environment commands.

use colored::Colorize;
use extmgr_profiles::ProfileName;
use serde::Serialize;

use super::reconcile_to;
use crate::context::AppContext;
use crate::error::{CliError, Result};
use crate::interactive;

const NO_ENVIRONMENTS: &str = "No environments available.";

#[derive(Debug, Serialize)]
struct EnvironmentSummary<'a> {
    name: &'a str,
    extensions: &'a [String],
}

/// Handle `extmgr env create [NAME]`
pub fn run_create(ctx: &AppContext, name: Option<String>) -> Result<()> {
    let name = interactive::environment_name(name, ctx.assume_yes)?;
    let profile = ProfileName::Environment(name.clone());
    let ids = ctx.eligible_ids()?;

    if ctx.store.get(&profile)?.is_some()
        && !interactive::confirm(
            &format!("Environment '{name}' exists. Overwrite it?"),
            ctx.assume_yes,
        )?
    {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let saved = ctx.store.set(&profile, &ids)?;
    println!(
        "{} Environment '{}' saved with {} extension(s)",
        "=>".green().bold(),
        name.cyan(),
        saved.len()
    );
    Ok(())
}

/// Handle `extmgr env delete [NAME]`
pub fn run_delete(ctx: &AppContext, name: Option<String>) -> Result<()> {
    let names = ctx.store.environment_names()?;
    if names.is_empty() {
        println!("{NO_ENVIRONMENTS}");
        return Ok(());
    }

    let name = interactive::pick_environment(name, &names, "Environment to delete", ctx.assume_yes)?;
    if !interactive::confirm(&format!("Delete environment '{name}'?"), ctx.assume_yes)? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    if !ctx.store.delete_environment(&name)? {
        return Err(CliError::user(format!("Environment '{name}' does not exist")));
    }
    println!("{} Environment '{}' deleted", "=>".green().bold(), name.cyan());
    Ok(())
}

/// Handle `extmgr env use [NAME] [--dry-run]`
pub fn run_use(ctx: &AppContext, name: Option<String>, dry_run: bool) -> Result<()> {
    let names = ctx.store.environment_names()?;
    if names.is_empty() {
        println!("{NO_ENVIRONMENTS}");
        return Ok(());
    }

    let name = interactive::pick_environment(name, &names, "Environment to use", ctx.assume_yes)?;
    let target = ctx.store.require(&ProfileName::Environment(name.clone()))?;
    reconcile_to(ctx, &format!("Environment '{name}'"), &target, dry_run)
}

/// Handle `extmgr env list [--json]`
pub fn run_list(ctx: &AppContext, json: bool) -> Result<()> {
    let profiles = ctx.store.load_user()?;

    if json {
        let summaries: Vec<EnvironmentSummary<'_>> = profiles
            .environments
            .iter()
            .map(|(name, ids)| EnvironmentSummary {
                name,
                extensions: ids,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if profiles.environments.is_empty() {
        println!("{NO_ENVIRONMENTS}");
        return Ok(());
    }
    println!("{} Environments:", "=>".blue().bold());
    for (name, ids) in &profiles.environments {
        println!(
            "   {} {}",
            name.cyan(),
            format!("({} extensions)", ids.len()).dimmed()
        );
    }
    Ok(())
}
