//! Read-only commands: list, plan and resolve.

use colored::Colorize;
use extmgr_core::{ReconcilePlan, ResolutionResult, resolve_uninstall_order};
use extmgr_profiles::ProfileName;
use extmgr_registry::{ExtensionRecord, filter_eligible, normalize_ids};
use serde::Serialize;

use super::{print_plan, warn_partial};
use crate::context::AppContext;
use crate::error::{CliError, Result};

#[derive(Serialize)]
struct PlanOutput<'a> {
    profile: &'a str,
    plan: &'a ReconcilePlan,
    uninstall_order: &'a ResolutionResult,
}

/// Handle `extmgr list [--json] [--all]`
pub fn run_list(ctx: &AppContext, json: bool, all: bool) -> Result<()> {
    let snapshot = ctx.snapshot()?;
    let records: Vec<ExtensionRecord> = if all {
        snapshot.records().to_vec()
    } else {
        snapshot.eligible()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No extensions installed.");
        return Ok(());
    }

    println!("{} {} extension(s):", "=>".blue().bold(), records.len());
    for record in &records {
        let mut line = format!("   {}", record.id().cyan());
        if let Some(version) = record.version() {
            line.push_str(&format!(" {}", version.dimmed()));
        }
        if record.is_builtin() {
            line.push_str(&format!(" {}", "[built-in]".yellow()));
        } else if record.is_protected() {
            line.push_str(&format!(" {}", "[protected]".yellow()));
        }
        println!("{line}");

        if !record.dependencies().is_empty() {
            let deps: Vec<&str> = record.dependencies().iter().map(String::as_str).collect();
            println!("     {} {}", "requires:".dimmed(), deps.join(", "));
        }
        if record.is_pack() {
            let members: Vec<&str> = record.pack_members().iter().map(String::as_str).collect();
            println!("     {} {}", "pack:".dimmed(), members.join(", "));
        }
    }
    Ok(())
}

/// Handle `extmgr plan <profile> [--json]`
pub fn run_plan(ctx: &AppContext, profile: &str, json: bool) -> Result<()> {
    let (label, target) = if profile.trim() == "sync" {
        ("sync".to_string(), ctx.store.sync_target()?)
    } else {
        let name: ProfileName = profile.parse()?;
        (name.to_string(), ctx.store.require(&name)?)
    };

    let snapshot = ctx.snapshot()?;
    let plan = ReconcilePlan::compute(&target, &snapshot);
    let order = plan.uninstall_order();

    if json {
        let output = PlanOutput {
            profile: &label,
            plan: &plan,
            uninstall_order: &order,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_plan(&format!("Plan for {label}"), &plan, &order);
    warn_partial(&order);
    if plan.is_empty() {
        println!("   {}", "Already up to date.".green());
    }
    Ok(())
}

/// Handle `extmgr resolve [IDS...] [--json]`
///
/// Orders the given installed extensions, or every eligible one. Ids that are
/// protected or built-in are dropped with a warning.
pub fn run_resolve(ctx: &AppContext, ids: &[String], json: bool) -> Result<()> {
    let snapshot = ctx.snapshot()?;

    let candidates = if ids.is_empty() {
        snapshot.eligible()
    } else {
        let mut selected = Vec::new();
        for id in normalize_ids(ids) {
            let record = snapshot
                .get(&id)
                .ok_or_else(|| CliError::user(format!("Extension '{id}' is not installed")))?;
            selected.push(record.clone());
        }
        let eligible = filter_eligible(&selected, snapshot.protected());
        if eligible.len() != selected.len() {
            tracing::warn!(
                skipped = selected.len() - eligible.len(),
                "Ignoring protected or built-in extensions"
            );
        }
        eligible
    };

    let result = resolve_uninstall_order(&candidates);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.ids.is_empty() && result.unresolved.is_empty() {
        println!("Nothing to uninstall.");
        return Ok(());
    }

    println!("{} Uninstall order:", "=>".blue().bold());
    for (i, id) in result.ids.iter().enumerate() {
        println!("   {:>3}. {}", i + 1, id);
    }
    warn_partial(&result);
    Ok(())
}
