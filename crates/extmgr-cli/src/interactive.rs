//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based confirmation, input and selection.

use dialoguer::{Confirm, Input, Select};
use extmgr_profiles::validate_environment_name;

use crate::error::{CliError, Result};

/// Ask a yes/no question. `assume_yes` answers without prompting.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Use `name` if given, otherwise prompt for a new environment name.
pub fn environment_name(name: Option<String>, assume_yes: bool) -> Result<String> {
    if let Some(name) = name {
        return Ok(validate_environment_name(&name)?);
    }
    if assume_yes {
        return Err(CliError::user("An environment name is required with --yes"));
    }
    let name: String = Input::new()
        .with_prompt("Environment name")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            validate_environment_name(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(validate_environment_name(&name)?)
}

/// Use `name` if given, otherwise pick one of `existing`.
pub fn pick_environment(
    name: Option<String>,
    existing: &[String],
    prompt: &str,
    assume_yes: bool,
) -> Result<String> {
    if let Some(name) = name {
        return Ok(validate_environment_name(&name)?);
    }
    if assume_yes {
        return Err(CliError::user("An environment name is required with --yes"));
    }
    let index = Select::new()
        .with_prompt(prompt)
        .items(existing)
        .default(0)
        .interact()?;
    Ok(existing[index].clone())
}
