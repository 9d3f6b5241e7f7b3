//! Profile names and the persisted profile documents.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use extmgr_registry::normalize_ids;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named id-list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileName {
    /// The user's baseline set.
    Default,
    /// The set pinned to the current workspace.
    Workspace,
    /// Extensions wanted in every workspace, merged into `sync`.
    Global,
    /// A named environment.
    Environment(String),
}

impl ProfileName {
    /// Build an environment profile name, validating it.
    pub fn environment(name: &str) -> Result<Self> {
        validate_environment_name(name).map(Self::Environment)
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Workspace => write!(f, "workspace"),
            Self::Global => write!(f, "global"),
            Self::Environment(name) => write!(f, "env:{name}"),
        }
    }
}

impl FromStr for ProfileName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "default" => Ok(Self::Default),
            "workspace" => Ok(Self::Workspace),
            "global" => Ok(Self::Global),
            other => match other.strip_prefix("env:") {
                Some(name) => Self::environment(name),
                None => Err(Error::UnknownProfile(s.to_string())),
            },
        }
    }
}

/// Trim an environment name and reject empty ones.
pub fn validate_environment_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidEnvironmentName {
            name: name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }
    if trimmed.chars().any(char::is_control) {
        return Err(Error::InvalidEnvironmentName {
            name: name.to_string(),
            reason: "name cannot contain control characters".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Profiles stored in the user's configuration directory.
///
/// `None` means the profile was never defined, which is different from an
/// empty list: restoring an empty profile uninstalls everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<Vec<String>>,
    #[serde(default)]
    pub environments: BTreeMap<String, Vec<String>>,
}

impl UserProfiles {
    /// Normalize every id-list.
    pub fn normalized(self) -> Self {
        Self {
            default: self.default.map(normalize_ids),
            global: self.global.map(normalize_ids),
            environments: self
                .environments
                .into_iter()
                .map(|(name, ids)| (name, normalize_ids(ids)))
                .collect(),
        }
    }
}

/// Profile stored inside a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceProfiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Vec<String>>,
}

impl WorkspaceProfiles {
    pub fn normalized(self) -> Self {
        Self {
            workspace: self.workspace.map(normalize_ids),
        }
    }
}
