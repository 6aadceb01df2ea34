//! Command catalog: response templates and help metadata keyed by command.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Catalog entry answered to non-admins while admin mode is on.
pub const ADMIN_ONLY_KEY: &str = "admin_only";

/// Catalog entry answered to unrecognized commands.
pub const UNKNOWN_KEY: &str = "unknown";

const DEFAULT_ADMIN_ONLY: &str = "This command is for group admins only.";
const DEFAULT_UNKNOWN: &str = "Unknown command. Type 'help' to see the list of commands.";

/// One configured command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandSpec {
    /// Reply template; placeholders look like `{user}`.
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub admin_only: bool,
}

/// All configured commands, keyed by lower-cased command token.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandCatalog {
    /// Load the catalog from a JSON file.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
            .map_err(|e| AppError::Catalog(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, CommandSpec> = serde_json::from_str(raw)?;
        Ok(parsed.into_iter().collect())
    }

    pub fn get(&self, key: &str) -> Option<&CommandSpec> {
        self.commands.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.commands.contains_key(key)
    }

    /// Whether the command is restricted to admins while admin mode is on.
    pub fn is_admin_only(&self, key: &str) -> bool {
        self.get(key).is_some_and(|c| c.admin_only)
    }

    /// Raw response template, empty if the command is not configured.
    pub fn response(&self, key: &str) -> &str {
        self.get(key).map(|c| c.response.as_str()).unwrap_or("")
    }

    /// Usage hint for a command.
    pub fn usage(&self, key: &str) -> String {
        self.get(key)
            .and_then(|c| c.usage.clone())
            .unwrap_or_else(|| format!("Invalid use of '{}'. Type 'help' for details.", key))
    }

    /// Response template with placeholders filled in.
    pub fn render(&self, key: &str, vars: &[(&str, &str)]) -> String {
        fill_template(self.response(key), vars)
    }

    pub fn admin_only_message(&self) -> &str {
        self.non_empty_response(ADMIN_ONLY_KEY)
            .unwrap_or(DEFAULT_ADMIN_ONLY)
    }

    pub fn unknown_message(&self) -> &str {
        self.non_empty_response(UNKNOWN_KEY).unwrap_or(DEFAULT_UNKNOWN)
    }

    fn non_empty_response(&self, key: &str) -> Option<&str> {
        self.get(key)
            .map(|c| c.response.as_str())
            .filter(|r| !r.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSpec)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<(String, CommandSpec)> for CommandCatalog {
    fn from_iter<I: IntoIterator<Item = (String, CommandSpec)>>(iter: I) -> Self {
        Self {
            commands: iter
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }
}

/// Replace every `{name}` in `template` with its value.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}
