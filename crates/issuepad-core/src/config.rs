use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::journal::Journal;

/// Environment variable overriding the journal location.
pub const JOURNAL_ENV: &str = "ISSUEPAD_JOURNAL";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "ISSUEPAD_CONFIG";

/// Directory name under the per-user local data directory.
pub const APP_DIR: &str = "IssuePad";

/// File name of the journal inside [`APP_DIR`].
pub const JOURNAL_FILE: &str = "issues.jsonl";

/// Per-user settings read from `<config_dir>/issuepad/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub journal_path: Option<PathBuf>,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub output: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub journal_path: PathBuf,
    pub durable: bool,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Journal handle for the resolved location and write options.
    #[must_use]
    pub fn journal(&self) -> Journal {
        Journal::new(&self.journal_path).durable(self.durable)
    }
}

/// Location of the user config file: `ISSUEPAD_CONFIG` if set, otherwise
/// `<config_dir>/issuepad/config.toml` when the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("issuepad/config.toml")))
}

/// Load the user config, falling back to defaults when the file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    match user_config_path() {
        Some(path) => load_config_file(&path),
        None => Ok(UserConfig::default()),
    }
}

/// Load a config file from an explicit path.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Default journal location: `<local_data_dir>/IssuePad/issues.jsonl`.
#[must_use]
pub fn default_journal_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join(JOURNAL_FILE))
}

/// Resolve settings from CLI flags, environment, and an already-loaded
/// user config.
///
/// # Errors
///
/// Returns an error if no journal location can be determined.
pub fn resolve_config(
    user: &UserConfig,
    cli_journal: Option<&Path>,
    cli_json: bool,
) -> Result<EffectiveConfig> {
    let env_journal = env::var_os(JOURNAL_ENV).map(PathBuf::from);
    let journal_path = resolve_journal_path(
        cli_journal.map(Path::to_path_buf),
        env_journal,
        user.journal_path.clone(),
        default_journal_path(),
    )?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);

    Ok(EffectiveConfig {
        journal_path,
        durable: user.durable,
        resolved_output,
    })
}

fn resolve_journal_path(
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    user: Option<PathBuf>,
    default: Option<PathBuf>,
) -> Result<PathBuf> {
    [cli, env, user, default]
        .into_iter()
        .flatten()
        .find(|p| !p.as_os_str().is_empty())
        .context("No local data directory on this platform; set ISSUEPAD_JOURNAL")
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}
