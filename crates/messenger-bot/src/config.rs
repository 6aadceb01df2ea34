//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Messenger bridge configuration
    #[serde(default)]
    pub messenger: MessengerConfig,

    /// File locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessengerConfig {
    /// Bridge HTTP endpoint
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Saved session cookies handed to the bridge at login
    #[serde(default = "default_app_state_path")]
    pub app_state_path: PathBuf,

    /// Poll interval for events
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Command catalog (key -> response, usage, description, admin_only)
    #[serde(default = "default_commands_path")]
    pub commands_path: PathBuf,

    #[serde(default = "default_bans_path")]
    pub bans_path: PathBuf,

    #[serde(default = "default_mutes_path")]
    pub mutes_path: PathBuf,

    #[serde(default = "default_game_ids_path")]
    pub game_ids_path: PathBuf,

    /// Where welcome avatars are staged before upload
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            app_state_path: default_app_state_path(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            commands_path: default_commands_path(),
            bans_path: default_bans_path(),
            mutes_path: default_mutes_path(),
            game_ids_path: default_game_ids_path(),
            temp_dir: default_temp_dir(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_service_url() -> String {
    "http://messenger-bridge:8080".into()
}

fn default_app_state_path() -> PathBuf {
    "data/appstate.json".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(500)
}

fn default_commands_path() -> PathBuf {
    "data/commands.json".into()
}

fn default_bans_path() -> PathBuf {
    "data/bans.json".into()
}

fn default_mutes_path() -> PathBuf {
    "data/mutes.json".into()
}

fn default_game_ids_path() -> PathBuf {
    "data/gameIDs.json".into()
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_log_level() -> String {
    "info".into()
}

impl MessengerConfig {
    /// Read the saved session. Kept secret until it is posted to the bridge.
    pub fn load_app_state(&self) -> Result<SecretString> {
        let raw = std::fs::read_to_string(&self.app_state_path)
            .with_context(|| format!("Failed to read {}", self.app_state_path.display()))?;
        Ok(SecretString::new(raw))
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Thread and user ids are long digit strings; keep them as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
