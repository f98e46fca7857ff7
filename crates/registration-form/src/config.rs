//! Host configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address lookup service
    #[serde(default)]
    pub cep: CepConfig,

    /// Local storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Form behavior
    #[serde(default)]
    pub form: FormConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CepConfig {
    /// Lookup service root; requests go to `{base_url}/{cep}/json/`
    #[serde(default = "default_cep_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON store file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Enable persistence (if false, everything is lost on exit)
    #[serde(default = "default_true")]
    pub persist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Destination after a successful registration
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Comma-separated list of selectable tracks
    #[serde(default = "default_tracks")]
    pub tracks: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl FormConfig {
    pub fn track_list(&self) -> Vec<String> {
        self.tracks
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

// Default implementations
impl Default for CepConfig {
    fn default() -> Self {
        Self {
            base_url: default_cep_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: true,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            tracks: default_tracks(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_cep_url() -> String {
    "https://viacep.com.br/ws".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/registration-store.json")
}

fn default_true() -> bool {
    true
}

fn default_login_url() -> String {
    "login.html".into()
}

fn default_tracks() -> String {
    "frontend,backend,mobile,data,design".into()
}

fn default_log_level() -> String {
    "info".into()
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
                    // Keep CEP-like values as strings (no leading-zero loss).
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
