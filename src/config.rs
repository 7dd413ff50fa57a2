//! Configuration management for Blockworld
//!
//! Both binaries read the same TOML file. The client settings live under
//! `[client]`, the reference server settings under `[server]`. Every key is
//! optional; a missing file means defaults throughout.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "blockworld.toml";

/// Environment variable that overrides `client.base_url`.
pub const BASE_URL_ENV: &str = "BLOCKWORLD_URL";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Origin of the game server, e.g. `http://raspberrypi.local:8080`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(
        default = "default_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub timeout: Duration,
    /// Turn non-2xx responses into errors instead of ignoring them.
    #[serde(default)]
    pub strict_status: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            strict_status: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::Config("client.base_url must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") {
            return Err(ClientError::Config(format!(
                "client.base_url must be a plain http:// URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("client.timeout must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Directory served under `/static`, if any.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            rows: default_rows(),
            cols: default_cols(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ClientError::Config(format!(
                "server grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Parse a config document and validate both sections.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.client.validate()?;
        self.server.validate()
    }
}

/// Load the config file at `path`, falling back to defaults when it is absent,
/// then apply the `BLOCKWORLD_URL` override.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let mut config: Config = if path.exists() {
        let source = fs::read_to_string(path)?;
        toml::from_str(&source)?
    } else {
        tracing::debug!(path = %path.display(), "config.missing");
        Config::default()
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            config.client.base_url = url;
        }
    }

    config.validate()?;
    Ok(config)
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_rows() -> usize {
    16
}

fn default_cols() -> usize {
    32
}
