// On-disk configuration: API base URL and the stored login.
// The file lives at `~/.config/bogg/config.toml` on Linux. It is created
// with defaults on first run and rewritten whenever a login succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory.
pub const APP_NAME: &str = "bogg";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// API base used when neither the file nor the environment set one.
pub const DEFAULT_API_BASE: &str = "https://bo.gg";

/// Environment variable that overrides `api_base`.
pub const API_BASE_ENV: &str = "BOGG_API_BASE";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            username: None,
            token: None,
        }
    }
}

impl Config {
    /// Returns `~/.config/bogg/config.toml` (platform equivalent elsewhere).
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir.join(CONFIG_FILENAME))
    }

    /// Load the config at `path`, writing a default file first if none
    /// exists. The struct mirrors the file; environment overrides are
    /// applied by [`Config::resolved_api_base`] and never saved.
    pub fn load(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config at {:?}", path))?
        } else {
            let config = Config::default();
            config.save(path)?;
            config
        };
        Ok(config)
    }

    /// API base to talk to: `BOGG_API_BASE` when set, else the file's value.
    pub fn resolved_api_base(&self) -> String {
        std::env::var(API_BASE_ENV).unwrap_or_else(|_| self.api_base.clone())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, text).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Remember a successful login so later runs skip setup.
    pub fn store_credentials(&mut self, path: &Path, username: &str, token: &str) -> Result<()> {
        self.username = Some(username.to_string());
        self.token = Some(token.to_string());
        self.save(path)?;
        tracing::info!(username, "stored credentials");
        Ok(())
    }
}
