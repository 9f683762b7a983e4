use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::TimeFrame;

/// Main configuration structure
///
/// Loaded from the platform config dir; missing file means defaults.
/// Every field has a serde default so partial files keep working.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load config from default location or fall back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Config file path: XDG config dir on Unix, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("Could not find config directory".into()))?
            .join("hubscout");

        Ok(config_dir.join("config.toml"))
    }

    /// Where the client preference store lives.
    pub fn prefs_path() -> crate::Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::config_dir)
            .ok_or_else(|| crate::Error::Config("Could not find data directory".into()))?
            .join("hubscout");

        Ok(data_dir.join("prefs.sqlite"))
    }
}

/// The relay forwarder everything upstream goes through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_url")]
    pub url: String,
}

fn default_relay_url() -> String {
    "https://fetch-url.onrender.com/fetch-url".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: default_relay_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_hub_api_url")]
    pub api_url: String,
}

fn default_hub_api_url() -> String {
    "https://huggingface.co/api".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            api_url: default_hub_api_url(),
        }
    }
}

/// Aggregation endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// How long a fetched trending list stays fresh.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Window a shared cache may serve a stale response while revalidating.
    #[serde(default = "default_stale_while_revalidate")]
    pub stale_while_revalidate_secs: u64,

    /// Result count when the caller doesn't pass a limit.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cache_ttl() -> u64 {
    600 // 10 minutes, same as the shared-cache directive
}

fn default_stale_while_revalidate() -> u64 {
    59
}

fn default_limit() -> u32 {
    10
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The directive attached to every successful endpoint response.
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.cache_ttl_secs, self.stale_while_revalidate_secs
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cache_ttl_secs: default_cache_ttl(),
            stale_while_revalidate_secs: default_stale_while_revalidate(),
            default_limit: default_limit(),
        }
    }
}

/// Dashboard client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the aggregation endpoints the dashboard talks to.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Newsletter signup endpoint. None hides the subscribe action.
    #[serde(default)]
    pub subscribe_url: Option<String>,

    #[serde(default)]
    pub default_time_frame: TimeFrame,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            subscribe_url: None,
            default_time_frame: TimeFrame::default(),
            limit: default_limit(),
        }
    }
}
