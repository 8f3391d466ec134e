//! Configuration schema (prefill.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TENANT_ID: &str = "1";
const DEFAULT_BLUEPRINT_ID: &str = "bp_01jk766tckfwx84xjcxazggzyc";
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
const DEFAULT_GRAPH_PATH: &str = "graph.json";

/// Where the blueprint graph is fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the graph service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tenant the blueprint belongs to
    #[serde(default = "default_tenant_id")]
    pub tenant_id: String,

    /// Blueprint whose graph is loaded
    #[serde(default = "default_blueprint_id")]
    pub blueprint_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tenant_id() -> String {
    DEFAULT_TENANT_ID.to_string()
}

fn default_blueprint_id() -> String {
    DEFAULT_BLUEPRINT_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tenant_id: default_tenant_id(),
            blueprint_id: default_blueprint_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointConfig {
    /// Full URL of the blueprint graph resource
    pub fn graph_url(&self) -> String {
        format!(
            "{}/api/v1/{}/actions/blueprints/{}/graph",
            self.base_url.trim_end_matches('/'),
            self.tenant_id,
            self.blueprint_id
        )
    }
}

/// Graph server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Graph document served by the endpoint
    #[serde(default = "default_graph_path")]
    pub graph_path: PathBuf,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_graph_path() -> PathBuf {
    PathBuf::from(DEFAULT_GRAPH_PATH)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            graph_path: default_graph_path(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Graph endpoint used by clients
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Graph server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load config from TOML file
    ///
    /// A relative `server.graph_path` is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        if config.server.graph_path.is_relative() {
            if let Some(parent) = path.parent() {
                config.server.graph_path = parent.join(&config.server.graph_path);
            }
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Ok(())
    }

    /// Override settings from `PREFILL_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("PREFILL_BASE_URL") {
            self.endpoint.base_url = base_url;
        }
        if let Some(tenant_id) = lookup("PREFILL_TENANT_ID") {
            self.endpoint.tenant_id = tenant_id;
        }
        if let Some(blueprint_id) = lookup("PREFILL_BLUEPRINT_ID") {
            self.endpoint.blueprint_id = blueprint_id;
        }
        if let Some(graph_path) = lookup("PREFILL_GRAPH_PATH") {
            self.server.graph_path = PathBuf::from(graph_path);
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
