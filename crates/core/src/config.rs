//! Configuration for the dropcheck server and client.
//!
//! Config priority: working directory (./dropcheck.toml) > user (~/.config/dropcheck/config.toml) > defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "dropcheck.toml";

/// Default HTTP port, overridable with the PORT env var
pub fn default_port() -> u16 {
  std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(5000)
}

/// Directory for log files
pub fn default_data_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("DATA_DIR") {
    return PathBuf::from(dir);
  }

  if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
    return PathBuf::from(xdg_data).join("dropcheck");
  }

  dirs::data_local_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join("dropcheck")
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Interface to bind (default: 127.0.0.1)
  pub host: String,

  /// Port to listen on (default: 5000, or $PORT)
  pub port: u16,

  /// JSON catalog of zones, objects and scenarios. The built-in demo catalog is used when unset.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub catalog: Option<PathBuf>,

  /// Log level: error, warn, info, debug, trace (default: info)
  pub log_level: String,

  /// Log file rotation when running in the background: daily, hourly, never (default: daily)
  pub log_rotation: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host: "127.0.0.1".to_string(),
      port: default_port(),
      catalog: None,
      log_level: "info".to_string(),
      log_rotation: "daily".to_string(),
    }
  }
}

impl ServerConfig {
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

// ============================================================================
// Client Configuration
// ============================================================================

/// Settings for commands that talk to a running server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// Base URL of the server (default: http://127.0.0.1:5000)
  pub base_url: String,

  /// Request timeout in seconds (default: 10)
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: format!("http://127.0.0.1:{}", default_port()),
      timeout_secs: 10,
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,

  #[serde(default)]
  pub client: ClientConfig,
}

impl Config {
  /// Load config for a working directory, falling back to the user config and then defaults.
  /// Unreadable or malformed files are skipped.
  pub fn load(cwd: &Path) -> Self {
    let candidates = [Some(Self::project_config_path(cwd)), Self::user_config_path()];
    for path in candidates.into_iter().flatten() {
      if path.exists()
        && let Ok(config) = Self::load_from(&path)
      {
        return config;
      }
    }
    Self::default()
  }

  /// Load config from an explicit file; errors are reported rather than skipped
  pub fn load_from(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("dropcheck").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("dropcheck").join("config.toml"))
  }

  pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(PROJECT_CONFIG_FILE)
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    let defaults = Self::default();
    format!(
      r#"# dropcheck configuration
# Place in ./dropcheck.toml or ~/.config/dropcheck/config.toml

# ============================================================================
# Server
# ============================================================================

[server]
host = "{host}"
port = {port}

# JSON file with "zones", "objects" and "scenarios" arrays.
# Leave unset to serve the built-in demo catalog.
# catalog = "catalog.json"

# error, warn, info, debug, trace (RUST_LOG overrides this)
log_level = "{log_level}"

# daily, hourly or never (background mode only)
log_rotation = "{log_rotation}"

# ============================================================================
# Client
# ============================================================================

[client]
base_url = "{base_url}"
timeout_secs = {timeout}
"#,
      host = defaults.server.host,
      port = defaults.server.port,
      log_level = defaults.server.log_level,
      log_rotation = defaults.server.log_rotation,
      base_url = defaults.client.base_url,
      timeout = defaults.client.timeout_secs,
    )
  }
}
