use crate::catalog::{Catalog, CatalogError};
use crate::router::AppState;
use crate::server::{Server, ShutdownHandle};
use dropcheck_core::ServerConfig;
use std::path::PathBuf;
use thiserror::Error;
use tokio::signal;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LifecycleError {
  #[error("Catalog error: {0}")]
  Catalog(#[from] CatalogError),
  #[error("Server error: {0}")]
  Server(#[from] crate::server::ServerError),
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
  /// Address to bind, `host:port`
  pub addr: String,
  /// Catalog file; the demo catalog is served when unset
  pub catalog: Option<PathBuf>,
}

impl Default for DaemonConfig {
  fn default() -> Self {
    Self::from(&ServerConfig::default())
  }
}

impl From<&ServerConfig> for DaemonConfig {
  fn from(config: &ServerConfig) -> Self {
    Self {
      addr: config.bind_addr(),
      catalog: config.catalog.clone(),
    }
  }
}

/// Daemon lifecycle manager
pub struct Daemon {
  config: DaemonConfig,
  shutdown: Option<ShutdownHandle>,
}

impl Daemon {
  pub fn new(config: DaemonConfig) -> Self {
    Self { config, shutdown: None }
  }

  fn load_catalog(&self) -> Result<Catalog, CatalogError> {
    match &self.config.catalog {
      Some(path) => Catalog::load(path),
      None => {
        warn!("No catalog configured, serving the built-in demo catalog");
        Ok(Catalog::demo())
      }
    }
  }

  /// Run the daemon until ctrl-c or a shutdown request
  pub async fn run(&mut self) -> Result<(), LifecycleError> {
    info!("Starting dropcheck daemon");

    let catalog = self.load_catalog()?;
    let server = Server::bind(&self.config.addr, AppState::new(catalog)).await?;
    let shutdown = server.shutdown_handle();
    self.shutdown = Some(shutdown.clone());

    // Handle ctrl-c gracefully
    tokio::spawn(async move {
      if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        return;
      }
      info!("Received ctrl-c, shutting down...");
      shutdown.shutdown();
    });

    server.run().await?;
    info!("Daemon shutdown complete");

    Ok(())
  }

  /// Shutdown the daemon
  pub fn shutdown(&self) {
    if let Some(ref shutdown) = self.shutdown {
      shutdown.shutdown();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_from_server_settings() {
    let server = ServerConfig {
      host: "0.0.0.0".to_string(),
      port: 8123,
      catalog: Some(PathBuf::from("seed.json")),
      ..Default::default()
    };
    let config = DaemonConfig::from(&server);
    assert_eq!(config.addr, "0.0.0.0:8123");
    assert_eq!(config.catalog, Some(PathBuf::from("seed.json")));
  }

  #[tokio::test]
  async fn test_missing_catalog_file_fails_startup() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut daemon = Daemon::new(DaemonConfig {
      addr: "127.0.0.1:0".to_string(),
      catalog: Some(dir.path().join("absent.json")),
    });
    let err = daemon.run().await.unwrap_err();
    assert!(matches!(err, LifecycleError::Catalog(CatalogError::Io(_))));
  }
}
