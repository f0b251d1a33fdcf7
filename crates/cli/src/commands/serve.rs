//! Serve command

use anyhow::{Context, Result};
use daemon::{Daemon, DaemonConfig};
use dropcheck_core::ServerConfig;
use tracing::info;

/// Run the HTTP server until ctrl-c
pub async fn cmd_serve(config: &ServerConfig) -> Result<()> {
  let mut daemon = Daemon::new(DaemonConfig::from(config));

  info!("Starting dropcheck server on {}", config.bind_addr());
  daemon.run().await.context("Failed to run server")?;

  Ok(())
}
