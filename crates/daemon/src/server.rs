use crate::router::{AppState, build_router};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Error, Debug)]
pub enum ServerError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

/// HTTP server for the training API
pub struct Server {
  listener: TcpListener,
  state: AppState,
  shutdown_tx: broadcast::Sender<()>,
}

impl Server {
  /// Bind to `addr`. Use port 0 to let the OS pick one.
  pub async fn bind(addr: &str, state: AppState) -> Result<Self, ServerError> {
    let listener = TcpListener::bind(addr).await?;
    let (shutdown_tx, _) = broadcast::channel(1);
    Ok(Self {
      listener,
      state,
      shutdown_tx,
    })
  }

  /// Get a shutdown handle to signal server shutdown
  pub fn shutdown_handle(&self) -> ShutdownHandle {
    ShutdownHandle {
      tx: self.shutdown_tx.clone(),
    }
  }

  pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
    Ok(self.listener.local_addr()?)
  }

  /// Serve until a shutdown is signalled
  pub async fn run(self) -> Result<(), ServerError> {
    let addr = self.listener.local_addr()?;
    info!("Listening on http://{}", addr);

    let mut shutdown_rx = self.shutdown_tx.subscribe();
    let app = build_router(self.state);

    axum::serve(self.listener, app)
      .with_graceful_shutdown(async move {
        let _ = shutdown_rx.recv().await;
        info!("Shutdown signal received");
      })
      .await?;

    Ok(())
  }
}

/// Handle to signal server shutdown
#[derive(Clone)]
pub struct ShutdownHandle {
  tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
  pub fn shutdown(&self) {
    let _ = self.tx.send(());
  }
}
