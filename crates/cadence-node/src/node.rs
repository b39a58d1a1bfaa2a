//! Cadence Node - the application entry point.
//!
//! Architecture:
//! - One `SequenceStore` shared by every request handler
//! - HTTP API for submitters and readers
//! - Unix admin socket for operator actions (cadence-admin CLI)

use crate::admin_socket::AdminSocket;
use crate::api;
use crate::config::NodeConfig;
use crate::error::Result;
use axum::Router;
use cadence_store::SequenceStore;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state for the node - single store instance shared by all components.
pub struct NodeState {
    pub store: Arc<SequenceStore>,
    pub config: NodeConfig,
}

/// A Cadence node instance.
pub struct CadenceNode {
    state: Arc<NodeState>,
}

impl CadenceNode {
    /// Create a new node with an empty run.
    pub fn new(config: NodeConfig) -> Self {
        let store = Arc::new(SequenceStore::new(config.store));
        Self::with_store(config, store)
    }

    /// Create a node around an existing store.
    pub fn with_store(config: NodeConfig, store: Arc<SequenceStore>) -> Self {
        Self {
            state: Arc::new(NodeState { store, config }),
        }
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<NodeState> {
        Arc::clone(&self.state)
    }

    /// Get the shared store.
    pub fn store(&self) -> Arc<SequenceStore> {
        Arc::clone(&self.state.store)
    }

    /// Build the HTTP router for this node.
    pub fn router(&self) -> Router {
        api::build_router(self.state())
    }

    /// Run the node: admin socket in the background, HTTP in the foreground.
    pub async fn run(self) -> Result<()> {
        let config = &self.state.config;
        tracing::info!("Cadence node starting");
        tracing::info!("  API: http://{}", config.api_addr);
        tracing::info!("  Admin: {:?}", config.admin_socket);

        if let Some(path) = &config.admin_socket {
            let admin_socket = AdminSocket::new(self.store(), path.clone());
            tokio::spawn(async move {
                if let Err(e) = admin_socket.run().await {
                    tracing::error!("Admin socket error: {}", e);
                }
            });
        }

        let listener = TcpListener::bind(config.api_addr).await?;
        self.serve(listener).await
    }

    /// Serve the HTTP API on an already bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        tracing::info!("HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Cadence node stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
