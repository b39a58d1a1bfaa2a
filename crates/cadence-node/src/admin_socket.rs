//! Unix socket server for admin commands.
//!
//! Operator actions that are not part of normal request flow: resetting the
//! run and inspecting its state.

use crate::error::Result;
use cadence_store::{SequenceStore, Snapshot};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Admin command sent over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AdminCommand {
    /// Discard the live map and any frozen result
    Reset,
    /// Current phase and sizes
    Status,
    /// Ping (health check)
    Ping,
}

/// Response from admin command.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    Snapshot { snapshot: Snapshot },
    Pong,
}

/// Admin socket server.
pub struct AdminSocket {
    store: Arc<SequenceStore>,
    socket_path: PathBuf,
}

impl AdminSocket {
    /// Create a new admin socket server.
    pub fn new(store: Arc<SequenceStore>, socket_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            socket_path: socket_path.into(),
        }
    }

    /// Bind the socket, replacing a stale one.
    pub fn bind(&self) -> Result<UnixListener> {
        let _ = std::fs::remove_file(&self.socket_path);
        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("Admin socket listening on {:?}", self.socket_path);
        Ok(listener)
    }

    /// Run the admin socket server.
    pub async fn run(&self) -> Result<()> {
        let listener = self.bind()?;
        self.serve(listener).await
    }

    /// Accept connections on a bound listener forever.
    pub async fn serve(&self, listener: UnixListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let store = Arc::clone(&self.store);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, store).await {
                            tracing::error!("Admin connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept admin connection: {}", e);
                }
            }
        }
    }
}

async fn handle_connection(stream: UnixStream, store: Arc<SequenceStore>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    while reader.read_line(&mut line).await? > 0 {
        let response = match serde_json::from_str::<AdminCommand>(&line) {
            Ok(cmd) => execute_command(cmd, &store),
            Err(e) => AdminResponse::Error {
                error: format!("Invalid command: {}", e),
            },
        };

        let response_json = serde_json::to_string(&response)? + "\n";
        writer.write_all(response_json.as_bytes()).await?;
        line.clear();
    }

    Ok(())
}

/// Apply one admin command to the store.
pub fn execute_command(cmd: AdminCommand, store: &SequenceStore) -> AdminResponse {
    match cmd {
        AdminCommand::Reset => {
            store.reset();
            tracing::info!("Run reset by admin");
            AdminResponse::Ok {
                message: "Run reset".to_string(),
            }
        }
        AdminCommand::Status => AdminResponse::Snapshot {
            snapshot: store.snapshot(),
        },
        AdminCommand::Ping => AdminResponse::Pong,
    }
}
