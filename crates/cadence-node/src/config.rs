//! Node configuration.

use crate::error::{Error, Result};
use cadence_store::StoreConfig;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default HTTP listen address.
pub const DEFAULT_API_ADDR: &str = "0.0.0.0:8080";

/// Default admin socket path.
pub const DEFAULT_ADMIN_SOCKET: &str = "./cadence-admin.sock";

/// Configuration for a Cadence node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Admin socket path (for cadence-admin CLI). `None` disables it.
    pub admin_socket: Option<PathBuf>,

    /// Sequence store tuning
    pub store: StoreConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            admin_socket: Some(PathBuf::from(DEFAULT_ADMIN_SOCKET)),
            store: StoreConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("CADENCE_API_ADDR") {
            config.api_addr = addr
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid CADENCE_API_ADDR {:?}: {}", addr, e)))?;
        }

        if let Some(path) = lookup("CADENCE_ADMIN_SOCKET") {
            let path = path.trim();
            config.admin_socket = (!path.is_empty()).then(|| PathBuf::from(path));
        }

        if let Some(preview) = lookup("CADENCE_MISSING_PREVIEW") {
            config.store.missing_preview = preview.trim().parse().map_err(|e| {
                Error::Config(format!("Invalid CADENCE_MISSING_PREVIEW {:?}: {}", preview, e))
            })?;
        }

        if let Some(limit) = lookup("CADENCE_LIST_LIMIT") {
            config.store.list_limit = limit.trim().parse().map_err(|e| {
                Error::Config(format!("Invalid CADENCE_LIST_LIMIT {:?}: {}", limit, e))
            })?;
        }

        Ok(config)
    }
}
