//! Cadence Node - HTTP front end for the sequence store
//!
//! Accepts numbered instructions from concurrent clients, validates them at
//! the boundary, and feeds them into a shared [`SequenceStore`]. Once a
//! terminator completes the message, the node reports its minimal repeating
//! unit and rejects further writes until an operator resets the run.
//!
//! # Architecture
//!
//! - **Boundary**: JSON validation, before the store is touched
//! - **API**: axum routes mapping store outcomes to status codes
//! - **Admin Socket**: Unix socket for operator commands (cadence-admin CLI)
//! - **Config**: environment-driven settings
//!
//! # Example
//!
//! ```no_run
//! use cadence_node::{CadenceNode, NodeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::from_env()?;
//!     CadenceNode::new(config).run().await?;
//!     Ok(())
//! }
//! ```
//!
//! [`SequenceStore`]: cadence_store::SequenceStore

pub mod admin_socket;
pub mod api;
pub mod boundary;
pub mod config;
pub mod error;
pub mod node;

pub use boundary::{InstructionRequest, ValidationError};
pub use config::NodeConfig;
pub use error::{Error, Result};
pub use node::{CadenceNode, NodeState};
