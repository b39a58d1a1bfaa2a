//! Cadence Node binary
//!
//! Reassembles numbered instructions and reports the message's repeating unit.

use cadence_node::{CadenceNode, NodeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_node=info,cadence_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cadence Node");

    let config = NodeConfig::from_env()?;

    CadenceNode::new(config).run().await?;

    Ok(())
}
