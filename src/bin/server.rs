//! lichess-mcp stdio server binary.
//!
//! Speaks MCP (newline-delimited JSON-RPC 2.0) on stdin/stdout. Logs go to
//! stderr.
//!
//! # Environment Variables
//!
//! - `LICHESS_TOKEN`: initial API token (optional; `set_token` can set one later)
//! - `LICHESS_BASE_URL`: API origin (default: https://lichess.org)
//! - `LICHESS_TIMEOUT_MS`: HTTP timeout (default: 30000)
//! - `RUST_LOG`: Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use anyhow::Context;
use lichess_mcp::mcp::run_stdio;
use lichess_mcp::{GatewayConfig, McpServer, ToolGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for protocol messages.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GatewayConfig::from_env().context("Failed to read configuration")?;
    let gateway = ToolGateway::from_config(&config).context("Failed to build HTTP transport")?;

    tracing::info!(
        "lichess-mcp {} starting ({} tools)",
        env!("CARGO_PKG_VERSION"),
        gateway.tools().count()
    );

    let server = McpServer::new(gateway);
    run_stdio(&server).await.context("stdio transport failed")?;

    Ok(())
}
