//! Model Context Protocol (MCP) surface.
//!
//! Exposes the tool gateway to MCP clients: `initialize`, `ping`,
//! `tools/list` and `tools/call` over newline-delimited JSON-RPC 2.0.

pub mod protocol;
pub mod server;
pub mod transports;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use transports::run_stdio;
