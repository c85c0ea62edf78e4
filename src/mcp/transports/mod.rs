//! Transports that carry MCP messages between a client and [`McpServer`].
//!
//! [`McpServer`]: super::server::McpServer

pub mod stdio;

pub use stdio::{run_stdio, serve};
