//! # lichess-mcp
//!
//! Exposes the Lichess REST API as schema-validated, named tool invocations
//! for Model Context Protocol clients.
//!
//! The invocation gateway validates loosely-typed arguments, encodes them
//! into an authenticated HTTP request, dispatches it and normalizes the
//! response (JSON, NDJSON record streams or raw PGN) into one text payload
//! or a classified error.

pub mod config;
pub mod credentials;
pub mod interfaces;
pub mod mcp;
pub mod tools;

pub use config::GatewayConfig;
pub use credentials::CredentialStore;
pub use interfaces::{ErrorKind, ToolError, ToolGateway};
pub use mcp::McpServer;
pub use tools::ToolSpec;
