//! # Invocation Gateway
//!
//! Connects named tool calls to the Lichess HTTP API. Every call passes
//! through one pipeline:
//!
//! ```text
//! invoke(name, arguments)
//!   │
//!   ▼
//! ToolSpec::validate()        descriptors from tools::catalog
//!   │ ValidationError ──────────────────────────────┐
//!   ▼                                               │
//! CredentialStore::get()      one snapshot          │
//!   │ MissingCredential ────────────────────────────┤
//!   ▼                                               │
//! build(&Args) → RequestSpec                        │
//!   ▼                                               │
//! HttpTransport::send()       RestApiAdapter        │
//!   │ TransportError / NotFound / InvalidRequest /  │
//!   │ UpstreamError ────────────────────────────────┤
//!   ▼                                               │
//! normalize()                 Text | Json | Records │
//!   │ ParseError ───────────────────────────────────┤
//!   ▼                                               ▼
//! Ok(String)                                   Err(ToolError)
//! ```
//!
//! ## Extending
//!
//! To talk to a different backend, implement `HttpTransport` and pass it to
//! `ToolGateway::new`.

pub mod adapter;
pub mod adapters;
pub mod error;
pub mod gateway;
pub mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{HttpTransport, RawResponse, TransportFailure};
pub use error::{ErrorKind, ToolError};
pub use gateway::ToolGateway;
pub use response::{ContentKind, NormalizedResult};
