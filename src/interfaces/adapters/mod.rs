//! Built-in transports.
//!
//! Each adapter implements `HttpTransport`. The gateway only talks to the
//! trait, so tests substitute a recording fake.

pub mod rest_api;

pub use rest_api::RestApiAdapter;
