//! Error taxonomy and the mapping from HTTP outcomes onto it.

use std::fmt;

use serde_json::Value;

use super::adapter::{RawResponse, TransportFailure};

/// Closed set of failure classes an invocation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing caller input, detected before any network call.
    ValidationError,
    /// No token stored when the tool needs one.
    MissingCredential,
    /// HTTP 404.
    NotFound,
    /// HTTP 400.
    InvalidRequest,
    /// Any other non-success status.
    UpstreamError,
    /// Connection, DNS or timeout failure.
    TransportError,
    /// Body could not be decoded under its declared content kind.
    ParseError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::MissingCredential => "MissingCredential",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::UpstreamError => "UpstreamError",
            ErrorKind::TransportError => "TransportError",
            ErrorKind::ParseError => "ParseError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified invocation failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn missing_credential() -> Self {
        Self::new(
            ErrorKind::MissingCredential,
            "no Lichess token set. Call set_token first.",
        )
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Prefix the message with the failed operation, e.g. `Failed to fetch user profile: ...`.
    pub fn in_context(self, action: &str) -> Self {
        Self {
            kind: self.kind,
            message: format!("Failed to {}: {}", action, self.message),
        }
    }
}

/// Context the mapper needs to phrase a failure for one tool.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// Operation phrase, e.g. "fetch user profile".
    pub action: &'a str,
    /// What the resource is called, e.g. "user".
    pub resource_label: Option<&'a str>,
    /// The identifier the caller asked for, e.g. the username.
    pub resource_id: Option<&'a str>,
}

/// Map a non-success HTTP response onto the taxonomy.
pub fn map_status(response: &RawResponse, ctx: ErrorContext<'_>) -> ToolError {
    let status = response.status;
    let remote = remote_error_message(&response.body);

    let error = match status {
        404 => {
            let message = match (ctx.resource_label, ctx.resource_id) {
                (Some(label), Some(id)) => format!("{} '{}' not found", label, id),
                (None, Some(id)) => format!("'{}' not found", id),
                _ => remote.unwrap_or_else(|| "resource not found".to_string()),
            };
            ToolError::new(ErrorKind::NotFound, message)
        }
        400 => ToolError::new(
            ErrorKind::InvalidRequest,
            match remote {
                Some(detail) => format!("invalid request: {}", detail),
                None => "invalid request".to_string(),
            },
        ),
        _ => {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Status");
            let mut message = format!("Lichess API error ({} {})", status, reason);
            if let Some(detail) = remote {
                message.push_str(": ");
                message.push_str(&detail);
            }
            ToolError::new(ErrorKind::UpstreamError, message)
        }
    };

    log::warn!("{} returned HTTP {} ({})", ctx.action, status, error.kind);
    error.in_context(ctx.action)
}

/// Map a failure below HTTP (connect, DNS, timeout, body read).
pub fn map_transport(failure: &TransportFailure, action: &str) -> ToolError {
    log::warn!("{} failed before a response arrived: {}", action, failure);
    ToolError::new(ErrorKind::TransportError, failure.to_string()).in_context(action)
}

/// Lichess reports failures as `{"error": "..."}`; pull that out when present.
fn remote_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
