//! HttpTransport trait, the seam between the gateway and the network.

use async_trait::async_trait;
use bytes::Bytes;

use super::response::ContentKind;
use crate::tools::request::RequestSpec;

/// Performs one outbound HTTP call per invocation.
///
/// Implementations attach `Authorization: Bearer <token>` when `bearer` is
/// `Some`, pick the `Content-Type` from the request body (JSON when the body
/// does not dictate otherwise) and never retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Human-readable transport name, used in logs.
    fn name(&self) -> &str;

    /// Send `request` and return the raw response, whatever its status.
    ///
    /// Only failures below HTTP (connect, DNS, timeout, body read) are
    /// reported as errors; non-2xx statuses come back as a `RawResponse`.
    async fn send(
        &self,
        request: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportFailure>;
}

/// Status, declared content kind and undecoded body of a response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_kind: ContentKind,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that happen before a complete HTTP response is available.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportFailure {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("HTTP request failed: {0}")]
    Request(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let mut response = RawResponse {
            status: 200,
            content_kind: ContentKind::Json,
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }

    #[test]
    fn test_transport_failure_display() {
        let failure = TransportFailure::Timeout("after 30000ms".into());
        assert_eq!(failure.to_string(), "Request timed out: after 30000ms");
    }
}
