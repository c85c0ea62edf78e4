//! REST adapter: sends a `RequestSpec` to the Lichess HTTP API with reqwest.
//!
//! ## Configuration
//!
//! ```text
//! base_url:   https://lichess.org
//! timeout_ms: 30000
//! user_agent: lichess-mcp/<version>
//! ```
//!
//! Path segments are percent-encoded one by one, the query string is only
//! appended when parameters exist, and the response body is handed back
//! undecoded together with its declared content kind.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;

use super::super::adapter::{HttpTransport, RawResponse, TransportFailure};
use super::super::response::ContentKind;
use crate::config::GatewayConfig;
use crate::tools::request::{HttpMethod, RequestBody, RequestSpec};

/// reqwest-backed transport for the Lichess API.
pub struct RestApiAdapter {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl RestApiAdapter {
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportFailure> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportFailure::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportFailure::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportFailure::Request(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout: config.timeout(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request's path and query against the base URL.
    pub fn url_for(&self, request: &RequestSpec) -> Result<Url, TransportFailure> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TransportFailure::InvalidUrl(format!("{} cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in &request.segments {
                segments.push(segment);
            }
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }

    fn map_error(&self, error: reqwest::Error) -> TransportFailure {
        if error.is_timeout() {
            TransportFailure::Timeout(format!("no response within {}ms", self.timeout.as_millis()))
        } else if error.is_connect() {
            TransportFailure::Connect(error.to_string())
        } else if error.is_builder() {
            TransportFailure::InvalidUrl(error.to_string())
        } else {
            TransportFailure::Request(error.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for RestApiAdapter {
    fn name(&self) -> &str {
        "REST API"
    }

    async fn send(
        &self,
        request: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportFailure> {
        let url = self.url_for(request)?;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder = match &request.body {
            RequestBody::None => builder.header(CONTENT_TYPE, request.body.content_type()),
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Text(text) => builder
                .header(CONTENT_TYPE, request.body.content_type())
                .body(text.clone()),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let content_kind = ContentKind::from_header(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportFailure::Body(e.to_string()))?;

        log::debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path(),
            status,
            body.len()
        );

        Ok(RawResponse {
            status,
            content_kind,
            body,
        })
    }
}
