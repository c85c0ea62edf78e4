//! Recording fake transport for gateway and server tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use super::adapter::{HttpTransport, RawResponse, TransportFailure};
use super::response::ContentKind;
use crate::tools::request::RequestSpec;

/// One call observed by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: RequestSpec,
    pub bearer: Option<String>,
}

/// Replays queued outcomes in order and records every request it receives.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportFailure>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, kind: ContentKind, body: &str) -> Self {
        self.outcomes.lock().push_back(Ok(RawResponse {
            status,
            content_kind: kind,
            body: Bytes::from(body.to_string()),
        }));
        self
    }

    pub fn respond_json(self, status: u16, body: &str) -> Self {
        self.respond(status, ContentKind::Json, body)
    }

    pub fn fail(self, failure: TransportFailure) -> Self {
        self.outcomes.lock().push_back(Err(failure));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(
        &self,
        request: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportFailure> {
        self.calls.lock().push(RecordedCall {
            request: request.clone(),
            bearer: bearer.map(String::from),
        });
        self.outcomes.lock().pop_front().unwrap_or_else(|| {
            Ok(RawResponse {
                status: 200,
                content_kind: ContentKind::Json,
                body: Bytes::from_static(b"{}"),
            })
        })
    }
}
