//! Canned-response transport for tests

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Transport, decode_response};
use crate::error::ClientResult;
use crate::request::PreparedRequest;

type RouteKey = (String, String);

/// Transport answering from a table of `(method, path)` -> `(status, body)`.
///
/// Unknown routes answer 404. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<RouteKey, (u16, Value)>>,
    requests: Mutex<Vec<PreparedRequest>>,
    latency: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response (uses tokio time, so paused clocks apply)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer `method path` with 200 and `body`
    pub fn respond(&self, method: &str, path: &str, body: Value) {
        self.routes
            .lock()
            .insert((method.to_string(), path.to_string()), (200, body));
    }

    /// Answer `method path` with an error status
    pub fn respond_error(&self, method: &str, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }

    /// Number of calls to `method path`
    pub fn calls(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method.as_str() == method && r.path_and_query == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: PreparedRequest) -> ClientResult<Value> {
        let key = (
            request.method.as_str().to_string(),
            request.path_and_query.clone(),
        );
        self.requests.lock().push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        // Looked up after the delay so tests can swap the answer mid-flight
        let answer = self.routes.lock().get(&key).cloned();
        let (status, body) = answer.unwrap_or((404, serde_json::json!({ "detail": "Not found." })));
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = serde_json::to_vec(&body)?;
        decode_response(status, &bytes)
    }
}
