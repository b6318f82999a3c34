//! Oneshot HTTP transport - in-memory calls into an axum `Router`
//!
//! Uses Tower's `oneshot` to call the router directly, with no network.
//! Handy for embedding a backend in the same process and for tests.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use serde_json::Value;
use tower::ServiceExt;

use super::{Transport, decode_response};
use crate::error::{ClientError, ClientResult};
use crate::request::PreparedRequest;

/// Oneshot HTTP client (in-memory)
///
/// # Example
///
/// ```ignore
/// let router: Router = build_app().with_state(state);
/// let transport = OneshotHttpClient::new(router);
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - Fully built router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for OneshotHttpClient {
    async fn send(&self, request: PreparedRequest) -> ClientResult<Value> {
        let mut builder = Request::builder()
            .method(request.method)
            .uri(&request.path_and_query);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(request.headers);
        }
        let body = match &request.body {
            Some(value) => Body::from(serde_json::to_vec(value)?),
            None => Body::empty(),
        };
        let http_request = builder
            .body(body)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {e}")))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {e}")))?;
        decode_response(status, &bytes)
    }
}
