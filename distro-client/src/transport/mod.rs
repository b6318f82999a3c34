//! Transports: where a prepared request actually goes
//!
//! - [`NetworkHttpClient`]: reqwest over HTTP(S)
//! - [`OneshotHttpClient`]: in-memory axum `Router` (feature `in-process`)
//! - [`MockTransport`]: canned responses for tests

use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use shared::ErrorBody;

use crate::error::{ClientError, ClientResult};
use crate::request::PreparedRequest;

mod mock;
mod network;
#[cfg(feature = "in-process")]
mod oneshot;

pub use mock::MockTransport;
pub use network::NetworkHttpClient;
#[cfg(feature = "in-process")]
pub use oneshot::OneshotHttpClient;

/// Sends prepared requests and returns the JSON body of 2xx responses
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: PreparedRequest) -> ClientResult<Value>;
}

/// Turn a status and raw body into the client's result shape.
///
/// 2xx with an empty body yields `Value::Null`. Non-2xx yields
/// [`ClientError::Api`] with the parsed body, if it was JSON.
pub(crate) fn decode_response(status: StatusCode, bytes: &[u8]) -> ClientResult<Value> {
    if status.is_success() {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")));
    }

    let text = String::from_utf8_lossy(bytes).trim().to_string();
    let body = serde_json::from_slice::<Value>(bytes).ok();
    let message = body
        .as_ref()
        .and_then(|v| serde_json::from_value::<ErrorBody>(v.clone()).ok())
        .and_then(|b| b.text().map(str::to_string))
        .or_else(|| (!text.is_empty() && body.is_none()).then(|| text.clone()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        body,
    })
}
