//! API response types
//!
//! Shapes the backend uses outside of plain resource bodies.

use serde::{Deserialize, Serialize};

/// Error body returned with 4xx/5xx responses
///
/// Backends disagree on the field name, so every common spelling is accepted:
/// ```json
/// { "message": "Zone name already exists", "code": "E1001" }
/// { "detail": "Not found." }
/// { "error": "invalid token" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorBody {
    /// First human-readable message present in the body
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .or(self.error.as_deref())
    }
}

/// Acknowledgement body (e.g. for deletes)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
