//! Client-related types shared between the backend and the dashboard client
//!
//! Auth request/response DTOs and the persisted session record.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    /// Set for distributor-scoped accounts
    #[serde(default)]
    pub distributor_id: Option<i64>,
}

/// Authenticated identity, as held in memory and in durable storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub user: UserInfo,
    pub token: String,
}

impl From<LoginResponse> for Credentials {
    fn from(resp: LoginResponse) -> Self {
        Self {
            user: resp.user,
            token: resp.token,
        }
    }
}
