//! Shared types for the distribution admin client
//!
//! Data-transfer records for every backend resource, auth DTOs
//! and the backend error body.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{Credentials, LoginRequest, LoginResponse, UserInfo};
pub use models::Role;
pub use response::{ErrorBody, MessageResponse};
