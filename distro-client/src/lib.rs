//! Distro Client - cached API client for the distribution admin dashboard
//!
//! Declarative endpoints with tag-based cache invalidation, a persisted
//! session and the dashboard's route guards.

pub mod api;
pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod guard;
pub mod logger;
pub mod request;
pub mod session;
pub mod tags;
pub mod transport;

pub use api::Api;
pub use cache::{CacheKey, QueryCache, QueryResult, QueryStatus, QuerySubscription};
pub use config::ClientConfig;
pub use endpoint::{ById, MutationEndpoint, QueryEndpoint};
pub use error::{ClientError, ClientResult, QueryError, QueryErrorKind};
pub use guard::{Navigation, PublicOnly, RequireAuth, RouteGuard, RouteTable};
pub use session::{SessionState, SessionStore};
pub use tags::{Tag, TagId, TagType};

// Re-export shared types for convenience
pub use shared::{Credentials, LoginResponse, Role, UserInfo};
