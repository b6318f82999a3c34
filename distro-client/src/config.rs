//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | DISTRO_API_URL | http://localhost:8000/api | Backend base URL |
//! | DISTRO_REQUEST_TIMEOUT_SECS | 30 | Request timeout (seconds) |
//! | DISTRO_STORAGE_DIR | (unset, in-memory session) | Directory for the persisted session |
//! | DISTRO_CACHE_KEEP_UNUSED_SECS | 60 | Idle window before an unused query is evicted |

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Storage key of the persisted `{ user, token }` record
pub const DEFAULT_SESSION_KEY: &str = "distro_admin_auth";

/// Client configuration for connecting to the backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.example.com/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session, `None` keeps it in memory
    pub storage_dir: Option<PathBuf>,

    /// Key of the persisted session record
    pub session_key: String,

    /// How long an unsubscribed query stays cached
    pub keep_unused_for: Duration,

    /// Drop the session when the server answers 401
    pub clear_session_on_unauthorized: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            storage_dir: None,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            keep_unused_for: Duration::from_secs(60),
            clear_session_on_unauthorized: true,
        }
    }

    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        let mut config = Self::new(
            std::env::var("DISTRO_API_URL").unwrap_or_else(|_| "http://localhost:8000/api".into()),
        );
        config.timeout = std::env::var("DISTRO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config.storage_dir = std::env::var("DISTRO_STORAGE_DIR").ok().map(PathBuf::from);
        config.keep_unused_for = std::env::var("DISTRO_CACHE_KEEP_UNUSED_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session under this directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the persisted session key
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Set the idle eviction window
    pub fn with_keep_unused_for(mut self, window: Duration) -> Self {
        self.keep_unused_for = window;
        self
    }

    /// Keep the session on 401 responses
    pub fn keep_session_on_unauthorized(mut self) -> Self {
        self.clear_session_on_unauthorized = false;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ClientError::Config("base URL is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {url}"
            )));
        }
        if self.session_key.is_empty() {
            return Err(ClientError::Config("session key is empty".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
