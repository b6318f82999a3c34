//! Session state
//!
//! Two states: authenticated (user + token) or not. Every authenticated
//! transition is written to durable storage, and the store is hydrated from
//! it at start, so a restart keeps the login.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{Credentials, Role, UserInfo};

use crate::error::ClientResult;
use crate::logger::SECURITY_TARGET;

/// In-memory session state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Credentials),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            SessionState::Authenticated(creds) => Some(&creds.user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated(creds) => Some(&creds.token),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

#[derive(Debug)]
struct SessionInner {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
    key: String,
}

/// Shared handle to the session (cheap to clone)
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Start unauthenticated, without reading storage
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(SessionState::Unauthenticated),
                storage,
                key: key.into(),
            }),
        }
    }

    /// Start from the persisted record.
    ///
    /// A missing record means logged out. So does a record that cannot be
    /// read or parsed; it is removed so the next start is clean.
    pub fn hydrate(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        let inner = &store.inner;

        let raw = match inner.storage.load(&inner.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %inner.key, error = %e, "failed to read persisted session");
                None
            }
        };

        if let Some(raw) = raw {
            match serde_json::from_str::<Credentials>(&raw) {
                Ok(creds) => {
                    tracing::info!(
                        target: SECURITY_TARGET,
                        user = %creds.user.username,
                        role = %creds.user.role,
                        "session restored"
                    );
                    *inner.state.write() = SessionState::Authenticated(creds);
                }
                Err(e) => {
                    tracing::warn!(
                        target: SECURITY_TARGET,
                        key = %inner.key,
                        error = %e,
                        "persisted session is corrupt, starting logged out"
                    );
                    if let Err(e) = inner.storage.remove(&inner.key) {
                        tracing::warn!(error = %e, "failed to remove corrupt session record");
                    }
                }
            }
        }

        store
    }

    /// Current state (cloned snapshot)
    pub fn state(&self) -> SessionState {
        self.inner.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.read().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.inner.state.read().user().cloned()
    }

    /// Persist the credentials, then enter the authenticated state.
    ///
    /// If the record cannot be written the in-memory state is unchanged.
    pub fn set_credentials(&self, credentials: Credentials) -> ClientResult<()> {
        let raw = serde_json::to_string(&credentials)?;
        if let Err(e) = self.inner.storage.store(&self.inner.key, &raw) {
            tracing::error!(
                target: SECURITY_TARGET,
                user = %credentials.user.username,
                error = %e,
                "failed to persist session, staying logged out"
            );
            return Err(e.into());
        }
        tracing::info!(
            target: SECURITY_TARGET,
            user = %credentials.user.username,
            role = %credentials.user.role,
            "session established"
        );
        *self.inner.state.write() = SessionState::Authenticated(credentials);
        Ok(())
    }

    /// Leave the authenticated state and clear the persisted record
    pub fn logout(&self) -> ClientResult<()> {
        let previous = std::mem::take(&mut *self.inner.state.write());
        if let SessionState::Authenticated(creds) = previous {
            tracing::info!(target: SECURITY_TARGET, user = %creds.user.username, "session cleared");
        }
        self.inner.storage.remove(&self.inner.key)?;
        Ok(())
    }
}
