//! Dashboard API client
//!
//! [`Api`] ties the pieces together: endpoint declarations from the
//! resource modules, the shared [`BaseQuery`], the [`QueryCache`] and the
//! [`SessionStore`].
//!
//! # Example
//!
//! ```no_run
//! use distro_client::api::{Api, zones};
//! use distro_client::ClientConfig;
//!
//! # async fn example() -> Result<(), distro_client::ClientError> {
//! let api = Api::new(&ClientConfig::from_env())?;
//! api.login("admin", "secret").await?;
//!
//! // Mounted view: stays fresh while the subscription lives
//! let mut zones_view = api.subscribe(&zones::GET_ZONES, ());
//! let zones = zones_view.settled().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod credit_limits;
pub mod orders;
pub mod products;
pub mod routes;
pub mod shops;
pub mod staff;
pub mod wallets;
pub mod warehouses;
pub mod zones;

use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{LoginRequest, UserInfo};

use crate::cache::{FetchOutcome, Fetched, Fetcher, QueryCache, QuerySnapshot, QuerySubscription};
use crate::config::ClientConfig;
use crate::endpoint::{MutationEndpoint, QueryEndpoint};
use crate::error::{ClientError, ClientResult, QueryError};
use crate::request::BaseQuery;
use crate::session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
use crate::tags::Tag;
use crate::transport::{NetworkHttpClient, Transport};

#[derive(Debug)]
struct ApiInner {
    base: BaseQuery,
    cache: QueryCache,
}

/// Cached, session-aware client of the backend (cheap to clone)
#[derive(Debug, Clone)]
pub struct Api {
    inner: Arc<ApiInner>,
}

// ============================================================================
// Construction
// ============================================================================

impl Api {
    /// Network client with the session restored from durable storage.
    ///
    /// The session lives in `storage_dir` when configured, in memory
    /// otherwise.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = Arc::new(NetworkHttpClient::new(config)?);
        let storage: Arc<dyn SessionStorage> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(MemoryStorage::new()),
        };
        let session = SessionStore::hydrate(storage, config.session_key.clone());
        Ok(Self::with_transport(transport, session, config))
    }

    /// Client over any transport (in-process router, mock)
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        session: SessionStore,
        config: &ClientConfig,
    ) -> Self {
        let cache = QueryCache::new(config.keep_unused_for);
        let base = BaseQuery::new(transport, session, config.clear_session_on_unauthorized)
            .with_cache(&cache);
        Self {
            inner: Arc::new(ApiInner { base, cache }),
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.inner.base.session()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }
}

// ============================================================================
// Queries and mutations
// ============================================================================

impl Api {
    /// Mount a query: fetches on a miss and refetches on invalidation for as
    /// long as the subscription lives
    pub fn subscribe<A, T>(&self, endpoint: &QueryEndpoint<A, T>, arg: A) -> QuerySubscription<T>
    where
        A: Serialize + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        let key = endpoint.cache_key(&arg);
        let fetcher = self.fetcher(*endpoint, arg);
        let (entry, rx) = self.inner.cache.subscribe(key.clone(), fetcher);
        QuerySubscription::new(key, entry, rx, self.inner.cache.clone())
    }

    /// One-off read through the cache
    pub async fn query<A, T>(&self, endpoint: &QueryEndpoint<A, T>, arg: A) -> ClientResult<T>
    where
        A: Serialize + Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        let mut subscription = self.subscribe(endpoint, arg);
        let result = subscription.settled().await;
        if let Some(error) = result.error {
            return Err(ClientError::Query(error));
        }
        result.data.ok_or_else(|| {
            ClientError::Internal(format!("{} settled without data", subscription.key()))
        })
    }

    /// Run a mutation and invalidate the tags it declares.
    ///
    /// Once the server accepted the write, invalidation happens even if the
    /// response does not decode into `T`; the decode error is returned after.
    pub async fn mutate<A, T>(&self, endpoint: &MutationEndpoint<A, T>, arg: A) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        if let Some(validate) = endpoint.validate {
            validate(&arg)?;
        }

        let value = self.inner.base.execute((endpoint.request)(&arg)).await?;
        let result = serde_json::from_value::<T>(value);

        let tags = (endpoint.invalidates)(&arg, result.as_ref().ok());
        let refetching = self.inner.cache.invalidate(&tags);
        match result {
            Ok(result) => {
                tracing::info!(
                    endpoint = endpoint.name,
                    tags = ?tags,
                    refetching,
                    "mutation succeeded"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = endpoint.name,
                    tags = ?tags,
                    refetching,
                    error = %e,
                    "mutation applied but its response did not decode"
                );
                Err(ClientError::InvalidResponse(format!("{}: {e}", endpoint.name)))
            }
        }
    }

    /// Invalidate tags without a mutation
    pub fn invalidate_tags(&self, tags: &[Tag]) -> usize {
        self.inner.cache.invalidate(tags)
    }

    /// Whether the query currently has a cache entry
    pub fn is_cached<A: Serialize, T>(&self, endpoint: &QueryEndpoint<A, T>, arg: &A) -> bool {
        self.inner.cache.contains(&endpoint.cache_key(arg))
    }

    pub fn snapshot<A: Serialize, T>(
        &self,
        endpoint: &QueryEndpoint<A, T>,
        arg: &A,
    ) -> Option<QuerySnapshot> {
        self.inner.cache.snapshot(&endpoint.cache_key(arg))
    }

    fn fetcher<A, T>(&self, endpoint: QueryEndpoint<A, T>, arg: A) -> Fetcher
    where
        A: Send + Sync + 'static,
        T: DeserializeOwned + 'static,
    {
        let base = self.inner.base.clone();
        let arg = Arc::new(arg);
        Arc::new(move || {
            let base = base.clone();
            let arg = arg.clone();
            async move { fetch(&base, endpoint, &arg).await }.boxed()
        })
    }
}

async fn fetch<A, T>(base: &BaseQuery, endpoint: QueryEndpoint<A, T>, arg: &A) -> FetchOutcome
where
    T: DeserializeOwned,
{
    let data = base
        .execute((endpoint.request)(arg))
        .await
        .map_err(|e| QueryError::from(&e))?;
    let typed: T = serde_json::from_value(data.clone()).map_err(QueryError::decode)?;
    let provides = (endpoint.provides)(arg, &typed);
    Ok(Fetched { data, provides })
}

// ============================================================================
// Session
// ============================================================================

impl Api {
    /// Log in and persist the session
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.mutate(&auth::LOGIN, request).await?;
        let user = response.user.clone();
        self.session().set_credentials(response.into())?;
        Ok(user)
    }

    /// Drop the session and every cached query
    pub fn logout(&self) -> ClientResult<()> {
        self.inner.cache.reset();
        self.session().logout()
    }

    /// Current user according to the backend
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.query(&auth::ME, ()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagType;
    use crate::transport::MockTransport;
    use serde_json::json;
    use shared::models::Zone;

    fn api(transport: MockTransport) -> (Api, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let session = SessionStore::new(Arc::new(MemoryStorage::new()), "auth");
        let api = Api::with_transport(transport.clone(), session, &ClientConfig::default());
        (api, transport)
    }

    #[tokio::test]
    async fn test_query_is_served_from_cache() {
        let transport = MockTransport::new();
        transport.respond("GET", "/zones", json!([{ "id": 1, "name": "North" }]));
        let (api, transport) = api(transport);

        let first: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();
        let second: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls("GET", "/zones"), 1);
        assert!(api.is_cached(&zones::GET_ZONES, &()));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_the_network() {
        let (api, transport) = api(MockTransport::new());
        let body = shared::models::ZoneCreate {
            name: String::new(),
            description: None,
            distributor_id: None,
        };

        let err = api.mutate(&zones::CREATE_ZONE, body).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_query_is_reported_once() {
        let transport = MockTransport::new();
        transport.respond_error("GET", "/zones/9", 404, json!({ "detail": "Zone not found" }));
        let (api, transport) = api(transport);

        let err = api.query(&zones::GET_ZONE, 9).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Zone not found");
        assert_eq!(transport.calls("GET", "/zones/9"), 1);
        assert!(api.cache().provided_tags(&zones::GET_ZONE.cache_key(&9)).is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_mutation_response_still_invalidates() {
        let transport = MockTransport::new();
        transport.respond("GET", "/zones/1", json!({ "id": 1, "name": "North" }));
        transport.respond("PUT", "/zones/1", json!({ "message": "updated" }));
        let (api, _transport) = api(transport);
        let _: Zone = api.query(&zones::GET_ZONE, 1).await.unwrap();

        let update = crate::endpoint::ById::new(
            1,
            shared::models::ZoneUpdate {
                name: Some("North-West".into()),
                ..Default::default()
            },
        );
        let err = api.mutate(&zones::UPDATE_ZONE, update).await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(api.snapshot(&zones::GET_ZONE, &1).unwrap().is_stale);
    }

    #[tokio::test]
    async fn test_rejected_token_drops_cached_queries() {
        let transport = MockTransport::new();
        transport.respond(
            "POST",
            "/auth/login",
            json!({
                "token": "tok-1",
                "user": { "id": 1, "username": "admin", "role": "admin" }
            }),
        );
        transport.respond("GET", "/zones", json!([{ "id": 1, "name": "North" }]));
        transport.respond_error("GET", "/auth/me", 401, json!({ "detail": "Token expired" }));
        let (api, _transport) = api(transport);
        api.login("admin", "secret").await.unwrap();
        let _: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();

        let err = api.me().await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(!api.session().is_authenticated());
        assert!(!api.is_cached(&zones::GET_ZONES, &()));
    }

    #[tokio::test]
    async fn test_login_stores_session_and_logout_resets_cache() {
        let transport = MockTransport::new();
        transport.respond(
            "POST",
            "/auth/login",
            json!({
                "token": "tok-1",
                "user": { "id": 1, "username": "admin", "role": "admin" }
            }),
        );
        transport.respond("GET", "/zones", json!([]));
        let (api, _transport) = api(transport);

        let user = api.login("admin", "secret").await.unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(api.session().token().as_deref(), Some("tok-1"));

        let _: Vec<Zone> = api.query(&zones::GET_ZONES, ()).await.unwrap();
        assert!(!api.cache().is_empty());

        api.logout().unwrap();
        assert!(!api.session().is_authenticated());
        assert!(api.cache().is_empty());
        assert_eq!(api.invalidate_tags(&[Tag::of(TagType::Zone)]), 0);
    }
}
