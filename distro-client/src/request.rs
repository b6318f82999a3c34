//! Request building and the shared base query
//!
//! Endpoint declarations produce a [`RequestSpec`]; [`BaseQuery`] turns it
//! into a [`PreparedRequest`] (headers, query string) and hands it to the
//! transport. Every call of the client passes through `BaseQuery::execute`.

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{QueryCache, WeakQueryCache};
use crate::error::{ClientError, ClientResult, QueryError};
use crate::logger::SECURITY_TARGET;
use crate::session::SessionStore;
use crate::transport::Transport;

/// Request body of a [`RequestSpec`]
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Body failed to serialize; reported when the request is executed
    Invalid(String),
}

/// Declarative description of one backend call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = match serde_json::to_value(body) {
            Ok(value) => RequestBody::Json(value),
            Err(e) => RequestBody::Invalid(e.to_string()),
        };
        self
    }

    /// Add one query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when it is set
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Add every set field of a filter struct as a query parameter.
    ///
    /// `None` fields are skipped, so an empty filter and no filter are the
    /// same request.
    pub fn params<F: Serialize>(mut self, filter: &F) -> Self {
        match serde_json::to_value(filter) {
            Ok(Value::Object(fields)) => {
                for (key, value) in fields {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
            }
            Ok(Value::Null) => {}
            Ok(other) => {
                self.body = RequestBody::Invalid(format!("query filter must be an object, got {other}"));
            }
            Err(e) => self.body = RequestBody::Invalid(e.to_string()),
        }
        self
    }

    /// Path with the percent-encoded query string appended
    pub fn path_and_query(&self) -> String {
        let path = format!("/{}", self.path.trim_start_matches('/'));
        if self.query.is_empty() {
            return path;
        }
        let query = reqwest::Url::parse("http://localhost/")
            .map(|mut url| {
                url.query_pairs_mut().extend_pairs(self.query.iter());
                url.query().unwrap_or_default().to_string()
            })
            .unwrap_or_default();
        format!("{path}?{query}")
    }
}

/// Request ready to be sent by a [`Transport`]
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Single entry point of every request: headers, transport, session upkeep
#[derive(Debug, Clone)]
pub struct BaseQuery {
    transport: Arc<dyn Transport>,
    session: SessionStore,
    clear_session_on_unauthorized: bool,
    /// Dropped together with the session on a 401. Weak, since the cache's
    /// fetchers hold this query.
    cache: Option<WeakQueryCache>,
}

impl BaseQuery {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: SessionStore,
        clear_session_on_unauthorized: bool,
    ) -> Self {
        Self {
            transport,
            session,
            clear_session_on_unauthorized,
            cache: None,
        }
    }

    /// Reset `cache` whenever a 401 ends the session
    pub fn with_cache(mut self, cache: &QueryCache) -> Self {
        self.cache = Some(cache.downgrade());
        self
    }

    /// Attach the JSON content type and, when logged in, the bearer token
    pub fn prepare(&self, spec: RequestSpec) -> ClientResult<PreparedRequest> {
        let path_and_query = spec.path_and_query();
        let body = match spec.body {
            RequestBody::Empty => None,
            RequestBody::Json(value) => Some(value),
            RequestBody::Invalid(reason) => return Err(ClientError::InvalidRequest(reason)),
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::InvalidRequest(format!("invalid token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(PreparedRequest {
            path_and_query,
            method: spec.method,
            headers,
            body,
        })
    }

    /// Send a request and return the decoded JSON body
    pub async fn execute(&self, spec: RequestSpec) -> ClientResult<Value> {
        let request = self.prepare(spec)?;
        let method = request.method.clone();
        let path = request.path_and_query.clone();

        match self.transport.send(request).await {
            Ok(value) => {
                tracing::trace!(%method, %path, "request succeeded");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(%method, %path, status = ?e.status(), error = %e, "request failed");
                if e.is_unauthorized()
                    && self.clear_session_on_unauthorized
                    && self.session.is_authenticated()
                {
                    tracing::warn!(target: SECURITY_TARGET, "server rejected the session token, logging out");
                    if let Err(clear_err) = self.session.logout() {
                        tracing::error!(error = %clear_err, "failed to clear persisted session");
                    }
                    if let Some(cache) = self.cache.as_ref().and_then(WeakQueryCache::upgrade) {
                        cache.reset_with_error(QueryError::from(&e));
                    }
                }
                Err(e)
            }
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
