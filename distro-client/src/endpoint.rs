//! Declarative endpoint definitions
//!
//! A resource module declares each backend operation once, as a constant:
//! how to build the request from the argument, and which tags the result
//! provides (queries) or invalidates (mutations). The cache never sees the
//! declarations, only the tags they compute.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::cache::CacheKey;
use crate::request::RequestSpec;
use crate::tags::Tag;

/// Read operation whose result is cached
pub struct QueryEndpoint<A, T> {
    pub name: &'static str,
    pub request: fn(&A) -> RequestSpec,
    pub provides: fn(&A, &T) -> Vec<Tag>,
}

impl<A: Serialize, T> QueryEndpoint<A, T> {
    pub fn cache_key(&self, arg: &A) -> CacheKey {
        CacheKey::new(self.name, arg)
    }
}

impl<A, T> Clone for QueryEndpoint<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, T> Copy for QueryEndpoint<A, T> {}

impl<A, T> fmt::Debug for QueryEndpoint<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEndpoint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Write operation that invalidates cached reads on success
pub struct MutationEndpoint<A, T> {
    pub name: &'static str,
    pub request: fn(&A) -> RequestSpec,
    /// Result is `None` when the server accepted the write but its response
    /// did not decode; the tags then come from the argument alone.
    pub invalidates: fn(&A, Option<&T>) -> Vec<Tag>,
    /// Checked before any request is made
    pub validate: Option<fn(&A) -> Result<(), ValidationErrors>>,
}

impl<A, T> Clone for MutationEndpoint<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, T> Copy for MutationEndpoint<A, T> {}

impl<A, T> fmt::Debug for MutationEndpoint<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationEndpoint")
            .field("name", &self.name)
            .field("validated", &self.validate.is_some())
            .finish_non_exhaustive()
    }
}

/// Argument of a targeted update: the item id plus the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ById<B> {
    pub id: i64,
    pub body: B,
}

impl<B> ById<B> {
    pub fn new(id: i64, body: B) -> Self {
        Self { id, body }
    }
}

/// Validator for arguments that are themselves a form payload
pub fn validate_arg<A: Validate>(arg: &A) -> Result<(), ValidationErrors> {
    arg.validate()
}

/// Validator for [`ById`] arguments
pub fn validate_body<B: Validate>(arg: &ById<B>) -> Result<(), ValidationErrors> {
    arg.body.validate()
}
