//! Auth endpoints

use shared::{LoginRequest, LoginResponse, UserInfo};

use crate::endpoint::{MutationEndpoint, QueryEndpoint, validate_arg};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType};

/// Current user of the session token
pub const ME: QueryEndpoint<(), UserInfo> = QueryEndpoint {
    name: "getMe",
    request: |_| RequestSpec::get("/auth/me"),
    provides: |_, _| vec![Tag::of(TagType::Auth)],
};

/// Exchange credentials for a token (see [`Api::login`](super::Api::login))
pub const LOGIN: MutationEndpoint<LoginRequest, LoginResponse> = MutationEndpoint {
    name: "login",
    request: |body| RequestSpec::post("/auth/login").json(body),
    invalidates: |_, _| vec![Tag::of(TagType::Auth)],
    validate: Some(validate_arg::<LoginRequest>),
};
