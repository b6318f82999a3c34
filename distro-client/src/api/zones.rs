//! Zone endpoints

use serde::de::IgnoredAny;
use shared::models::{Zone, ZoneCreate, ZoneUpdate};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

pub const GET_ZONES: QueryEndpoint<(), Vec<Zone>> = QueryEndpoint {
    name: "getZones",
    request: |_| RequestSpec::get("/zones"),
    provides: |_, zones| list_tags(TagType::Zone, zones.iter().map(|z| z.id)),
};

pub const GET_ZONE: QueryEndpoint<i64, Zone> = QueryEndpoint {
    name: "getZone",
    request: |id| RequestSpec::get(format!("/zones/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Zone, *id)],
};

pub const CREATE_ZONE: MutationEndpoint<ZoneCreate, Zone> = MutationEndpoint {
    name: "createZone",
    request: |body| RequestSpec::post("/zones").json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Zone)],
    validate: Some(validate_arg::<ZoneCreate>),
};

pub const UPDATE_ZONE: MutationEndpoint<ById<ZoneUpdate>, Zone> = MutationEndpoint {
    name: "updateZone",
    request: |arg| RequestSpec::put(format!("/zones/{}", arg.id)).json(&arg.body),
    invalidates: |arg, _| vec![Tag::id(TagType::Zone, arg.id)],
    validate: Some(validate_body::<ZoneUpdate>),
};

pub const DELETE_ZONE: MutationEndpoint<i64, IgnoredAny> = MutationEndpoint {
    name: "deleteZone",
    request: |id| RequestSpec::delete(format!("/zones/{id}")),
    invalidates: |id, _| item_and_list(TagType::Zone, *id),
    validate: None,
};
