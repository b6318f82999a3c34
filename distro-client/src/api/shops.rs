//! Shop endpoints, including the verification workflow

use shared::models::{Shop, ShopAssignment, ShopCreate, ShopFilter, ShopRejection, ShopUpdate};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

/// Shops, filtered by verification status, zone or order booker
pub const GET_SHOPS: QueryEndpoint<ShopFilter, Vec<Shop>> = QueryEndpoint {
    name: "getShops",
    request: |filter| RequestSpec::get("/shops").params(filter),
    provides: |_, shops| list_tags(TagType::Shop, shops.iter().map(|s| s.id)),
};

pub const GET_SHOP: QueryEndpoint<i64, Shop> = QueryEndpoint {
    name: "getShop",
    request: |id| RequestSpec::get(format!("/shops/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Shop, *id)],
};

pub const CREATE_SHOP: MutationEndpoint<ShopCreate, Shop> = MutationEndpoint {
    name: "createShop",
    request: |body| RequestSpec::post("/shops").json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Shop)],
    validate: Some(validate_arg::<ShopCreate>),
};

pub const UPDATE_SHOP: MutationEndpoint<ById<ShopUpdate>, Shop> = MutationEndpoint {
    name: "updateShop",
    request: |arg| RequestSpec::put(format!("/shops/{}", arg.id)).json(&arg.body),
    invalidates: |arg, _| {
        if arg.body.zone_id.is_some() {
            item_and_list(TagType::Shop, arg.id)
        } else {
            vec![Tag::id(TagType::Shop, arg.id)]
        }
    },
    validate: Some(validate_body::<ShopUpdate>),
};

// Status transitions move the shop between status-filtered lists

pub const VERIFY_SHOP: MutationEndpoint<i64, Shop> = MutationEndpoint {
    name: "verifyShop",
    request: |id| RequestSpec::post(format!("/shops/{id}/verify")),
    invalidates: |id, _| item_and_list(TagType::Shop, *id),
    validate: None,
};

pub const REJECT_SHOP: MutationEndpoint<ById<ShopRejection>, Shop> = MutationEndpoint {
    name: "rejectShop",
    request: |arg| RequestSpec::post(format!("/shops/{}/reject", arg.id)).json(&arg.body),
    invalidates: |arg, _| item_and_list(TagType::Shop, arg.id),
    validate: Some(validate_body::<ShopRejection>),
};

/// Hand the shop to another order booker
pub const REASSIGN_SHOP: MutationEndpoint<ById<ShopAssignment>, Shop> = MutationEndpoint {
    name: "reassignShop",
    request: |arg| RequestSpec::post(format!("/shops/{}/assign", arg.id)).json(&arg.body),
    invalidates: |arg, _| item_and_list(TagType::Shop, arg.id),
    validate: None,
};
