//! Product endpoints
//!
//! Products are never deleted, only deactivated.

use shared::models::{Product, ProductCreate, ProductStatusUpdate, ProductUpdate};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

/// All products, or only active ones. `None` leaves the choice to the
/// server and shares its cache entry with an argument-less call.
pub const GET_PRODUCTS: QueryEndpoint<Option<bool>, Vec<Product>> = QueryEndpoint {
    name: "getProducts",
    request: |active_only| RequestSpec::get("/products").param_opt("active_only", *active_only),
    provides: |_, products| list_tags(TagType::Product, products.iter().map(|p| p.id)),
};

pub const GET_PRODUCT: QueryEndpoint<i64, Product> = QueryEndpoint {
    name: "getProduct",
    request: |id| RequestSpec::get(format!("/products/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Product, *id)],
};

pub const CREATE_PRODUCT: MutationEndpoint<ProductCreate, Product> = MutationEndpoint {
    name: "createProduct",
    request: |body| RequestSpec::post("/products").json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Product)],
    validate: Some(validate_arg::<ProductCreate>),
};

pub const UPDATE_PRODUCT: MutationEndpoint<ById<ProductUpdate>, Product> = MutationEndpoint {
    name: "updateProduct",
    request: |arg| RequestSpec::put(format!("/products/{}", arg.id)).json(&arg.body),
    invalidates: |arg, _| vec![Tag::id(TagType::Product, arg.id)],
    validate: Some(validate_body::<ProductUpdate>),
};

/// Soft delete (or restore); changes `active_only` lists
pub const SET_PRODUCT_ACTIVE: MutationEndpoint<ById<ProductStatusUpdate>, Product> =
    MutationEndpoint {
        name: "setProductActive",
        request: |arg| RequestSpec::put(format!("/products/{}/status", arg.id)).json(&arg.body),
        invalidates: |arg, _| item_and_list(TagType::Product, arg.id),
        validate: None,
    };
