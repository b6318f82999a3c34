//! Warehouse and stock endpoints
//!
//! Inventory tags are keyed by warehouse id.

use serde::de::IgnoredAny;
use shared::models::{
    InventoryQuantity, Warehouse, WarehouseCreate, WarehouseInventoryItem, WarehouseUpdate,
};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

pub const GET_WAREHOUSES: QueryEndpoint<(), Vec<Warehouse>> = QueryEndpoint {
    name: "getWarehouses",
    request: |_| RequestSpec::get("/warehouses"),
    provides: |_, warehouses| list_tags(TagType::Warehouse, warehouses.iter().map(|w| w.id)),
};

pub const GET_WAREHOUSE: QueryEndpoint<i64, Warehouse> = QueryEndpoint {
    name: "getWarehouse",
    request: |id| RequestSpec::get(format!("/warehouses/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Warehouse, *id)],
};

pub const GET_WAREHOUSE_INVENTORY: QueryEndpoint<i64, Vec<WarehouseInventoryItem>> =
    QueryEndpoint {
        name: "getWarehouseInventory",
        request: |id| RequestSpec::get(format!("/warehouses/{id}/inventory")),
        provides: |id, _| vec![Tag::id(TagType::WarehouseInventory, *id)],
    };

pub const CREATE_WAREHOUSE: MutationEndpoint<WarehouseCreate, Warehouse> = MutationEndpoint {
    name: "createWarehouse",
    request: |body| RequestSpec::post("/warehouses").json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Warehouse)],
    validate: Some(validate_arg::<WarehouseCreate>),
};

pub const UPDATE_WAREHOUSE: MutationEndpoint<ById<WarehouseUpdate>, Warehouse> =
    MutationEndpoint {
        name: "updateWarehouse",
        request: |arg| RequestSpec::put(format!("/warehouses/{}", arg.id)).json(&arg.body),
        invalidates: |arg, _| vec![Tag::id(TagType::Warehouse, arg.id)],
        validate: Some(validate_body::<WarehouseUpdate>),
    };

pub const DELETE_WAREHOUSE: MutationEndpoint<i64, IgnoredAny> = MutationEndpoint {
    name: "deleteWarehouse",
    request: |id| RequestSpec::delete(format!("/warehouses/{id}")),
    invalidates: |id, _| {
        let mut tags = item_and_list(TagType::Warehouse, *id);
        tags.push(Tag::id(TagType::WarehouseInventory, *id));
        tags
    },
    validate: None,
};

/// Set the stock of one product (`id` is the warehouse)
pub const SET_INVENTORY_QUANTITY: MutationEndpoint<ById<InventoryQuantity>, WarehouseInventoryItem> =
    MutationEndpoint {
        name: "setInventoryQuantity",
        request: |arg| {
            RequestSpec::put(format!("/warehouses/{}/inventory", arg.id)).json(&arg.body)
        },
        invalidates: |arg, _| vec![Tag::id(TagType::WarehouseInventory, arg.id)],
        validate: Some(validate_body::<InventoryQuantity>),
    };
