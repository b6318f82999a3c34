//! Staff endpoints (order bookers and delivery men)
//!
//! Both variants share the `Staff` tag family, ids are unique across it.

use shared::models::{Staff, StaffCreate, StaffFilter, StaffRole, StaffStatusUpdate, StaffUpdate};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

fn list_request(role: StaffRole, filter: &StaffFilter) -> RequestSpec {
    RequestSpec::get(format!("/staff/{}", role.collection())).params(filter)
}

fn staff_tags(staff: &[Staff]) -> Vec<Tag> {
    list_tags(TagType::Staff, staff.iter().map(Staff::id))
}

pub const GET_ORDER_BOOKERS: QueryEndpoint<StaffFilter, Vec<Staff>> = QueryEndpoint {
    name: "getOrderBookers",
    request: |filter| list_request(StaffRole::OrderBooker, filter),
    provides: |_, staff| staff_tags(staff),
};

pub const GET_DELIVERY_MEN: QueryEndpoint<StaffFilter, Vec<Staff>> = QueryEndpoint {
    name: "getDeliveryMen",
    request: |filter| list_request(StaffRole::DeliveryMan, filter),
    provides: |_, staff| staff_tags(staff),
};

pub const GET_STAFF_MEMBER: QueryEndpoint<i64, Staff> = QueryEndpoint {
    name: "getStaffMember",
    request: |id| RequestSpec::get(format!("/staff/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Staff, *id)],
};

/// Posted to the collection of the payload's role
pub const CREATE_STAFF: MutationEndpoint<StaffCreate, Staff> = MutationEndpoint {
    name: "createStaff",
    request: |body| RequestSpec::post(format!("/staff/{}", body.role.collection())).json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Staff)],
    validate: Some(validate_arg::<StaffCreate>),
};

pub const UPDATE_STAFF: MutationEndpoint<ById<StaffUpdate>, Staff> = MutationEndpoint {
    name: "updateStaff",
    request: |arg| RequestSpec::put(format!("/staff/{}", arg.id)).json(&arg.body),
    invalidates: |arg, _| {
        if arg.body.zone_id.is_some() {
            item_and_list(TagType::Staff, arg.id)
        } else {
            vec![Tag::id(TagType::Staff, arg.id)]
        }
    },
    validate: Some(validate_body::<StaffUpdate>),
};

/// Activate or deactivate; lists may be filtered on `is_active`
pub const SET_STAFF_ACTIVE: MutationEndpoint<ById<StaffStatusUpdate>, Staff> = MutationEndpoint {
    name: "setStaffActive",
    request: |arg| RequestSpec::put(format!("/staff/{}/status", arg.id)).json(&arg.body),
    invalidates: |arg, _| item_and_list(TagType::Staff, arg.id),
    validate: None,
};
