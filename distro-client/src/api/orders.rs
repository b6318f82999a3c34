//! Order subsidy review endpoints

use shared::models::{SubsidyOrder, SubsidyOrderFilter, SubsidyRejection};

use super::wallets::balance_tags;
use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

/// Orders carrying a subsidy, filtered by review status
pub const GET_SUBSIDY_ORDERS: QueryEndpoint<SubsidyOrderFilter, Vec<SubsidyOrder>> =
    QueryEndpoint {
        name: "getSubsidyOrders",
        request: |filter| RequestSpec::get("/orders/subsidy").params(filter),
        provides: |_, orders| list_tags(TagType::SubsidyOrder, orders.iter().map(|o| o.id)),
    };

pub const GET_ORDER: QueryEndpoint<i64, SubsidyOrder> = QueryEndpoint {
    name: "getOrder",
    request: |id| RequestSpec::get(format!("/orders/{id}")),
    provides: |id, _| vec![Tag::id(TagType::SubsidyOrder, *id)],
};

/// Approval credits the subsidy to the distributor's wallet (every wallet
/// when the result did not decode)
pub const APPROVE_SUBSIDY: MutationEndpoint<i64, SubsidyOrder> = MutationEndpoint {
    name: "approveSubsidy",
    request: |id| RequestSpec::post(format!("/orders/{id}/approve-subsidy")),
    invalidates: |id, order| {
        let mut tags = item_and_list(TagType::SubsidyOrder, *id);
        match order {
            Some(order) => tags.extend(balance_tags(order.distributor_id)),
            None => tags.extend([Tag::of(TagType::Wallet), Tag::of(TagType::WalletTransaction)]),
        }
        tags
    },
    validate: None,
};

pub const REJECT_SUBSIDY: MutationEndpoint<ById<SubsidyRejection>, SubsidyOrder> =
    MutationEndpoint {
        name: "rejectSubsidy",
        request: |arg| {
            RequestSpec::post(format!("/orders/{}/reject-subsidy", arg.id)).json(&arg.body)
        },
        invalidates: |arg, _| item_and_list(TagType::SubsidyOrder, arg.id),
        validate: Some(validate_body::<SubsidyRejection>),
    };
