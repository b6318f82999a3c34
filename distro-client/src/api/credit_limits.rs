//! Credit limit request workflow

use shared::models::{
    CreditLimitApproval, CreditLimitFilter, CreditLimitRejection, CreditLimitRequest,
    CreditLimitRequestCreate,
};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

pub const GET_CREDIT_LIMIT_REQUESTS: QueryEndpoint<CreditLimitFilter, Vec<CreditLimitRequest>> =
    QueryEndpoint {
        name: "getCreditLimitRequests",
        request: |filter| RequestSpec::get("/credit-limits/requests").params(filter),
        provides: |_, requests| {
            list_tags(TagType::CreditLimitRequest, requests.iter().map(|r| r.id))
        },
    };

pub const CREATE_CREDIT_LIMIT_REQUEST: MutationEndpoint<CreditLimitRequestCreate, CreditLimitRequest> =
    MutationEndpoint {
        name: "createCreditLimitRequest",
        request: |body| RequestSpec::post("/credit-limits/requests").json(body),
        invalidates: |_, _| vec![Tag::list(TagType::CreditLimitRequest)],
        validate: Some(validate_arg::<CreditLimitRequestCreate>),
    };

/// Approval changes the distributor's wallet limit. Without a decoded
/// result the affected distributor is unknown, so every wallet is refreshed.
pub const APPROVE_CREDIT_LIMIT_REQUEST: MutationEndpoint<ById<CreditLimitApproval>, CreditLimitRequest> =
    MutationEndpoint {
        name: "approveCreditLimitRequest",
        request: |arg| {
            RequestSpec::post(format!("/credit-limits/requests/{}/approve", arg.id)).json(&arg.body)
        },
        invalidates: |arg, request| {
            let mut tags = item_and_list(TagType::CreditLimitRequest, arg.id);
            tags.push(match request {
                Some(request) => Tag::id(TagType::Wallet, request.distributor_id),
                None => Tag::of(TagType::Wallet),
            });
            tags
        },
        validate: Some(validate_body::<CreditLimitApproval>),
    };

pub const REJECT_CREDIT_LIMIT_REQUEST: MutationEndpoint<ById<CreditLimitRejection>, CreditLimitRequest> =
    MutationEndpoint {
        name: "rejectCreditLimitRequest",
        request: |arg| {
            RequestSpec::post(format!("/credit-limits/requests/{}/reject", arg.id)).json(&arg.body)
        },
        invalidates: |arg, _| item_and_list(TagType::CreditLimitRequest, arg.id),
        validate: Some(validate_body::<CreditLimitRejection>),
    };
