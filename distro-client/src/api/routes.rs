//! Route and weekly schedule endpoints

use serde::de::IgnoredAny;
use shared::models::{
    Route, RouteCreate, RouteFilter, RouteScheduleCreate, RouteScheduleFilter, RouteScheduleUpdate,
    RouteUpdate, WeeklyRouteSchedule,
};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_arg, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType, item_and_list, list_tags};

// ============================================================================
// Routes
// ============================================================================

/// Routes, optionally of one zone
pub const GET_ROUTES: QueryEndpoint<RouteFilter, Vec<Route>> = QueryEndpoint {
    name: "getRoutes",
    request: |filter| RequestSpec::get("/routes").params(filter),
    provides: |_, routes| list_tags(TagType::Route, routes.iter().map(|r| r.id)),
};

pub const GET_ROUTE: QueryEndpoint<i64, Route> = QueryEndpoint {
    name: "getRoute",
    request: |id| RequestSpec::get(format!("/routes/{id}")),
    provides: |id, _| vec![Tag::id(TagType::Route, *id)],
};

pub const CREATE_ROUTE: MutationEndpoint<RouteCreate, Route> = MutationEndpoint {
    name: "createRoute",
    request: |body| RequestSpec::post("/routes").json(body),
    invalidates: |_, _| vec![Tag::list(TagType::Route)],
    validate: Some(validate_arg::<RouteCreate>),
};

/// Moving a route to another zone changes zone-filtered lists
pub const UPDATE_ROUTE: MutationEndpoint<ById<RouteUpdate>, Route> = MutationEndpoint {
    name: "updateRoute",
    request: |arg| RequestSpec::put(format!("/routes/{}", arg.id)).json(&arg.body),
    invalidates: |arg, _| {
        if arg.body.zone_id.is_some() {
            item_and_list(TagType::Route, arg.id)
        } else {
            vec![Tag::id(TagType::Route, arg.id)]
        }
    },
    validate: Some(validate_body::<RouteUpdate>),
};

/// Deleting a route also drops its schedules server-side
pub const DELETE_ROUTE: MutationEndpoint<i64, IgnoredAny> = MutationEndpoint {
    name: "deleteRoute",
    request: |id| RequestSpec::delete(format!("/routes/{id}")),
    invalidates: |id, _| {
        let mut tags = item_and_list(TagType::Route, *id);
        tags.push(Tag::list(TagType::RouteSchedule));
        tags
    },
    validate: None,
};

// ============================================================================
// Weekly schedules
// ============================================================================

pub const GET_ROUTE_SCHEDULES: QueryEndpoint<RouteScheduleFilter, Vec<WeeklyRouteSchedule>> =
    QueryEndpoint {
        name: "getRouteSchedules",
        request: |filter| RequestSpec::get("/route-schedules").params(filter),
        provides: |_, schedules| {
            list_tags(TagType::RouteSchedule, schedules.iter().map(|s| s.id))
        },
    };

pub const CREATE_ROUTE_SCHEDULE: MutationEndpoint<RouteScheduleCreate, WeeklyRouteSchedule> =
    MutationEndpoint {
        name: "createRouteSchedule",
        request: |body| RequestSpec::post("/route-schedules").json(body),
        invalidates: |_, _| vec![Tag::list(TagType::RouteSchedule)],
        validate: Some(validate_arg::<RouteScheduleCreate>),
    };

/// Reassigning the order booker or the day moves the schedule between
/// filtered lists
pub const UPDATE_ROUTE_SCHEDULE: MutationEndpoint<ById<RouteScheduleUpdate>, WeeklyRouteSchedule> =
    MutationEndpoint {
        name: "updateRouteSchedule",
        request: |arg| RequestSpec::put(format!("/route-schedules/{}", arg.id)).json(&arg.body),
        invalidates: |arg, _| item_and_list(TagType::RouteSchedule, arg.id),
        validate: Some(validate_body::<RouteScheduleUpdate>),
    };

pub const DELETE_ROUTE_SCHEDULE: MutationEndpoint<i64, IgnoredAny> = MutationEndpoint {
    name: "deleteRouteSchedule",
    request: |id| RequestSpec::delete(format!("/route-schedules/{id}")),
    invalidates: |id, _| item_and_list(TagType::RouteSchedule, *id),
    validate: None,
};
