//! Route and weekly schedule models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery/order-booking route inside a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub name: String,
    /// Zone reference
    pub zone_id: i64,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create route payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RouteCreate {
    #[validate(length(min = 1, max = 100, message = "route name is required"))]
    pub name: String,
    pub zone_id: i64,
    pub description: Option<String>,
}

/// Update route payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RouteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "route name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Day of the week a route is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Weekly route schedule (which order booker covers a route on which day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRouteSchedule {
    pub id: i64,
    /// Route reference
    pub route_id: i64,
    /// Assignee (order booker) reference
    pub order_booker_id: i64,
    pub day_of_week: DayOfWeek,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create schedule payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RouteScheduleCreate {
    pub route_id: i64,
    pub order_booker_id: i64,
    pub day_of_week: DayOfWeek,
}

/// Update schedule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RouteScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_booker_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Route list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteFilter {
    pub zone_id: Option<i64>,
}

/// Schedule list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteScheduleFilter {
    pub route_id: Option<i64>,
    pub order_booker_id: Option<i64>,
}
