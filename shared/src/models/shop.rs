//! Shop Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Shop verification lifecycle: pending -> verified | rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    Pending,
    Verified,
    Rejected,
}

/// Retail shop served by the distributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub owner_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub zone_id: Option<i64>,
    pub route_id: Option<i64>,
    /// Assigned order booker reference
    pub order_booker_id: Option<i64>,
    pub verification_status: ShopStatus,
    pub rejection_reason: Option<String>,
}

/// Create shop payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShopCreate {
    #[validate(length(min = 1, max = 150, message = "shop name is required"))]
    pub name: String,
    pub owner_name: Option<String>,
    #[validate(length(min = 7, max = 20, message = "phone number looks invalid"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub zone_id: Option<i64>,
    pub route_id: Option<i64>,
    pub order_booker_id: Option<i64>,
}

/// Update shop payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShopUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150, message = "shop name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "phone number looks invalid"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<i64>,
}

/// Reject shop payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShopRejection {
    #[validate(length(min = 1, max = 500, message = "a rejection reason is required"))]
    pub reason: String,
}

/// Reassign shop payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShopAssignment {
    pub order_booker_id: i64,
}

/// Shop list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopFilter {
    pub status: Option<ShopStatus>,
    pub zone_id: Option<i64>,
    pub order_booker_id: Option<i64>,
}
