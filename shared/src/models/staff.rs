//! Staff Model (order bookers and delivery men)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload shared by every staff variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    /// Zone reference
    pub zone_id: Option<i64>,
    /// Distributor reference
    pub distributor_id: i64,
    pub is_active: bool,
}

/// Staff member, discriminated by the `role` field on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Staff {
    OrderBooker(StaffProfile),
    DeliveryMan(StaffProfile),
}

impl Staff {
    pub fn profile(&self) -> &StaffProfile {
        match self {
            Staff::OrderBooker(profile) | Staff::DeliveryMan(profile) => profile,
        }
    }

    pub fn id(&self) -> i64 {
        self.profile().id
    }

    pub fn role(&self) -> StaffRole {
        match self {
            Staff::OrderBooker(_) => StaffRole::OrderBooker,
            Staff::DeliveryMan(_) => StaffRole::DeliveryMan,
        }
    }
}

/// Staff discriminator without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    OrderBooker,
    DeliveryMan,
}

impl StaffRole {
    /// Collection path segment for this role
    pub fn collection(&self) -> &'static str {
        match self {
            StaffRole::OrderBooker => "order-bookers",
            StaffRole::DeliveryMan => "delivery-men",
        }
    }
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaffCreate {
    pub role: StaffRole,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 7, max = 20, message = "phone number looks invalid"))]
    pub phone: Option<String>,
    pub zone_id: Option<i64>,
    pub distributor_id: i64,
}

/// Update staff payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StaffUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "phone number looks invalid"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
}

/// Activation toggle payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaffStatusUpdate {
    pub is_active: bool,
}

/// Staff list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffFilter {
    pub zone_id: Option<i64>,
    pub distributor_id: Option<i64>,
    pub is_active: Option<bool>,
}
