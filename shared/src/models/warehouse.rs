//! Warehouse Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Warehouse entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub distributor_id: Option<i64>,
    pub is_active: bool,
}

/// Stock line of a warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseInventoryItem {
    pub id: i64,
    pub warehouse_id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub quantity: i64,
}

/// Create warehouse payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WarehouseCreate {
    #[validate(length(min = 1, max = 100, message = "warehouse name is required"))]
    pub name: String,
    pub location: Option<String>,
    pub distributor_id: Option<i64>,
}

/// Update warehouse payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WarehouseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "warehouse name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Set the stocked quantity of one product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct InventoryQuantity {
    pub product_id: i64,
    #[validate(range(min = 0, message = "quantity cannot be negative"))]
    pub quantity: i64,
}
