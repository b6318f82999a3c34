//! Zone Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Zone entity (sales territory owned by a distributor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Distributor reference
    pub distributor_id: Option<i64>,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ZoneCreate {
    #[validate(length(min = 1, max = 100, message = "zone name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub distributor_id: Option<i64>,
}

/// Update zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ZoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "zone name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
