//! Subsidy order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Subsidy approval state, transitions happen server-side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyStatus {
    PendingApproval,
    Approved,
    Rejected,
}

/// Order carrying a subsidy request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyOrder {
    pub id: i64,
    pub order_number: String,
    pub shop_id: i64,
    pub distributor_id: i64,
    pub total_amount: Decimal,
    pub subsidy_amount: Decimal,
    pub net_amount: Decimal,
    pub subsidy_status: SubsidyStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reject subsidy payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubsidyRejection {
    #[validate(length(min = 1, max = 500, message = "a rejection reason is required"))]
    pub reason: String,
}

/// Subsidy order list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubsidyOrderFilter {
    pub subsidy_status: Option<SubsidyStatus>,
    pub distributor_id: Option<i64>,
}
