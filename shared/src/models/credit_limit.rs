//! Credit limit request Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::positive_amount;

/// Approval workflow state (enforced by the server)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditLimitStatus {
    Pending,
    Approved,
    Rejected,
}

/// Request to raise a distributor's credit limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLimitRequest {
    pub id: i64,
    pub distributor_id: i64,
    pub status: CreditLimitStatus,
    pub old_limit: Decimal,
    pub requested_limit: Decimal,
    /// Limit granted on approval (may differ from the requested one)
    pub final_limit: Option<Decimal>,
    pub reason: Option<String>,
    pub reviewer_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreditLimitRequestCreate {
    pub distributor_id: i64,
    #[validate(custom(function = "positive_amount"))]
    pub requested_limit: Decimal,
    #[validate(length(max = 500, message = "reason is too long"))]
    pub reason: Option<String>,
}

/// Approve payload, `final_limit` defaults to the requested limit server-side
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreditLimitApproval {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "positive_amount"))]
    pub final_limit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Reject payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreditLimitRejection {
    #[validate(length(min = 1, max = 500, message = "a rejection note is required"))]
    pub note: String,
}

/// Request list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditLimitFilter {
    pub status: Option<CreditLimitStatus>,
    pub distributor_id: Option<i64>,
}
