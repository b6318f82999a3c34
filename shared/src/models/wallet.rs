//! Wallet Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::positive_amount;

/// Distributor wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    /// Distributor reference (wallets are addressed by distributor)
    pub distributor_id: i64,
    pub balance: Decimal,
    pub credit_limit: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Spendable amount including the credit line
    pub fn available(&self) -> Decimal {
        self.balance + self.credit_limit
    }
}

/// Direction of a wallet movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Credit,
    Debit,
}

/// Wallet ledger entry (append-only on the server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: i64,
    pub wallet_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    /// Order or top-up reference
    pub reference: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wallet top-up payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WalletTopUp {
    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,
    #[validate(length(max = 255, message = "note is too long"))]
    pub note: Option<String>,
}

/// Transaction history filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub limit: Option<u32>,
}
