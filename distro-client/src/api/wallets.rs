//! Distributor wallet endpoints
//!
//! Wallet and transaction tags are keyed by distributor id, the id every
//! wallet route is addressed by.

use shared::models::{TransactionFilter, Wallet, WalletTopUp, WalletTransaction};

use crate::endpoint::{ById, MutationEndpoint, QueryEndpoint, validate_body};
use crate::request::RequestSpec;
use crate::tags::{Tag, TagType};

/// Tags of everything a balance change touches for one distributor
pub fn balance_tags(distributor_id: i64) -> Vec<Tag> {
    vec![
        Tag::id(TagType::Wallet, distributor_id),
        Tag::id(TagType::WalletTransaction, distributor_id),
    ]
}

pub const GET_DISTRIBUTOR_WALLET: QueryEndpoint<i64, Wallet> = QueryEndpoint {
    name: "getDistributorWallet",
    request: |distributor_id| RequestSpec::get(format!("/wallets/distributor/{distributor_id}")),
    provides: |distributor_id, _| vec![Tag::id(TagType::Wallet, *distributor_id)],
};

/// Ledger of one distributor (`id` is the distributor)
pub const GET_WALLET_TRANSACTIONS: QueryEndpoint<ById<TransactionFilter>, Vec<WalletTransaction>> =
    QueryEndpoint {
        name: "getWalletTransactions",
        request: |arg| {
            RequestSpec::get(format!("/wallets/distributor/{}/transactions", arg.id))
                .params(&arg.body)
        },
        provides: |arg, _| vec![Tag::id(TagType::WalletTransaction, arg.id)],
    };

/// Credit a distributor's wallet (`id` is the distributor)
pub const TOP_UP_WALLET: MutationEndpoint<ById<WalletTopUp>, Wallet> = MutationEndpoint {
    name: "topUpWallet",
    request: |arg| {
        RequestSpec::post(format!("/wallets/distributor/{}/top-up", arg.id)).json(&arg.body)
    },
    invalidates: |arg, _| balance_tags(arg.id),
    validate: Some(validate_body::<WalletTopUp>),
};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_top_up_touches_only_that_distributor() {
        let arg = ById::new(
            3,
            WalletTopUp {
                amount: Decimal::new(50000, 2),
                note: None,
            },
        );
        let spec = (TOP_UP_WALLET.request)(&arg);
        assert_eq!(spec.path_and_query(), "/wallets/distributor/3/top-up");

        let wallet = Wallet {
            id: 10,
            distributor_id: 3,
            balance: Decimal::new(50000, 2),
            credit_limit: Decimal::ZERO,
            updated_at: None,
        };
        let tags = (TOP_UP_WALLET.invalidates)(&arg, Some(&wallet));
        assert!(tags.iter().any(|t| t.matches(&Tag::id(TagType::Wallet, 3))));
        assert!(!tags.iter().any(|t| t.matches(&Tag::id(TagType::Wallet, 4))));
    }

    #[test]
    fn test_top_up_rejects_non_positive_amount() {
        let validate = TOP_UP_WALLET.validate.unwrap();
        let arg = ById::new(
            3,
            WalletTopUp {
                amount: Decimal::ZERO,
                note: None,
            },
        );
        assert!(validate(&arg).is_err());
    }
}
