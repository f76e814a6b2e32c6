//! Account aggregation: grouping by type, net worth and credit utilization.

pub mod grouping;
pub mod net_worth;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::types::{AccountType, Money};

/// Read-only projection of an account supplied by the data layer.
///
/// `balance` is signed: debt accounts carry negative balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// The two fields net worth needs from an account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub balance: Money,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl From<&AccountSummary> for AccountBalance {
    fn from(account: &AccountSummary) -> Self {
        AccountBalance {
            balance: account.balance,
            account_type: account.account_type,
        }
    }
}
