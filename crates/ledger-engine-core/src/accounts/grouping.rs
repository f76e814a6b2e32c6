use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::AccountSummary;
use crate::rounding::sum_cents;
use crate::types::{AccountType, Money};

/// Accounts of one type with their summed balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTypeGroup {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub label: String,
    pub accounts: Vec<AccountSummary>,
    pub total: Money,
}

/// Bucket accounts by type, emitted in `type_order`.
///
/// Types with no accounts are skipped, as are accounts whose type does not
/// appear in `type_order`. Member order within a group follows the input.
/// Totals are rounded once, after summing.
pub fn group_accounts_by_type(
    accounts: &[AccountSummary],
    type_order: &[AccountType],
    labels: &HashMap<AccountType, String>,
) -> Vec<AccountTypeGroup> {
    type_order
        .iter()
        .filter_map(|account_type| {
            let members: Vec<AccountSummary> = accounts
                .iter()
                .filter(|a| a.account_type == *account_type)
                .cloned()
                .collect();
            if members.is_empty() {
                return None;
            }
            let label = labels
                .get(account_type)
                .cloned()
                .unwrap_or_else(|| account_type.default_label().to_string());
            Some(AccountTypeGroup {
                account_type: *account_type,
                label,
                total: sum_cents(members.iter().map(|a| a.balance)),
                accounts: members,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(id: &str, account_type: AccountType, balance: Money) -> AccountSummary {
        AccountSummary {
            id: id.into(),
            name: format!("Account {id}"),
            account_type,
            balance,
            credit_limit: None,
            owner: None,
        }
    }

    #[test]
    fn test_follows_caller_order_not_encounter_order() {
        let accounts = vec![
            account("a", AccountType::Savings, dec!(10)),
            account("b", AccountType::Checking, dec!(20)),
            account("c", AccountType::Savings, dec!(5.55)),
        ];
        let order = [AccountType::Checking, AccountType::Savings];
        let groups = group_accounts_by_type(&accounts, &order, &HashMap::new());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].account_type, AccountType::Checking);
        assert_eq!(groups[1].total, dec!(15.55));
        assert_eq!(groups[1].accounts[0].id, "a");
        assert_eq!(groups[1].accounts[1].id, "c");
    }

    #[test]
    fn test_skips_empty_types_and_uses_labels() {
        let accounts = vec![account("m", AccountType::Mortgage, dec!(-150000))];
        let labels = HashMap::from([(AccountType::Mortgage, "Home loans".to_string())]);
        let groups = group_accounts_by_type(&accounts, &AccountType::DEFAULT_ORDER, &labels);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Home loans");
        assert_eq!(groups[0].total, dec!(-150000));
    }

    #[test]
    fn test_unlisted_types_are_not_emitted() {
        let accounts = vec![account("x", AccountType::Other, dec!(1))];
        let groups = group_accounts_by_type(&accounts, &[AccountType::Checking], &HashMap::new());
        assert!(groups.is_empty());
    }
}
