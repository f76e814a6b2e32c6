use std::collections::HashMap;

use ledger_engine_core::accounts::grouping::group_accounts_by_type;
use ledger_engine_core::accounts::net_worth::{
    calculate_net_worth, compute_net_worth, compute_utilization, NetWorthInput,
};
use ledger_engine_core::accounts::summary::{summarize_portfolio, PortfolioInput};
use ledger_engine_core::accounts::{AccountBalance, AccountSummary};
use ledger_engine_core::types::AccountType;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn accounts() -> Vec<AccountSummary> {
    serde_json::from_str(
        r#"[
            {"id": "1", "name": "Everyday", "type": "CHECKING", "balance": "5000"},
            {"id": "2", "name": "Rainy day", "type": "SAVINGS", "balance": "3000"},
            {"id": "3", "name": "Visa", "type": "CREDIT_CARD", "balance": "-2000", "credit_limit": "5000"},
            {"id": "4", "name": "House", "type": "MORTGAGE", "balance": "-100000", "owner": "joint"}
        ]"#,
    )
    .unwrap()
}

// ===========================================================================
// Net worth
// ===========================================================================

#[test]
fn test_net_worth_split() {
    let balances: Vec<AccountBalance> = accounts().iter().map(AccountBalance::from).collect();
    let r = compute_net_worth(&balances);
    assert_eq!(r.assets, dec!(8000));
    assert_eq!(r.liabilities, dec!(-102000));
    assert_eq!(r.net_worth, dec!(-94000));
}

#[test]
fn test_net_worth_counts_unlisted_types_as_assets() {
    let input: NetWorthInput = serde_json::from_str(
        r#"{"accounts": [
            {"balance": "1000", "type": "CHECKING"},
            {"balance": "500", "type": "BROKERAGE"},
            {"balance": "-200", "type": "CREDIT_CARD"}
        ]}"#,
    )
    .unwrap();
    let out = calculate_net_worth(&input).unwrap();
    assert_eq!(out.result.assets, dec!(1500));
    assert_eq!(out.result.liabilities, dec!(-200));
    assert_eq!(out.result.net_worth, dec!(1300));
}

// ===========================================================================
// Utilization
// ===========================================================================

#[test]
fn test_utilization_boundary() {
    assert_eq!(compute_utilization(dec!(500), dec!(1000)), dec!(50));
    assert_eq!(compute_utilization(dec!(1500), dec!(1000)), dec!(150));
    assert_eq!(compute_utilization(dec!(500), dec!(0)), dec!(0));
}

// ===========================================================================
// Grouping and dashboard summary
// ===========================================================================

#[test]
fn test_grouping_follows_type_order() {
    let order = [
        AccountType::Mortgage,
        AccountType::CreditCard,
        AccountType::Savings,
        AccountType::Checking,
    ];
    let groups = group_accounts_by_type(&accounts(), &order, &HashMap::new());
    let types: Vec<AccountType> = groups.iter().map(|g| g.account_type).collect();
    assert_eq!(types, order.to_vec());
    assert_eq!(groups[0].label, "Mortgages");
}

#[test]
fn test_grouping_uses_labels_read_from_json() {
    let labels: HashMap<AccountType, String> =
        serde_json::from_str(r#"{"CREDIT_CARD": "Cards", "SAVINGS": "Nest egg"}"#).unwrap();
    let order = [AccountType::Savings, AccountType::CreditCard, AccountType::Checking];
    let groups = group_accounts_by_type(&accounts(), &order, &labels);
    let names: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(names, vec!["Nest egg", "Cards", "Checking"]);
}

#[test]
fn test_portfolio_summary() {
    let input = PortfolioInput {
        accounts: accounts(),
        type_order: None,
        labels: HashMap::new(),
        owner: None,
    };
    let out = summarize_portfolio(&input).unwrap();
    assert_eq!(out.result.groups.len(), 4);
    assert_eq!(out.result.net_worth.net_worth, dec!(-94000));
    assert_eq!(out.result.card_utilization[0].utilization_pct, dec!(40));
    assert_eq!(out.result.total_credit_utilization, Some(dec!(40)));
}

#[test]
fn test_portfolio_summary_serializes_type_field() {
    let input = PortfolioInput {
        accounts: accounts(),
        type_order: Some(vec![AccountType::Checking]),
        labels: HashMap::from([(AccountType::Checking, "Bank".to_string())]),
        owner: None,
    };
    let out = summarize_portfolio(&input).unwrap();
    let json = serde_json::to_value(&out.result.groups).unwrap();
    assert_eq!(json[0]["type"], "CHECKING");
    assert_eq!(json[0]["label"], "Bank");
    assert_eq!(json[0]["total"], "5000");
}
