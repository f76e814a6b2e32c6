use std::collections::HashMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::grouping::{group_accounts_by_type, AccountTypeGroup};
use super::net_worth::{compute_net_worth, compute_utilization, NetWorthResult};
use super::{AccountBalance, AccountSummary};
use crate::rounding::sum_cents;
use crate::types::*;
use crate::LedgerResult;

/// Input for a dashboard portfolio summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub accounts: Vec<AccountSummary>,
    /// Group display order; defaults to `AccountType::DEFAULT_ORDER`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_order: Option<Vec<AccountType>>,
    #[serde(default)]
    pub labels: HashMap<AccountType, String>,
    /// Restrict the summary to accounts held by this owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Utilization of a single credit card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardUtilization {
    pub account_id: String,
    pub name: String,
    pub balance: Money,
    pub credit_limit: Money,
    pub utilization_pct: Money,
}

/// Output of a portfolio summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub groups: Vec<AccountTypeGroup>,
    pub net_worth: NetWorthResult,
    pub card_utilization: Vec<CardUtilization>,
    /// Combined utilization across every card with a positive limit
    pub total_credit_utilization: Option<Money>,
}

/// Group, total and measure a set of accounts for dashboard display.
pub fn summarize_portfolio(input: &PortfolioInput) -> LedgerResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let accounts: Vec<AccountSummary> = match &input.owner {
        Some(owner) => input
            .accounts
            .iter()
            .filter(|a| a.owner.as_deref() == Some(owner.as_str()))
            .cloned()
            .collect(),
        None => input.accounts.clone(),
    };

    let type_order: &[AccountType] = input
        .type_order
        .as_deref()
        .unwrap_or(&AccountType::DEFAULT_ORDER);

    let ungrouped = accounts
        .iter()
        .filter(|a| !type_order.contains(&a.account_type))
        .count();
    if ungrouped > 0 {
        warnings.push(format!(
            "{ungrouped} account(s) have a type outside the requested order and are not grouped"
        ));
    }

    let groups = group_accounts_by_type(&accounts, type_order, &input.labels);

    let balances: Vec<AccountBalance> = accounts.iter().map(AccountBalance::from).collect();
    let net_worth = compute_net_worth(&balances);

    let cards: Vec<(&AccountSummary, Money)> = accounts
        .iter()
        .filter(|a| a.account_type == AccountType::CreditCard)
        .filter_map(|a| match a.credit_limit {
            Some(limit) if limit > Decimal::ZERO => Some((a, limit)),
            _ => None,
        })
        .collect();

    let card_utilization: Vec<CardUtilization> = cards
        .iter()
        .map(|(a, limit)| CardUtilization {
            account_id: a.id.clone(),
            name: a.name.clone(),
            balance: a.balance,
            credit_limit: *limit,
            utilization_pct: compute_utilization(a.balance, *limit),
        })
        .collect();

    for card in card_utilization.iter().filter(|c| c.utilization_pct > dec!(100)) {
        warnings.push(format!(
            "{} is over limit ({}% utilized)",
            card.name, card.utilization_pct
        ));
    }

    let total_credit_utilization = if cards.is_empty() {
        None
    } else {
        let owed = sum_cents(cards.iter().map(|(a, _)| a.balance.abs()));
        let limit = sum_cents(cards.iter().map(|(_, l)| *l));
        Some(compute_utilization(owed, limit))
    };

    let output = PortfolioSummary {
        groups,
        net_worth,
        card_utilization,
        total_credit_utilization,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Portfolio grouping, net worth and credit utilization",
        &serde_json::json!({
            "accounts": accounts.len(),
            "owner": input.owner,
        }),
        warnings,
        elapsed,
        output,
    ))
}
