use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::AccountBalance;
use crate::rounding::{round_cents, sum_cents};
use crate::types::*;
use crate::LedgerResult;

/// Assets, liabilities and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorthResult {
    pub assets: Money,
    /// Sum of debt balances; zero or negative under the signed convention
    pub liabilities: Money,
    pub net_worth: Money,
}

/// Partition balances into assets and liabilities.
pub fn compute_net_worth(accounts: &[AccountBalance]) -> NetWorthResult {
    let assets = sum_cents(
        accounts
            .iter()
            .filter(|a| !a.account_type.is_liability())
            .map(|a| a.balance),
    );
    let liabilities = sum_cents(
        accounts
            .iter()
            .filter(|a| a.account_type.is_liability())
            .map(|a| a.balance),
    );
    NetWorthResult {
        assets,
        liabilities,
        net_worth: round_cents(assets + liabilities),
    }
}

/// Percentage of `credit_limit` in use. Not clamped: over-limit accounts
/// report more than 100.
pub fn compute_utilization(balance: Money, credit_limit: Money) -> Money {
    if credit_limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_cents(balance.abs() / credit_limit * dec!(100))
}

/// Input for a net worth calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorthInput {
    pub accounts: Vec<AccountBalance>,
}

pub fn calculate_net_worth(input: &NetWorthInput) -> LedgerResult<ComputationOutput<NetWorthResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let positive_debts = input
        .accounts
        .iter()
        .filter(|a| a.account_type.is_liability() && a.balance > Decimal::ZERO)
        .count();
    if positive_debts > 0 {
        warnings.push(format!(
            "{positive_debts} debt account(s) carry a positive balance and increase net worth"
        ));
    }

    let output = compute_net_worth(&input.accounts);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Net worth (assets plus signed liabilities)",
        &serde_json::json!({ "accounts": input.accounts.len() }),
        warnings,
        elapsed,
        output,
    ))
}

/// Input for a single-account utilization calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationInput {
    pub balance: Money,
    pub credit_limit: Money,
}

/// Output of a utilization calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationOutput {
    pub utilization_pct: Money,
    pub over_limit: bool,
}

pub fn calculate_utilization(
    input: &UtilizationInput,
) -> LedgerResult<ComputationOutput<UtilizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.credit_limit <= Decimal::ZERO {
        warnings.push("Credit limit is not positive; utilization reported as 0".into());
    }
    let utilization_pct = compute_utilization(input.balance, input.credit_limit);
    let over_limit = utilization_pct > dec!(100);
    if over_limit {
        warnings.push(format!("Account is over limit ({utilization_pct}% utilized)"));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Credit utilization (|balance| / limit x 100)",
        input,
        warnings,
        elapsed,
        UtilizationOutput {
            utilization_pct,
            over_limit,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bal(balance: Money, account_type: AccountType) -> AccountBalance {
        AccountBalance { balance, account_type }
    }

    #[test]
    fn test_net_worth_split() {
        let accounts = [
            bal(dec!(5000), AccountType::Checking),
            bal(dec!(3000), AccountType::Savings),
            bal(dec!(-2000), AccountType::CreditCard),
            bal(dec!(-100000), AccountType::Mortgage),
        ];
        let r = compute_net_worth(&accounts);
        assert_eq!(r.assets, dec!(8000));
        assert_eq!(r.liabilities, dec!(-102000));
        assert_eq!(r.net_worth, dec!(-94000));
    }

    #[test]
    fn test_net_worth_of_nothing_is_zero() {
        let r = compute_net_worth(&[]);
        assert_eq!(r.net_worth, Decimal::ZERO);
    }

    #[test]
    fn test_loans_are_liabilities() {
        let r = compute_net_worth(&[bal(dec!(-7500), AccountType::Loan), bal(dec!(100), AccountType::Other)]);
        assert_eq!(r.assets, dec!(100));
        assert_eq!(r.liabilities, dec!(-7500));
    }

    #[test]
    fn test_utilization_boundaries() {
        assert_eq!(compute_utilization(dec!(500), dec!(1000)), dec!(50));
        assert_eq!(compute_utilization(dec!(1500), dec!(1000)), dec!(150));
        assert_eq!(compute_utilization(dec!(500), dec!(0)), dec!(0));
        assert_eq!(compute_utilization(dec!(500), dec!(-10)), dec!(0));
    }

    #[test]
    fn test_utilization_uses_magnitude() {
        assert_eq!(compute_utilization(dec!(-333), dec!(1000)), dec!(33.3));
        assert_eq!(compute_utilization(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_over_limit_warning() {
        let out = calculate_utilization(&UtilizationInput {
            balance: dec!(-1200),
            credit_limit: dec!(1000),
        })
        .unwrap();
        assert!(out.result.over_limit);
        assert_eq!(out.result.utilization_pct, dec!(120));
        assert_eq!(out.warnings.len(), 1);
    }
}
