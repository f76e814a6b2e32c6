use std::collections::HashMap;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ledger_engine_core::balances::deltas::month_range;
use ledger_engine_core::balances::drift::{self, DriftInput, ReconciliationInput};
use ledger_engine_core::balances::history::{self, BalanceHistoryInput};
use ledger_engine_core::types::MonthKey;

use crate::input;

/// Arguments for balance history reconstruction
#[derive(Args)]
pub struct BalanceHistoryArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Balance at the end of the last month
    #[arg(long, allow_hyphen_values = true)]
    pub current_balance: Option<Decimal>,

    /// First month to report (YYYY-MM)
    #[arg(long)]
    pub start: Option<MonthKey>,

    /// Last month to report (YYYY-MM)
    #[arg(long)]
    pub end: Option<MonthKey>,

    /// Monthly net deltas (comma-separated, e.g. "2026-01=200,2026-02=-35.50")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub deltas: Option<Vec<String>>,
}

pub fn run_balance_history(args: BalanceHistoryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history_input: BalanceHistoryInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let current = args
                .current_balance
                .ok_or("--current-balance is required (or provide --input)")?;
            let start = args.start.ok_or("--start is required (or provide --input)")?;
            let end = args.end.ok_or("--end is required (or provide --input)")?;

            BalanceHistoryInput {
                current_balance: current,
                monthly_deltas: parse_deltas(&args.deltas.unwrap_or_default())?,
                month_keys: month_range(start, end),
            }
        }
    };

    let result = history::build_balance_history(&history_input)?;
    Ok(serde_json::to_value(result)?)
}

fn parse_deltas(raw: &[String]) -> Result<HashMap<MonthKey, Decimal>, Box<dyn std::error::Error>> {
    let mut deltas = HashMap::new();
    for entry in raw {
        let (month, amount) = entry
            .split_once('=')
            .ok_or_else(|| format!("Invalid delta '{}': expected YYYY-MM=amount", entry))?;
        let key: MonthKey = month.parse()?;
        let amount: Decimal = amount
            .trim()
            .parse()
            .map_err(|e| format!("Invalid delta amount in '{}': {}", entry, e))?;
        *deltas.entry(key).or_insert(Decimal::ZERO) += amount;
    }
    Ok(deltas)
}

/// Arguments for a drift check
#[derive(Args)]
pub struct DriftArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Balance currently stored on the account
    #[arg(long, allow_hyphen_values = true)]
    pub stored: Option<Decimal>,

    /// Balance recomputed from transaction history
    #[arg(long, allow_hyphen_values = true)]
    pub calculated: Option<Decimal>,
}

pub fn run_drift(args: DriftArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let drift_input: DriftInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => DriftInput {
            stored_balance: args.stored.ok_or("--stored is required (or provide --input)")?,
            calculated_balance: args
                .calculated
                .ok_or("--calculated is required (or provide --input)")?,
        },
    };

    let result = drift::calculate_drift(&drift_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for reconciling a stored balance against its transactions
#[derive(Args)]
pub struct ReconcileArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Balance currently stored on the account
    #[arg(long, allow_hyphen_values = true)]
    pub stored: Option<Decimal>,

    /// Balance before the first transaction
    #[arg(long, allow_hyphen_values = true)]
    pub opening: Option<Decimal>,

    /// Signed transaction amounts (comma-separated, e.g. "1000,-250.10")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub transactions: Option<Vec<Decimal>>,
}

pub fn run_reconcile(args: ReconcileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reconcile_input: ReconciliationInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ReconciliationInput {
            stored_balance: args.stored.ok_or("--stored is required (or provide --input)")?,
            opening_balance: args.opening.unwrap_or(Decimal::ZERO),
            transaction_amounts: args.transactions.unwrap_or_default(),
        },
    };

    let result = drift::reconcile_balance(&reconcile_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_deltas_sums_repeats() {
        let raw = vec![
            "2026-01=200".to_string(),
            "2026-01=-50.25".to_string(),
            "2026-02=10".to_string(),
        ];
        let deltas = parse_deltas(&raw).unwrap();
        assert_eq!(deltas[&"2026-01".parse::<MonthKey>().unwrap()], dec!(149.75));
        assert_eq!(deltas.len(), 2);
    }

    #[test]
    fn test_parse_deltas_rejects_garbage() {
        assert!(parse_deltas(&["2026-01:200".to_string()]).is_err());
        assert!(parse_deltas(&["2026-13=1".to_string()]).is_err());
        assert!(parse_deltas(&["2026-01=abc".to_string()]).is_err());
    }
}
