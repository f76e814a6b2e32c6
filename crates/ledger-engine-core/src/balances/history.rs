use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;
use crate::rounding::round_cents;
use crate::types::*;
use crate::LedgerResult;

/// End-of-month balance for one month of a reconstructed history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month_key: MonthKey,
    pub balance: Money,
}

/// Input for a balance history reconstruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceHistoryInput {
    /// Balance at the end of the last month in `month_keys`
    pub current_balance: Money,
    /// Net signed movement recorded during each month
    #[serde(default)]
    pub monthly_deltas: HashMap<MonthKey, Money>,
    /// Months to report, oldest first
    pub month_keys: Vec<MonthKey>,
}

/// Output of a balance history reconstruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceHistoryOutput {
    pub points: Vec<BalancePoint>,
    pub starting_balance: Money,
    pub ending_balance: Money,
    pub net_change: Money,
}

/// Walk `current_balance` backward through `monthly_deltas`.
///
/// The last key ends at `current_balance`. Each earlier month ends at the
/// following month's balance minus the delta recorded during that following
/// month. Months without a delta are flat. The delta of the first month is
/// never applied: it moved the balance *into* the first reported month.
pub fn compute_balance_history(
    current_balance: Money,
    monthly_deltas: &HashMap<MonthKey, Money>,
    ordered_month_keys: &[MonthKey],
) -> Vec<BalancePoint> {
    let n = ordered_month_keys.len();
    if n == 0 {
        return Vec::new();
    }

    let mut balances = vec![Decimal::ZERO; n];
    balances[n - 1] = round_cents(current_balance);

    for i in (0..n - 1).rev() {
        let delta = monthly_deltas
            .get(&ordered_month_keys[i + 1])
            .copied()
            .unwrap_or(Decimal::ZERO);
        balances[i] = round_cents(balances[i + 1] - delta);
    }

    ordered_month_keys
        .iter()
        .zip(balances)
        .map(|(key, balance)| BalancePoint {
            month_key: *key,
            balance,
        })
        .collect()
}

/// Reconstruct a balance history with validation and an output envelope.
pub fn build_balance_history(
    input: &BalanceHistoryInput,
) -> LedgerResult<ComputationOutput<BalanceHistoryOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.month_keys.is_empty() {
        return Err(LedgerError::InsufficientData(
            "Balance history requires at least one month".into(),
        ));
    }
    for pair in input.month_keys.windows(2) {
        if pair[0] >= pair[1] {
            return Err(LedgerError::InvalidInput {
                field: "month_keys".into(),
                reason: format!(
                    "Months must be strictly increasing ({} is followed by {})",
                    pair[0], pair[1]
                ),
            });
        }
    }

    let requested: BTreeSet<&MonthKey> = input.month_keys.iter().collect();
    let ignored: BTreeSet<&MonthKey> = input
        .monthly_deltas
        .keys()
        .filter(|k| !requested.contains(k))
        .collect();
    if !ignored.is_empty() {
        let listed: Vec<String> = ignored.iter().map(|k| k.to_string()).collect();
        warnings.push(format!(
            "Deltas outside the requested months were ignored: {}",
            listed.join(", ")
        ));
    }

    let points = compute_balance_history(
        input.current_balance,
        &input.monthly_deltas,
        &input.month_keys,
    );
    debug!(months = points.len(), "Reconstructed balance history");

    // Non-empty: month_keys was checked above
    let starting_balance = points.first().map(|p| p.balance).unwrap_or_default();
    let ending_balance = points.last().map(|p| p.balance).unwrap_or_default();

    let output = BalanceHistoryOutput {
        net_change: round_cents(ending_balance - starting_balance),
        starting_balance,
        ending_balance,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Backward balance reconstruction from monthly net deltas",
        &serde_json::json!({
            "current_balance": input.current_balance.to_string(),
            "months": input.month_keys.len(),
            "delta_months": input.monthly_deltas.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
