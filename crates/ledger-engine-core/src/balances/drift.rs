use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::rounding::{round_cents, sum_cents};
use crate::types::*;
use crate::LedgerResult;

/// Signed difference between a recomputed balance and the stored one.
///
/// Positive: the stored balance under-counts. Negative: it over-counts.
pub fn compute_drift(stored_balance: Money, calculated_balance: Money) -> Money {
    round_cents(calculated_balance - stored_balance)
}

/// Input for a drift comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftInput {
    pub stored_balance: Money,
    pub calculated_balance: Money,
}

/// Input for reconciling a stored balance against its transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationInput {
    pub stored_balance: Money,
    /// Balance before the first listed transaction
    #[serde(default)]
    pub opening_balance: Money,
    /// Signed transaction amounts (inflows positive)
    pub transaction_amounts: Vec<Money>,
}

/// Output of a drift comparison or reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationOutput {
    pub stored_balance: Money,
    pub calculated_balance: Money,
    pub drift: Money,
    pub needs_correction: bool,
}

/// Compare a stored balance with an independently computed one.
pub fn calculate_drift(input: &DriftInput) -> LedgerResult<ComputationOutput<ReconciliationOutput>> {
    let start = Instant::now();
    let output = reconciliation_output(input.stored_balance, input.calculated_balance);
    let warnings = drift_warnings(&output);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Balance drift (calculated minus stored)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Recompute a balance from its transactions and report drift against the
/// stored value. Correcting the record is left to the caller.
pub fn reconcile_balance(
    input: &ReconciliationInput,
) -> LedgerResult<ComputationOutput<ReconciliationOutput>> {
    let start = Instant::now();

    let calculated = sum_cents(
        std::iter::once(input.opening_balance).chain(input.transaction_amounts.iter().copied()),
    );
    let output = reconciliation_output(input.stored_balance, calculated);
    let warnings = drift_warnings(&output);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Balance reconciliation against transaction history",
        &serde_json::json!({
            "stored_balance": input.stored_balance.to_string(),
            "opening_balance": input.opening_balance.to_string(),
            "transactions": input.transaction_amounts.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn reconciliation_output(stored: Money, calculated: Money) -> ReconciliationOutput {
    let drift = compute_drift(stored, calculated);
    ReconciliationOutput {
        stored_balance: round_cents(stored),
        calculated_balance: round_cents(calculated),
        drift,
        needs_correction: !drift.is_zero(),
    }
}

fn drift_warnings(output: &ReconciliationOutput) -> Vec<String> {
    if output.needs_correction {
        vec![format!(
            "Stored balance {} differs from calculated balance {} by {}; stored balance needs correction",
            output.stored_balance, output.calculated_balance, output.drift
        )]
    } else {
        Vec::new()
    }
}
