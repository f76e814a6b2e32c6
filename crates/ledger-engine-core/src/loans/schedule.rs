use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::split::{calculate_payment_split, monthly_interest};
use super::{default_max_months, DEFAULT_MAX_MONTHS};
use crate::error::LedgerError;
use crate::rounding::{round_cents, sum_cents};
use crate::types::*;
use crate::LedgerResult;

/// A single month in an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining_balance: Money,
}

/// Input for an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    /// Outstanding balance; sign is ignored
    pub balance: Money,
    pub annual_rate_percent: PercentRate,
    pub monthly_payment: Money,
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

/// Output of an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub rows: Vec<AmortizationRow>,
    pub payoff_months: u32,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
    pub final_balance: Money,
    /// False when the horizon ends with a balance still owed
    pub paid_off: bool,
}

/// Generate a month-by-month payoff schedule.
///
/// Stops when the balance reaches zero or after `max_months` rows. The
/// final payment is capped at the balance plus that month's interest, so
/// principal is never overpaid. A zero balance has no schedule.
pub fn generate_amortization_schedule(
    balance: Money,
    annual_rate_percent: PercentRate,
    monthly_payment: Money,
    max_months: u32,
) -> Vec<AmortizationRow> {
    if balance.is_zero() {
        return Vec::new();
    }
    let mut remaining = balance.abs();

    let capacity = max_months.min(DEFAULT_MAX_MONTHS) as usize;
    let mut rows = Vec::with_capacity(capacity);

    for month in 1..=max_months {
        if remaining <= Decimal::ZERO {
            break;
        }

        let interest_due = monthly_interest(remaining, annual_rate_percent);
        let payment = monthly_payment.min(remaining + interest_due);
        let split = calculate_payment_split(remaining, annual_rate_percent, payment);

        remaining = round_cents(remaining - split.principal);

        rows.push(AmortizationRow {
            month,
            payment: round_cents(payment),
            principal: split.principal,
            interest: split.interest,
            remaining_balance: remaining,
        });
    }

    debug!(
        months = rows.len(),
        remaining = %remaining,
        "Generated amortization schedule"
    );
    rows
}

/// Rounded sum of the interest column.
pub fn total_interest(rows: &[AmortizationRow]) -> Money {
    sum_cents(rows.iter().map(|r| r.interest))
}

/// Build an amortization schedule with totals, validation and warnings.
pub fn build_amortization_schedule(
    input: &AmortizationInput,
) -> LedgerResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_terms(input.annual_rate_percent, input.monthly_payment, input.max_months)?;

    let first_interest = monthly_interest(input.balance, input.annual_rate_percent);
    if !input.balance.is_zero() && input.monthly_payment <= first_interest {
        warnings.push(format!(
            "Monthly payment {} does not exceed the first month's interest {}; the balance will not decrease",
            input.monthly_payment, first_interest
        ));
    }

    let rows = generate_amortization_schedule(
        input.balance,
        input.annual_rate_percent,
        input.monthly_payment,
        input.max_months,
    );
    let output = summarize_schedule(rows);

    if !output.paid_off {
        warn!(
            max_months = input.max_months,
            final_balance = %output.final_balance,
            "Loan does not pay off within the simulated horizon"
        );
        warnings.push(format!(
            "Loan does not pay off within {} months; {} remains outstanding",
            input.max_months, output.final_balance
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization with cent rounding and capped final payment",
        &serde_json::json!({
            "balance": input.balance.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "monthly_payment": input.monthly_payment.to_string(),
            "max_months": input.max_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn summarize_schedule(rows: Vec<AmortizationRow>) -> AmortizationOutput {
    let final_balance = rows
        .last()
        .map(|r| r.remaining_balance)
        .unwrap_or(Decimal::ZERO);
    AmortizationOutput {
        payoff_months: rows.len() as u32,
        total_interest: total_interest(&rows),
        total_principal: sum_cents(rows.iter().map(|r| r.principal)),
        total_paid: sum_cents(rows.iter().map(|r| r.payment)),
        final_balance,
        paid_off: final_balance.is_zero(),
        rows,
    }
}

/// Reject loan terms a person could not have meant.
pub(crate) fn validate_loan_terms(
    annual_rate_percent: PercentRate,
    monthly_payment: Money,
    max_months: u32,
) -> LedgerResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LedgerError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if monthly_payment <= Decimal::ZERO {
        return Err(LedgerError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment must be positive".into(),
        });
    }
    if max_months == 0 {
        return Err(LedgerError::InvalidInput {
            field: "max_months".into(),
            reason: "Simulation horizon must be at least 1 month".into(),
        });
    }
    Ok(())
}
