use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::rounding::round_cents;
use crate::types::{with_metadata, ComputationOutput, Money, PercentRate};
use crate::LedgerResult;

/// Monthly periodic rate as a decimal fraction (6% APR -> 0.005)
pub fn monthly_rate(annual_rate_percent: PercentRate) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Level monthly payment that retires `principal` in exactly `months`.
pub fn amortizing_payment(
    principal: Money,
    annual_rate_percent: PercentRate,
    months: u32,
) -> LedgerResult<Money> {
    if months == 0 {
        return Err(LedgerError::InvalidInput {
            field: "months".into(),
            reason: "Number of months must be > 0".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LedgerError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }

    let principal = principal.abs();
    let n = Decimal::from(months);

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(round_cents(principal / n));
    }

    let overflow = || LedgerError::InvalidInput {
        field: "months".into(),
        reason: format!(
            "Compounding {annual_rate_percent}% over {months} months exceeds decimal range"
        ),
    };

    let factor = (Decimal::ONE + rate)
        .checked_powu(months as u64)
        .ok_or_else(overflow)?;
    let annuity_factor = factor - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Ok(round_cents(principal / n));
    }

    let payment = principal
        .checked_mul(rate)
        .and_then(|p| p.checked_mul(factor))
        .and_then(|p| p.checked_div(annuity_factor))
        .ok_or_else(overflow)?;
    Ok(round_cents(payment))
}

/// Interest paid over `months` level payments: total paid less principal.
pub fn closed_form_total_interest(principal: Money, payment: Money, months: u32) -> Money {
    round_cents(payment * Decimal::from(months) - principal.abs())
}

/// Input for a level-payment calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPaymentInput {
    pub principal: Money,
    pub annual_rate_percent: PercentRate,
    pub months: u32,
}

/// Output of a level-payment calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPaymentOutput {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

pub fn calculate_loan_payment(
    input: &LoanPaymentInput,
) -> LedgerResult<ComputationOutput<LoanPaymentOutput>> {
    let start = Instant::now();

    let monthly_payment =
        amortizing_payment(input.principal, input.annual_rate_percent, input.months)?;
    let total_paid = round_cents(monthly_payment * Decimal::from(input.months));
    let output = LoanPaymentOutput {
        monthly_payment,
        total_paid,
        total_interest: closed_form_total_interest(input.principal, monthly_payment, input.months),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-form level payment (annuity formula, monthly compounding)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}
