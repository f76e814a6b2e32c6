use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::{
    generate_amortization_schedule, total_interest, validate_loan_terms, AmortizationRow,
};
use super::{default_max_months, DEFAULT_MAX_MONTHS};
use crate::error::LedgerError;
use crate::rounding::round_cents;
use crate::types::*;
use crate::LedgerResult;

/// Effect of adding a fixed amount to every monthly payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    pub new_payoff_months: u32,
    pub interest_saved: Money,
    pub new_total_interest: Money,
}

/// Input for an extra-payment simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentInput {
    pub balance: Money,
    pub annual_rate_percent: PercentRate,
    pub monthly_payment: Money,
    pub extra_amount: Money,
    #[serde(default = "default_max_months")]
    pub max_months: u32,
}

/// Output of an extra-payment simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentOutput {
    #[serde(flatten)]
    pub impact: ExtraPaymentImpact,
    pub baseline_payoff_months: u32,
    pub baseline_total_interest: Money,
    pub months_saved: u32,
    pub baseline_paid_off: bool,
    /// False when the increased payment still leaves a balance at the horizon
    pub paid_off: bool,
}

/// Compare the regular schedule with one paying `extra_amount` more each
/// month, both over a 600-month horizon.
pub fn calculate_extra_payment_impact(
    balance: Money,
    annual_rate_percent: PercentRate,
    monthly_payment: Money,
    extra_amount: Money,
) -> ExtraPaymentImpact {
    simulate(
        balance,
        annual_rate_percent,
        monthly_payment,
        extra_amount,
        DEFAULT_MAX_MONTHS,
    )
    .impact
}

fn simulate(
    balance: Money,
    annual_rate_percent: PercentRate,
    monthly_payment: Money,
    extra_amount: Money,
    max_months: u32,
) -> ExtraPaymentOutput {
    let baseline =
        generate_amortization_schedule(balance, annual_rate_percent, monthly_payment, max_months);
    let augmented = generate_amortization_schedule(
        balance,
        annual_rate_percent,
        monthly_payment + extra_amount,
        max_months,
    );

    let baseline_total_interest = total_interest(&baseline);
    let new_total_interest = total_interest(&augmented);
    let baseline_payoff_months = baseline.len() as u32;
    let new_payoff_months = augmented.len() as u32;

    ExtraPaymentOutput {
        impact: ExtraPaymentImpact {
            new_payoff_months,
            interest_saved: round_cents(baseline_total_interest - new_total_interest),
            new_total_interest,
        },
        baseline_payoff_months,
        baseline_total_interest,
        months_saved: baseline_payoff_months.saturating_sub(new_payoff_months),
        baseline_paid_off: is_paid_off(&baseline),
        paid_off: is_paid_off(&augmented),
    }
}

fn is_paid_off(rows: &[AmortizationRow]) -> bool {
    rows.last().map_or(true, |r| r.remaining_balance.is_zero())
}

/// Simulate an extra monthly payment with validation and warnings.
pub fn calculate_extra_payment(
    input: &ExtraPaymentInput,
) -> LedgerResult<ComputationOutput<ExtraPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_terms(input.annual_rate_percent, input.monthly_payment, input.max_months)?;
    if input.extra_amount < Decimal::ZERO {
        return Err(LedgerError::InvalidInput {
            field: "extra_amount".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }

    let output = simulate(
        input.balance,
        input.annual_rate_percent,
        input.monthly_payment,
        input.extra_amount,
        input.max_months,
    );

    if !output.baseline_paid_off {
        warnings.push(format!(
            "Regular payment does not pay off within {} months; savings are measured against a truncated schedule",
            input.max_months
        ));
    }
    if !output.paid_off {
        warnings.push(format!(
            "Increased payment does not pay off within {} months",
            input.max_months
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Baseline vs increased-payment amortization comparison",
        &serde_json::json!({
            "balance": input.balance.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "monthly_payment": input.monthly_payment.to_string(),
            "extra_amount": input.extra_amount.to_string(),
            "max_months": input.max_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_extra_saves_exactly_nothing() {
        for (b, r, p) in [
            (dec!(200000), dec!(6), dec!(1199.10)),
            (dec!(15000), dec!(24.99), dec!(250)),
            (dec!(100000), dec!(6), dec!(100)),
            (dec!(0), dec!(3), dec!(50)),
        ] {
            let impact = calculate_extra_payment_impact(b, r, p, dec!(0));
            assert_eq!(impact.interest_saved, Decimal::ZERO);
        }
    }

    #[test]
    fn test_zero_rate_saves_no_interest_but_time() {
        let impact = calculate_extra_payment_impact(dec!(1200), dec!(0), dec!(100), dec!(100));
        assert_eq!(impact.new_payoff_months, 6);
        assert_eq!(impact.interest_saved, dec!(0));
        assert_eq!(impact.new_total_interest, dec!(0));
    }

    #[test]
    fn test_extra_payment_shortens_mortgage() {
        let input = ExtraPaymentInput {
            balance: dec!(200000),
            annual_rate_percent: dec!(6),
            monthly_payment: dec!(1199.10),
            extra_amount: dec!(200),
            max_months: 600,
        };
        let out = calculate_extra_payment(&input).unwrap().result;
        assert!(out.impact.new_payoff_months < out.baseline_payoff_months);
        assert!(out.impact.interest_saved > dec!(0));
        assert_eq!(
            out.impact.interest_saved + out.impact.new_total_interest,
            out.baseline_total_interest
        );
        assert_eq!(
            out.months_saved,
            out.baseline_payoff_months - out.impact.new_payoff_months
        );
    }

    #[test]
    fn test_rejects_negative_extra() {
        let input = ExtraPaymentInput {
            balance: dec!(1000),
            annual_rate_percent: dec!(5),
            monthly_payment: dec!(100),
            extra_amount: dec!(-10),
            max_months: 600,
        };
        assert!(calculate_extra_payment(&input).is_err());
    }

    #[test]
    fn test_warns_when_neither_schedule_pays_off() {
        let input = ExtraPaymentInput {
            balance: dec!(100000),
            annual_rate_percent: dec!(6),
            monthly_payment: dec!(100),
            extra_amount: dec!(50),
            max_months: 24,
        };
        let out = calculate_extra_payment(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert_eq!(out.result.impact.new_payoff_months, 24);
    }
}
