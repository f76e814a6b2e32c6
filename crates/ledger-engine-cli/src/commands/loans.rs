use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ledger_engine_core::loans::extra_payment::{self, ExtraPaymentInput};
use ledger_engine_core::loans::schedule::{self, AmortizationInput};
use ledger_engine_core::loans::split;
use ledger_engine_core::loans::time_value::{self, LoanPaymentInput};

use crate::input;

/// Arguments shared by the loan commands
#[derive(Args)]
pub struct LoanTermsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance (sign is ignored)
    #[arg(long, allow_hyphen_values = true)]
    pub balance: Option<Decimal>,

    /// Annual percentage rate (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Regular monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,
}

impl LoanTermsArgs {
    fn terms(&self) -> Result<(Decimal, Decimal, Decimal), Box<dyn std::error::Error>> {
        let balance = self.balance.ok_or("--balance is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let payment = self.payment.ok_or("--payment is required (or provide --input)")?;
        Ok((balance, rate, payment))
    }
}

/// Arguments for a single-period payment split
#[derive(Args)]
pub struct PaymentSplitArgs {
    #[command(flatten)]
    pub loan: LoanTermsArgs,
}

pub fn run_payment_split(args: PaymentSplitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let parsed: Option<AmortizationInput> = input::read_input(args.loan.input.as_deref())?;
    let (balance, rate, payment) = match parsed {
        Some(p) => (p.balance, p.annual_rate_percent, p.monthly_payment),
        None => args.loan.terms()?,
    };
    let result = split::calculate_payment_split(balance, rate, payment);
    Ok(serde_json::to_value(result)?)
}

/// JSON input that leaves out `max_months` takes the flag or config horizon.
fn apply_horizon(mut value: Value, horizon: u32) -> Value {
    if let Value::Object(map) = &mut value {
        map.entry("max_months").or_insert_with(|| Value::from(horizon));
    }
    value
}

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    #[command(flatten)]
    pub loan: LoanTermsArgs,

    /// Simulation horizon in months (defaults to the config value)
    #[arg(long)]
    pub max_months: Option<u32>,
}

pub fn run_amortization(
    args: AmortizationArgs,
    default_max_months: u32,
) -> Result<Value, Box<dyn std::error::Error>> {
    let horizon = args.max_months.unwrap_or(default_max_months);
    let parsed: Option<Value> = input::read_input(args.loan.input.as_deref())?;
    let schedule_input: AmortizationInput = match parsed {
        Some(value) => serde_json::from_value(apply_horizon(value, horizon))?,
        None => {
            let (balance, rate, payment) = args.loan.terms()?;
            AmortizationInput {
                balance,
                annual_rate_percent: rate,
                monthly_payment: payment,
                max_months: horizon,
            }
        }
    };
    let result = schedule::build_amortization_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for an extra-payment simulation
#[derive(Args)]
pub struct ExtraPaymentArgs {
    #[command(flatten)]
    pub loan: LoanTermsArgs,

    /// Amount added to every monthly payment
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Simulation horizon in months (defaults to the config value)
    #[arg(long)]
    pub max_months: Option<u32>,
}

pub fn run_extra_payment(
    args: ExtraPaymentArgs,
    default_max_months: u32,
) -> Result<Value, Box<dyn std::error::Error>> {
    let horizon = args.max_months.unwrap_or(default_max_months);
    let parsed: Option<Value> = input::read_input(args.loan.input.as_deref())?;
    let extra_input: ExtraPaymentInput = match parsed {
        Some(value) => serde_json::from_value(apply_horizon(value, horizon))?,
        None => {
            let (balance, rate, payment) = args.loan.terms()?;
            ExtraPaymentInput {
                balance,
                annual_rate_percent: rate,
                monthly_payment: payment,
                extra_amount: args.extra.ok_or("--extra is required (or provide --input)")?,
                max_months: horizon,
            }
        }
    };
    let result = extra_payment::calculate_extra_payment(&extra_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a closed-form level payment
#[derive(Args)]
pub struct LoanPaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual percentage rate (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,
}

pub fn run_loan_payment(args: LoanPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pmt_input: LoanPaymentInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanPaymentInput {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            months: args.months.ok_or("--months is required (or provide --input)")?,
        },
    };
    let result = time_value::calculate_loan_payment(&pmt_input)?;
    Ok(serde_json::to_value(result)?)
}
