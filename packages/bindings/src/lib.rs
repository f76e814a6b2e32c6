use std::collections::HashMap;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use ledger_engine_core::accounts::{grouping, net_worth, summary, AccountSummary};
use ledger_engine_core::balances::{drift, history};
use ledger_engine_core::loans::{extra_payment, schedule, split, time_value};
use ledger_engine_core::types::AccountType;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|e| to_napi_error(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_balance_history(input_json: String) -> NapiResult<String> {
    let input: history::BalanceHistoryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = history::build_balance_history(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_drift(stored_balance: String, calculated_balance: String) -> NapiResult<String> {
    let stored = parse_decimal("stored_balance", &stored_balance)?;
    let calculated = parse_decimal("calculated_balance", &calculated_balance)?;
    Ok(drift::compute_drift(stored, calculated).to_string())
}

#[napi]
pub fn reconcile_balance(input_json: String) -> NapiResult<String> {
    let input: drift::ReconciliationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = drift::reconcile_balance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[napi]
pub fn group_accounts_by_type(
    accounts_json: String,
    type_order_json: String,
    labels_json: Option<String>,
) -> NapiResult<String> {
    let accounts: Vec<AccountSummary> =
        serde_json::from_str(&accounts_json).map_err(to_napi_error)?;
    let order: Vec<AccountType> = serde_json::from_str(&type_order_json).map_err(to_napi_error)?;
    let labels: HashMap<AccountType, String> = match labels_json {
        Some(raw) => serde_json::from_str(&raw).map_err(to_napi_error)?,
        None => HashMap::new(),
    };
    let groups = grouping::group_accounts_by_type(&accounts, &order, &labels);
    serde_json::to_string(&groups).map_err(to_napi_error)
}

#[napi]
pub fn compute_net_worth(input_json: String) -> NapiResult<String> {
    let input: net_worth::NetWorthInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = net_worth::calculate_net_worth(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_utilization(balance: String, credit_limit: String) -> NapiResult<String> {
    let balance = parse_decimal("balance", &balance)?;
    let limit = parse_decimal("credit_limit", &credit_limit)?;
    Ok(net_worth::compute_utilization(balance, limit).to_string())
}

#[napi]
pub fn summarize_portfolio(input_json: String) -> NapiResult<String> {
    let input: summary::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = summary::summarize_portfolio(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment_split(
    balance: String,
    annual_rate_percent: String,
    payment: String,
) -> NapiResult<String> {
    let split = split::calculate_payment_split(
        parse_decimal("balance", &balance)?,
        parse_decimal("annual_rate_percent", &annual_rate_percent)?,
        parse_decimal("payment", &payment)?,
    );
    serde_json::to_string(&split).map_err(to_napi_error)
}

#[napi]
pub fn generate_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: schedule::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_extra_payment_impact(input_json: String) -> NapiResult<String> {
    let input: extra_payment::ExtraPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = extra_payment::calculate_extra_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_loan_payment(input_json: String) -> NapiResult<String> {
    let input: time_value::LoanPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = time_value::calculate_loan_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
