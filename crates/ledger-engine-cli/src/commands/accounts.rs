use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ledger_engine_core::accounts::net_worth::{self, NetWorthInput, UtilizationInput};
use ledger_engine_core::accounts::summary::{self, PortfolioInput};

use crate::input;

/// Arguments for net worth
#[derive(Args)]
pub struct NetWorthArgs {
    /// Path to JSON input file: {"accounts": [{"balance": "..", "type": ".."}]}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_net_worth(args: NetWorthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let nw_input: NetWorthInput = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for net worth")?;
    let result = net_worth::calculate_net_worth(&nw_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the portfolio summary
#[derive(Args)]
pub struct AccountsArgs {
    /// Path to JSON input file with "accounts" and optional "type_order", "labels"
    #[arg(long)]
    pub input: Option<String>,

    /// Only include accounts held by this owner
    #[arg(long)]
    pub owner: Option<String>,
}

pub fn run_accounts(args: AccountsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut portfolio_input: PortfolioInput = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for account summary")?;
    if args.owner.is_some() {
        portfolio_input.owner = args.owner;
    }
    let result = summary::summarize_portfolio(&portfolio_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for credit utilization
#[derive(Args)]
pub struct UtilizationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Card balance (sign is ignored)
    #[arg(long, allow_hyphen_values = true)]
    pub balance: Option<Decimal>,

    /// Credit limit
    #[arg(long)]
    pub credit_limit: Option<Decimal>,
}

pub fn run_utilization(args: UtilizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let util_input: UtilizationInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => UtilizationInput {
            balance: args.balance.ok_or("--balance is required (or provide --input)")?,
            credit_limit: args
                .credit_limit
                .ok_or("--credit-limit is required (or provide --input)")?,
        },
    };
    let result = net_worth::calculate_utilization(&util_input)?;
    Ok(serde_json::to_value(result)?)
}
