mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Deserialize;
use std::process;

use commands::accounts::{AccountsArgs, NetWorthArgs, UtilizationArgs};
use commands::balances::{BalanceHistoryArgs, DriftArgs, ReconcileArgs};
use commands::loans::{AmortizationArgs, ExtraPaymentArgs, LoanPaymentArgs, PaymentSplitArgs};
use config::Config;

/// Ledger balance, net worth and loan calculations
#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Ledger balance, net worth and loan calculations",
    long_about = "A CLI over the ledger calculation engine. Reconstructs balance \
                  history, detects balance drift, summarizes net worth and credit \
                  utilization, and simulates loan amortization with cent precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the config file, then json)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Path to config file
    #[arg(long, default_value = "ledger.toml", global = true)]
    config: String,

    /// Log level (overrides config file)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct end-of-month balances from monthly deltas
    BalanceHistory(BalanceHistoryArgs),
    /// Compare a stored balance with a calculated one
    Drift(DriftArgs),
    /// Recompute a balance from transactions and report drift
    Reconcile(ReconcileArgs),
    /// Assets, liabilities and net worth
    NetWorth(NetWorthArgs),
    /// Group accounts by type with net worth and card utilization
    Accounts(AccountsArgs),
    /// Credit utilization for one card
    Utilization(UtilizationArgs),
    /// Split one monthly payment into interest and principal
    PaymentSplit(PaymentSplitArgs),
    /// Month-by-month amortization schedule
    Amortization(AmortizationArgs),
    /// Months and interest saved by paying extra each month
    ExtraPayment(ExtraPaymentArgs),
    /// Level monthly payment for a fixed-term loan
    LoanPayment(LoanPaymentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init(&config.logging);

    let max_months = config.loans.max_months;
    let format = cli
        .output
        .or(config.output.format)
        .unwrap_or(OutputFormat::Json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::BalanceHistory(args) => commands::balances::run_balance_history(args),
        Commands::Drift(args) => commands::balances::run_drift(args),
        Commands::Reconcile(args) => commands::balances::run_reconcile(args),
        Commands::NetWorth(args) => commands::accounts::run_net_worth(args),
        Commands::Accounts(args) => commands::accounts::run_accounts(args),
        Commands::Utilization(args) => commands::accounts::run_utilization(args),
        Commands::PaymentSplit(args) => commands::loans::run_payment_split(args),
        Commands::Amortization(args) => commands::loans::run_amortization(args, max_months),
        Commands::ExtraPayment(args) => commands::loans::run_extra_payment(args, max_months),
        Commands::LoanPayment(args) => commands::loans::run_loan_payment(args),
        Commands::Version => {
            println!("ledger {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
