use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (6 = 6% APR), the way loan
/// terms are entered and stored by the ledger.
pub type PercentRate = Decimal;

/// Calendar month used to key balance history. Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(LedgerError::InvalidMonthKey(format!("{year}-{month}")));
        }
        Ok(MonthKey { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately after this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidMonthKey(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Account categories known to the ledger. Unrecognised type names
/// deserialize as `Other` and count as assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Loan,
    Mortgage,
    Investment,
    Cash,
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Display order used by dashboards when the caller supplies none.
    pub const DEFAULT_ORDER: [AccountType; 8] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Investment,
        AccountType::Cash,
        AccountType::CreditCard,
        AccountType::Loan,
        AccountType::Mortgage,
        AccountType::Other,
    ];

    /// Debt accounts: balances are stored negative and count as liabilities.
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            AccountType::CreditCard | AccountType::Loan | AccountType::Mortgage
        )
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::CreditCard => "Credit Cards",
            AccountType::Loan => "Loans",
            AccountType::Mortgage => "Mortgages",
            AccountType::Investment => "Investments",
            AccountType::Cash => "Cash",
            AccountType::Other => "Other",
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit_cents".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_round_trips_through_string() {
        let key: MonthKey = "2026-03".parse().unwrap();
        assert_eq!(key.year(), 2026);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2026-03");
    }

    #[test]
    fn test_month_key_rejects_malformed() {
        for bad in ["2026-13", "2026-00", "26-01", "2026/01", "2026-1", "abcd-ef", ""] {
            assert!(bad.parse::<MonthKey>().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_month_key_orders_chronologically() {
        let dec25: MonthKey = "2025-12".parse().unwrap();
        let jan26: MonthKey = "2026-01".parse().unwrap();
        assert!(dec25 < jan26);
        assert_eq!(dec25.next(), jan26);
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key = MonthKey::new(2026, 7).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-07\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_account_type_liability_set() {
        let liabilities: Vec<AccountType> = AccountType::DEFAULT_ORDER
            .into_iter()
            .filter(AccountType::is_liability)
            .collect();
        assert_eq!(
            liabilities,
            vec![AccountType::CreditCard, AccountType::Loan, AccountType::Mortgage]
        );
    }

    #[test]
    fn test_account_type_wire_names() {
        let t: AccountType = serde_json::from_str("\"CREDIT_CARD\"").unwrap();
        assert_eq!(t, AccountType::CreditCard);
    }

    #[test]
    fn test_unlisted_account_type_reads_as_other() {
        let t: AccountType = serde_json::from_str("\"BROKERAGE\"").unwrap();
        assert_eq!(t, AccountType::Other);
        assert!(!t.is_liability());
    }
}
