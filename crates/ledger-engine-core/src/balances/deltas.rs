use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rounding::round_cents;
use crate::types::{Money, MonthKey};

/// A signed ledger movement on a given day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: Money,
}

/// Sum signed transaction amounts into per-month net deltas.
pub fn aggregate_monthly_deltas(transactions: &[DatedAmount]) -> HashMap<MonthKey, Money> {
    let mut deltas: HashMap<MonthKey, Money> = HashMap::new();
    for tx in transactions {
        *deltas
            .entry(MonthKey::from_date(tx.date))
            .or_insert(Decimal::ZERO) += tx.amount;
    }
    for total in deltas.values_mut() {
        *total = round_cents(*total);
    }
    deltas
}

/// Every month from `start` to `end` inclusive, oldest first.
pub fn month_range(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.next();
    }
    months
}
