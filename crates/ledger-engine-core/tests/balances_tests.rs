use std::collections::HashMap;

use chrono::NaiveDate;
use ledger_engine_core::balances::deltas::{aggregate_monthly_deltas, month_range, DatedAmount};
use ledger_engine_core::balances::drift::{self, ReconciliationInput};
use ledger_engine_core::balances::history::{self, BalanceHistoryInput, BalancePoint};
use ledger_engine_core::round_cents;
use ledger_engine_core::types::MonthKey;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn mk(s: &str) -> MonthKey {
    s.parse().unwrap()
}

// ===========================================================================
// Rounding
// ===========================================================================

#[test]
fn test_round_cents_idempotent_over_range() {
    let mut x = dec!(-50.0005);
    while x < dec!(50) {
        let once = round_cents(x);
        assert_eq!(round_cents(once), once);
        x += dec!(0.1237);
    }
}

// ===========================================================================
// Balance history
// ===========================================================================

#[test]
fn test_history_reconstruction() {
    let deltas = HashMap::from([(mk("2026-01"), dec!(200)), (mk("2026-02"), dec!(300))]);
    let points =
        history::compute_balance_history(dec!(1000), &deltas, &[mk("2026-01"), mk("2026-02")]);
    assert_eq!(
        points,
        vec![
            BalancePoint { month_key: mk("2026-01"), balance: dec!(700) },
            BalancePoint { month_key: mk("2026-02"), balance: dec!(1000) },
        ]
    );
}

#[test]
fn test_flat_history() {
    let keys = [mk("2026-01"), mk("2026-02"), mk("2026-03")];
    let points = history::compute_balance_history(dec!(500), &HashMap::new(), &keys);
    let balances: Vec<_> = points.iter().map(|p| p.balance).collect();
    assert_eq!(balances, vec![dec!(500), dec!(500), dec!(500)]);
}

#[test]
fn test_history_from_transactions() {
    let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let txs = vec![
        DatedAmount { date: day(2025, 12, 15), amount: dec!(-120) },
        DatedAmount { date: day(2026, 1, 2), amount: dec!(2000) },
        DatedAmount { date: day(2026, 1, 20), amount: dec!(-850.40) },
        DatedAmount { date: day(2026, 3, 9), amount: dec!(-99.99) },
    ];
    let deltas = aggregate_monthly_deltas(&txs);
    let months = month_range(mk("2025-12"), mk("2026-03"));

    let points = history::compute_balance_history(dec!(3029.61), &deltas, &months);
    let balances: Vec<_> = points.iter().map(|p| p.balance).collect();
    // Mar ends at 3029.61, Feb is flat, Jan nets +1149.60
    assert_eq!(
        balances,
        vec![dec!(1980.00), dec!(3129.60), dec!(3129.60), dec!(3029.61)]
    );
}

#[test]
fn test_history_envelope_from_json() {
    let input: BalanceHistoryInput = serde_json::from_str(
        r#"{
            "current_balance": "1000",
            "monthly_deltas": { "2026-01": "200", "2026-02": "300" },
            "month_keys": ["2026-01", "2026-02"]
        }"#,
    )
    .unwrap();
    let out = history::build_balance_history(&input).unwrap();
    assert_eq!(out.result.starting_balance, dec!(700));
    assert_eq!(out.result.ending_balance, dec!(1000));
    assert_eq!(out.result.net_change, dec!(300));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_history_envelope_rejects_empty_months() {
    let input = BalanceHistoryInput {
        current_balance: dec!(1),
        monthly_deltas: HashMap::new(),
        month_keys: vec![],
    };
    assert!(history::build_balance_history(&input).is_err());
}

// ===========================================================================
// Drift
// ===========================================================================

#[test]
fn test_drift_sign_convention() {
    assert_eq!(drift::compute_drift(dec!(100), dec!(105)), dec!(5));
    assert_eq!(drift::compute_drift(dec!(100), dec!(95)), dec!(-5));
    assert_eq!(drift::compute_drift(dec!(100), dec!(100)), dec!(0));
}

#[test]
fn test_reconcile_detects_overcount() {
    let input = ReconciliationInput {
        stored_balance: dec!(510.00),
        opening_balance: dec!(0),
        transaction_amounts: vec![dec!(1000), dec!(-250.10), dec!(-249.90)],
    };
    let out = drift::reconcile_balance(&input).unwrap();
    assert_eq!(out.result.calculated_balance, dec!(500));
    assert_eq!(out.result.drift, dec!(-10));
    assert!(out.result.needs_correction);
}
