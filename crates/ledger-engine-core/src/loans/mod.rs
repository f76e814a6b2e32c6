//! Loan amortization: payment splitting, payoff schedules and
//! extra-payment simulation.

pub mod extra_payment;
pub mod schedule;
pub mod split;
pub mod time_value;

/// Simulation horizon used when the caller does not supply one (50 years).
pub const DEFAULT_MAX_MONTHS: u32 = 600;

pub(crate) fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}
