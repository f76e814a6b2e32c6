use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Number of decimal places every monetary output carries.
pub const CENT_PLACES: u32 = 2;

/// Round to the nearest cent, half away from zero.
///
/// Rounding the magnitude half-up and restoring the sign is exactly
/// `MidpointAwayFromZero`, so `-2.345` becomes `-2.35`, never `-2.34`.
pub fn round_cents(value: Money) -> Money {
    value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum a sequence of amounts and round the total once.
pub fn sum_cents<I>(values: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    round_cents(values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v))
}
