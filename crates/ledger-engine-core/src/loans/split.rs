use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rounding::round_cents;
use crate::types::{Money, PercentRate};

/// One period's payment divided into interest and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub interest: Money,
    pub principal: Money,
}

/// Interest accrued on `balance` over one month, rounded to cents.
pub fn monthly_interest(balance: Money, annual_rate_percent: PercentRate) -> Money {
    round_cents(balance.abs() * (annual_rate_percent / dec!(100)) / dec!(12))
}

/// Split `payment` into interest and principal for one month.
///
/// Interest is rounded before it is subtracted. A payment that does not
/// exceed the accrued interest is all interest and retires no principal.
pub fn calculate_payment_split(
    balance: Money,
    annual_rate_percent: PercentRate,
    payment: Money,
) -> PaymentSplit {
    let interest = monthly_interest(balance, annual_rate_percent);

    if payment <= interest {
        return PaymentSplit {
            interest: round_cents(payment),
            principal: Decimal::ZERO,
        };
    }

    PaymentSplit {
        interest,
        principal: round_cents(payment - interest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mortgage_split() {
        let s = calculate_payment_split(dec!(200000), dec!(6), dec!(1199.10));
        assert_eq!(s.interest, dec!(1000));
        assert_eq!(s.principal, dec!(199.10));
    }

    #[test]
    fn test_payment_below_interest_is_all_interest() {
        let s = calculate_payment_split(dec!(200000), dec!(6), dec!(500));
        assert_eq!(s.interest, dec!(500));
        assert_eq!(s.principal, dec!(0));
    }

    #[test]
    fn test_payment_equal_to_interest_retires_nothing() {
        let s = calculate_payment_split(dec!(200000), dec!(6), dec!(1000));
        assert_eq!(s.interest, dec!(1000));
        assert_eq!(s.principal, dec!(0));
    }

    #[test]
    fn test_negative_balance_uses_magnitude() {
        let pos = calculate_payment_split(dec!(200000), dec!(6), dec!(1199.10));
        let neg = calculate_payment_split(dec!(-200000), dec!(6), dec!(1199.10));
        assert_eq!(pos, neg);
    }

    #[test]
    fn test_zero_rate_and_zero_balance() {
        let s = calculate_payment_split(dec!(5000), dec!(0), dec!(250));
        assert_eq!(s, PaymentSplit { interest: dec!(0), principal: dec!(250) });
        let s = calculate_payment_split(dec!(0), dec!(18.99), dec!(250));
        assert_eq!(s, PaymentSplit { interest: dec!(0), principal: dec!(250) });
    }

    #[test]
    fn test_interest_rounded_before_subtraction() {
        // 1234.56 * 7.25% / 12 = 7.4588 -> 7.46
        let s = calculate_payment_split(dec!(1234.56), dec!(7.25), dec!(100));
        assert_eq!(s.interest, dec!(7.46));
        assert_eq!(s.principal, dec!(92.54));
    }
}
