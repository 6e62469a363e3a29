//! Money helpers using decimal arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` in the currency's standard unit
//! (dollars, not cents). Arithmetic stays exact; rounding happens only when a
//! figure is about to be shown or returned.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for money.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round an amount to cents, half away from zero, with a fixed scale of 2.
///
/// `176` becomes `176.00` and `16.005` becomes `16.01`.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Sum amounts without intermediate rounding.
pub fn sum_money<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, x| acc + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_pads_scale() {
        let rounded = round_money(Decimal::from(176));
        assert_eq!(rounded.to_string(), "176.00");
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(16_005, 3)), Decimal::new(1601, 2));
        assert_eq!(round_money(Decimal::new(-16_005, 3)), Decimal::new(-1601, 2));
    }

    #[test]
    fn test_sum_money_is_exact() {
        let tenth = Decimal::new(1, 1);
        let total = sum_money(std::iter::repeat_n(tenth, 3));
        assert_eq!(total, Decimal::new(3, 1));
    }

    #[test]
    fn test_sum_money_empty_is_zero() {
        assert_eq!(sum_money(Vec::new()), Decimal::ZERO);
    }
}
