use crate::error::{PaymentError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A normalized ruble amount with exactly two fraction digits.
///
/// Wraps `rust_decimal::Decimal` to enforce what the payload encoder
/// relies on: a submitted value is strictly positive and its stored form
/// carries exactly two fraction digits. The kopeck equivalent is fixed at
/// construction alongside the ruble value, so the two representations
/// never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amount {
    rubles: Decimal,
    kopecks: i64,
}

impl Amount {
    /// Parses free-form user input into a normalized amount.
    ///
    /// Accepts `.` or `,` as the fraction separator and ignores surrounding
    /// whitespace. Scientific notation is accepted as well.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = raw.trim().replace(',', ".");
        let value = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|_| PaymentError::InvalidAmountFormat)?;
        Self::new(value)
    }

    /// Validates and normalizes an already-parsed decimal.
    ///
    /// Positivity is checked on the raw value, before rounding, so inputs
    /// like `0.004` are accepted and round down to zero kopecks.
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        Self::from_stored(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Restores an amount from its canonical stored form.
    ///
    /// Positivity was enforced when the value was first accepted, and
    /// sub-kopeck submissions legitimately round down to `0.00`, so unlike
    /// `new` this does not reject zero.
    pub fn from_stored(value: Decimal) -> Result<Self> {
        let mut rubles = value;
        rubles.rescale(2);
        let kopecks = rubles
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|k| k.to_i64())
            .ok_or(PaymentError::InvalidAmountFormat)?;
        Ok(Self { rubles, kopecks })
    }

    /// The amount in rubles, scale fixed at two fraction digits.
    pub fn rubles(&self) -> Decimal {
        self.rubles
    }

    /// The amount in kopecks, the integer basis for the payload `SUM` field.
    pub fn kopecks(&self) -> i64 {
        self.kopecks
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rubles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_amount() {
        let amount = Amount::parse("1500.50").unwrap();
        assert_eq!(amount.rubles(), dec!(1500.50));
        assert_eq!(amount.kopecks(), 150050);
    }

    #[test]
    fn test_parse_comma_separator() {
        assert_eq!(Amount::parse("1500,50").unwrap(), Amount::parse("1500.50").unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let amount = Amount::parse("  10  ").unwrap();
        assert_eq!(amount.rubles(), dec!(10.00));
        assert_eq!(amount.kopecks(), 1000);
    }

    #[test]
    fn test_integer_input_gains_two_fraction_digits() {
        assert_eq!(Amount::parse("7").unwrap().to_string(), "7.00");
    }

    #[test]
    fn test_rounds_half_up_at_midpoint() {
        assert_eq!(Amount::parse("10.005").unwrap().kopecks(), 1001);
        assert_eq!(Amount::parse("10.004").unwrap().kopecks(), 1000);
        assert_eq!(Amount::parse("10.005").unwrap().rubles(), dec!(10.01));
    }

    #[test]
    fn test_exact_arithmetic_avoids_binary_float_trap() {
        // 2.675 is not representable in binary floating point; naive f64
        // rounding would yield 2.67.
        assert_eq!(Amount::parse("2.675").unwrap().kopecks(), 268);
    }

    #[test]
    fn test_sub_kopeck_value_rounds_to_zero_kopecks() {
        let amount = Amount::parse("0.004").unwrap();
        assert_eq!(amount.rubles(), dec!(0.00));
        assert_eq!(amount.kopecks(), 0);
    }

    #[test]
    fn test_accepts_scientific_notation() {
        let amount = Amount::parse("1e3").unwrap();
        assert_eq!(amount.rubles(), dec!(1000.00));
        assert_eq!(amount.kopecks(), 100000);
    }

    #[test]
    fn test_rejects_non_numeric_input() {
        for raw in ["abc", "", "10.5.5", "12,34,56"] {
            assert!(matches!(
                Amount::parse(raw),
                Err(PaymentError::InvalidAmountFormat)
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_values() {
        for raw in ["0", "0.00", "-5", "-0.01"] {
            assert!(matches!(
                Amount::parse(raw),
                Err(PaymentError::NonPositiveAmount)
            ));
        }
    }

    #[test]
    fn test_kopecks_overflow_is_format_error() {
        assert!(matches!(
            Amount::parse("100000000000000000000"),
            Err(PaymentError::InvalidAmountFormat)
        ));
    }
}
