//! Amount in the smallest currency unit (e.g. cents).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AmountError;

/// Largest amount Stripe accepts for a single charge (999 999.99 in a
/// two-decimal currency).
const MAX_MINOR_UNITS: i64 = 99_999_999;

/// A strictly positive amount in the smallest unit of a two-decimal currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Creates an amount from a minor-unit integer.
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value <= 0 {
            return Err(AmountError::NotPositive(value as f64));
        }
        if value > MAX_MINOR_UNITS {
            return Err(AmountError::TooLarge(value as f64));
        }
        Ok(Self(value))
    }

    /// Converts a major-unit amount (e.g. euros) to minor units,
    /// rounding to the nearest unit.
    pub fn from_major(amount: f64) -> Result<Self, AmountError> {
        if !amount.is_finite() {
            return Err(AmountError::NotFinite(amount));
        }
        let scaled = (amount * 100.0).round();
        if scaled <= 0.0 {
            return Err(AmountError::NotPositive(amount));
        }
        if scaled > MAX_MINOR_UNITS as f64 {
            return Err(AmountError::TooLarge(amount));
        }
        Ok(Self(scaled as i64))
    }

    /// Returns the raw minor-unit value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(MinorUnits::from_major(150.0).unwrap().value(), 15000);
        assert_eq!(MinorUnits::from_major(1.0).unwrap().value(), 100);
        assert_eq!(MinorUnits::from_major(12.346).unwrap().value(), 1235);
        assert_eq!(MinorUnits::from_major(12.344).unwrap().value(), 1234);
    }

    #[test]
    fn from_major_rejects_nan_and_infinity() {
        assert!(matches!(
            MinorUnits::from_major(f64::NAN),
            Err(AmountError::NotFinite(_))
        ));
        assert!(matches!(
            MinorUnits::from_major(f64::INFINITY),
            Err(AmountError::NotFinite(_))
        ));
    }

    #[test]
    fn from_major_rejects_amounts_rounding_to_zero() {
        assert_eq!(
            MinorUnits::from_major(0.004),
            Err(AmountError::NotPositive(0.004))
        );
        assert_eq!(
            MinorUnits::from_major(-3.0),
            Err(AmountError::NotPositive(-3.0))
        );
    }

    #[test]
    fn from_major_rejects_amounts_above_processor_limit() {
        assert!(matches!(
            MinorUnits::from_major(1_000_000.0),
            Err(AmountError::TooLarge(_))
        ));
    }

    #[test]
    fn new_validates_range() {
        assert_eq!(MinorUnits::new(100).unwrap().value(), 100);
        assert!(MinorUnits::new(0).is_err());
        assert!(MinorUnits::new(MAX_MINOR_UNITS + 1).is_err());
    }

    proptest! {
        #[test]
        fn from_major_matches_rounded_cents(amount in 0.01f64..999_999.0) {
            let expected = (amount * 100.0).round() as i64;
            let units = MinorUnits::from_major(amount).unwrap();
            prop_assert_eq!(units.value(), expected);
        }
    }
}
