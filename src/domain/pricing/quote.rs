//! Price quote: a contract price expressed in fiat.

use serde::Serialize;

use super::{AmountError, MinorUnits};

/// Unit the contract price is denominated in.
pub const NATIVE_UNIT: &str = "ETH";

/// Fiat currency every checkout intent is charged in.
pub const CHECKOUT_CURRENCY: &str = "eur";

/// Current checkout price, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Contract price in the native unit.
    pub native_amount: f64,

    /// Price in fiat major units.
    pub fiat_amount: f64,

    /// Lowercase ISO 4217 currency code.
    pub fiat_currency: String,
}

impl PriceQuote {
    /// Builds a quote from a native amount and a native-to-fiat rate.
    pub fn from_rate(native_amount: f64, rate: f64, fiat_currency: impl Into<String>) -> Self {
        Self {
            native_amount,
            fiat_amount: native_amount * rate,
            fiat_currency: fiat_currency.into(),
        }
    }

    /// Amount to charge, in minor units.
    pub fn minor_units(&self) -> Result<MinorUnits, AmountError> {
        MinorUnits::from_major(self.fiat_amount)
    }

    /// Whole-unit price shown to the buyer.
    pub fn display_amount(&self) -> i64 {
        self.fiat_amount.round() as i64
    }
}
