//! Pricing domain - value objects for the checkout price.
//!
//! The checkout price originates as a native-coin amount read from a
//! contract, is converted into fiat, and is finally charged in the fiat
//! currency's smallest unit.

mod errors;
mod minor_units;
mod quote;

pub use errors::AmountError;
pub use minor_units::MinorUnits;
pub use quote::{PriceQuote, CHECKOUT_CURRENCY, NATIVE_UNIT};
