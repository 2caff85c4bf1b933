//! Pricing handlers.
//!
//! ## Queries
//! - Convert a native amount to fiat (`PriceConverter`)
//! - Current checkout price from the sale contract (`GetCurrentPriceHandler`)

mod convert_price;
mod get_current_price;

pub use convert_price::PriceConverter;
pub use get_current_price::GetCurrentPriceHandler;
