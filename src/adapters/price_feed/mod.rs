//! Price feed adapters implementing `ExchangeRateProvider`.

mod coingecko;
mod mock;

pub use coingecko::{parse_rate, CoinGeckoPriceFeed};
pub use mock::MockExchangeRateProvider;
