//! GetCurrentPriceHandler - Query handler composing the contract read and
//! fiat conversion.

use std::sync::Arc;

use crate::domain::pricing::{PriceQuote, NATIVE_UNIT};
use crate::ports::{ContractReadError, ContractReader};

use super::PriceConverter;

/// Handler for the current checkout price.
///
/// Reads the contract price, then converts it. A contract failure is an
/// error; an unavailable conversion is `Ok(None)`.
pub struct GetCurrentPriceHandler {
    contract: Arc<dyn ContractReader>,
    converter: PriceConverter,
}

impl GetCurrentPriceHandler {
    pub fn new(contract: Arc<dyn ContractReader>, converter: PriceConverter) -> Self {
        Self {
            contract,
            converter,
        }
    }

    pub async fn handle(&self) -> Result<Option<PriceQuote>, ContractReadError> {
        // 1. Read the on-chain price
        let native_amount = self.contract.current_price().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read current price from contract");
            e
        })?;

        // 2. Convert to fiat
        let Some(quote) = self.converter.convert(native_amount).await else {
            tracing::warn!(amount = native_amount, unit = NATIVE_UNIT, "Unable to fetch EUR price");
            return Ok(None);
        };

        tracing::info!(
            native_amount = quote.native_amount,
            unit = NATIVE_UNIT,
            fiat_amount = quote.fiat_amount,
            currency = %quote.fiat_currency,
            "Current price"
        );

        Ok(Some(quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chain::MockContractReader;
    use crate::adapters::price_feed::MockExchangeRateProvider;
    use crate::ports::PriceFeedError;

    fn handler(
        reader: MockContractReader,
        feed: MockExchangeRateProvider,
    ) -> GetCurrentPriceHandler {
        GetCurrentPriceHandler::new(Arc::new(reader), PriceConverter::new(Arc::new(feed)))
    }

    #[tokio::test]
    async fn returns_quote_for_contract_price() {
        let handler = handler(
            MockContractReader::with_price(0.05),
            MockExchangeRateProvider::with_rate(3000.0),
        );

        let quote = handler.handle().await.unwrap().unwrap();

        assert_eq!(quote.display_amount(), 150);
        assert_eq!(quote.minor_units().unwrap().value(), 15000);
    }

    #[tokio::test]
    async fn returns_none_when_conversion_unavailable() {
        let handler = handler(
            MockContractReader::with_price(0.05),
            MockExchangeRateProvider::failing(PriceFeedError::Status(503)),
        );

        assert_eq!(handler.handle().await, Ok(None));
    }

    #[tokio::test]
    async fn propagates_contract_failure_without_querying_feed() {
        let feed = MockExchangeRateProvider::with_rate(3000.0);
        let handler = handler(
            MockContractReader::failing(ContractReadError::Rpc("timeout".to_string())),
            feed.clone(),
        );

        let result = handler.handle().await;

        assert_eq!(result, Err(ContractReadError::Rpc("timeout".to_string())));
        assert_eq!(feed.call_count(), 0);
    }
}
