//! CreatePaymentIntentHandler - Command handler for a contract-priced intent.

use std::sync::Arc;

use crate::application::handlers::pricing::GetCurrentPriceHandler;
use crate::ports::{CreatePaymentIntentRequest, PaymentProvider};

use super::{CheckoutError, CheckoutIntent};

/// Handler that prices the checkout from the sale contract and opens an
/// intent for that amount.
pub struct CreatePaymentIntentHandler {
    pricing: Arc<GetCurrentPriceHandler>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreatePaymentIntentHandler {
    pub fn new(
        pricing: Arc<GetCurrentPriceHandler>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            pricing,
            payment_provider,
        }
    }

    pub async fn handle(&self) -> Result<CheckoutIntent, CheckoutError> {
        // 1. Current price in fiat
        let quote = self
            .pricing
            .handle()
            .await?
            .ok_or(CheckoutError::PriceUnavailable)?;

        // 2. Amount in minor units
        let amount = quote.minor_units().map_err(|e| {
            tracing::error!(
                error = %e,
                fiat_amount = quote.fiat_amount,
                "Computed price is not chargeable"
            );
            e
        })?;

        // 3. Create the intent
        let intent = self
            .payment_provider
            .create_payment_intent(CreatePaymentIntentRequest::new(
                amount,
                quote.fiat_currency.clone(),
            ))
            .await?;

        Ok(CheckoutIntent {
            client_secret: intent.client_secret,
            amount: quote.display_amount(),
        })
    }
}
