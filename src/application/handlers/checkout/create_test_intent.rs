//! CreateTestIntentHandler - Command handler for a fixed-amount intent.

use std::sync::Arc;

use crate::domain::pricing::{MinorUnits, CHECKOUT_CURRENCY};
use crate::ports::{CreatePaymentIntentRequest, PaymentProvider};

use super::{CheckoutError, CheckoutIntent};

/// Test intent amount in EUR cents.
pub const TEST_INTENT_AMOUNT: i64 = 100;

/// Handler for a fixed test intent; no price lookup is involved.
pub struct CreateTestIntentHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateTestIntentHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub async fn handle(&self) -> Result<CheckoutIntent, CheckoutError> {
        let amount = MinorUnits::new(TEST_INTENT_AMOUNT)?;

        let intent = self
            .payment_provider
            .create_payment_intent(CreatePaymentIntentRequest::new(amount, CHECKOUT_CURRENCY))
            .await?;

        Ok(CheckoutIntent {
            client_secret: intent.client_secret,
            amount: TEST_INTENT_AMOUNT / 100,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::{PaymentError, PaymentErrorCode};

    #[tokio::test]
    async fn requests_one_hundred_eur_cents_and_returns_one() {
        let payments = MockPaymentProvider::new();
        let handler = CreateTestIntentHandler::new(Arc::new(payments.clone()));

        let intent = handler.handle().await.unwrap();

        assert_eq!(intent.amount, 1);
        let requests = payments.intent_requests();
        assert_eq!(requests[0].amount.value(), 100);
        assert_eq!(requests[0].currency, "eur");
    }

    #[tokio::test]
    async fn surfaces_processor_errors() {
        let payments = MockPaymentProvider::new();
        payments.set_error(PaymentError::authentication("Invalid API Key provided"));
        let handler = CreateTestIntentHandler::new(Arc::new(payments));

        match handler.handle().await {
            Err(CheckoutError::Payment(e)) => {
                assert_eq!(e.code, PaymentErrorCode::AuthenticationError)
            }
            other => panic!("expected payment error, got {other:?}"),
        }
    }
}
