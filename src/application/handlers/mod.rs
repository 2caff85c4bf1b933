//! Application handlers.
//!
//! Command and query handlers that orchestrate the ports.

pub mod checkout;
pub mod pricing;

pub use checkout::{
    CheckoutError, CheckoutIntent, CreatePaymentIntentHandler, CreateTestIntentHandler,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
    TEST_INTENT_AMOUNT,
};
pub use pricing::{GetCurrentPriceHandler, PriceConverter};
