//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CheckoutError, CheckoutIntent, CreatePaymentIntentHandler, CreateTestIntentHandler,
    GetCurrentPriceHandler, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    PriceConverter, WebhookOutcome, TEST_INTENT_AMOUNT,
};
