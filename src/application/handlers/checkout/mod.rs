//! Checkout handlers.
//!
//! ## Commands
//! - Creating a payment intent priced from the sale contract
//! - Creating a fixed-amount test intent
//! - Processing payment webhooks

mod create_payment_intent;
mod create_test_intent;
mod errors;
mod handle_payment_webhook;

pub use create_payment_intent::CreatePaymentIntentHandler;
pub use create_test_intent::{CreateTestIntentHandler, TEST_INTENT_AMOUNT};
pub use errors::CheckoutError;
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};

/// Intent details handed back to the checkout page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutIntent {
    /// Secret the page uses to confirm payment.
    pub client_secret: String,

    /// Whole-unit price shown to the buyer.
    pub amount: i64,
}
