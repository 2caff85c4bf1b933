//! Axum router configuration for checkout endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_payment_intent, create_test_intent, get_config, handle_webhook, health,
    serve_checkout_page, CheckoutAppState,
};

/// Create the checkout router.
///
/// # Routes
/// - `GET /` - Checkout page
/// - `GET /config` - Publishable key
/// - `GET /create-payment-intent` - Contract-priced intent
/// - `GET /create-test-intent` - Fixed test intent
/// - `POST /webhook` - Stripe webhooks (raw body, signature verified)
/// - `GET /health` - Liveness probe
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", get(serve_checkout_page))
        .route("/config", get(get_config))
        .route("/create-payment-intent", get(create_payment_intent))
        .route("/create-test-intent", get(create_test_intent))
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
}
