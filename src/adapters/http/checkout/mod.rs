//! HTTP adapter for checkout endpoints.
//!
//! - `GET /` - Checkout page
//! - `GET /config` - Publishable key
//! - `GET /create-payment-intent` - Intent priced from the sale contract
//! - `GET /create-test-intent` - Fixed 1.00 intent
//! - `POST /webhook` - Stripe webhooks
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutApiError, CheckoutAppState, SIGNATURE_HEADER};
pub use routes::checkout_router;
