//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::application::handlers::checkout::{
    CheckoutError, CreatePaymentIntentHandler, CreateTestIntentHandler,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
};
use crate::application::handlers::pricing::GetCurrentPriceHandler;
use crate::ports::PaymentProvider;

use super::dto::{ConfigResponse, ErrorResponse, HealthResponse, PaymentIntentResponse};

/// Header carrying Stripe's webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; everything inside is immutable.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub pricing: Arc<GetCurrentPriceHandler>,
    pub publishable_key: String,
    pub static_dir: PathBuf,
}

impl CheckoutAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(self.pricing.clone(), self.payment_provider.clone())
    }

    pub fn create_test_intent_handler(&self) -> CreateTestIntentHandler {
        CreateTestIntentHandler::new(self.payment_provider.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.payment_provider.clone())
    }

    fn index_path(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Serve the checkout page
pub async fn serve_checkout_page(State(state): State<CheckoutAppState>) -> Response {
    let path = state.index_path();
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Checkout page not found");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("NOT_FOUND", "Checkout page not found")),
            )
                .into_response()
        }
    }
}

/// GET /config - Public payment configuration
pub async fn get_config(State(state): State<CheckoutAppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.publishable_key.clone(),
    })
}

/// GET /create-payment-intent - Intent priced from the sale contract
pub async fn create_payment_intent(
    State(state): State<CheckoutAppState>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let handler = state.create_payment_intent_handler();
    let intent = handler.handle().await?;
    Ok(Json(PaymentIntentResponse::from(intent)))
}

/// GET /create-test-intent - Fixed 1.00 intent
pub async fn create_test_intent(
    State(state): State<CheckoutAppState>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let handler = state.create_test_intent_handler();
    let intent = handler.handle().await?;
    Ok(Json(PaymentIntentResponse::from(intent)))
}

/// POST /webhook - Handle Stripe webhook events
///
/// Takes the raw body; signature verification needs the exact bytes.
pub async fn handle_webhook(
    State(state): State<CheckoutAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    // A missing header fails verification like a bad one.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    match state.webhook_handler().handle(cmd).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_REQUEST,
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts checkout errors to HTTP responses.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            CheckoutError::PriceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "PRICE_UNAVAILABLE")
            }
            CheckoutError::ContractRead(_) => (StatusCode::BAD_GATEWAY, "CONTRACT_READ_FAILED"),
            CheckoutError::InvalidAmount(_) => (StatusCode::BAD_GATEWAY, "INVALID_PRICE"),
            CheckoutError::Payment(_) => (StatusCode::BAD_REQUEST, "PAYMENT_FAILED"),
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
