//! Data Transfer Objects for checkout HTTP endpoints.
//!
//! Response bodies use camelCase field names, which the checkout page reads.

use serde::{Deserialize, Serialize};

use crate::application::handlers::checkout::CheckoutIntent;

/// Public payment configuration for the checkout page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub publishable_key: String,
}

/// A created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    /// Whole-unit price shown to the buyer.
    pub amount: i64,
}

impl From<CheckoutIntent> for PaymentIntentResponse {
    fn from(intent: CheckoutIntent) -> Self {
        Self {
            client_secret: intent.client_secret,
            amount: intent.amount,
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
