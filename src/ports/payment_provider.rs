//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! Implementations create payment intents and verify signed webhook
//! deliveries; the payment state machine itself lives with the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::MinorUnits;

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for the given amount.
    ///
    /// Returns the intent including the client secret the checkout page
    /// uses to confirm payment.
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns the parsed event if valid, error if signature invalid.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a payment intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in the currency's smallest unit.
    pub amount: MinorUnits,

    /// Lowercase ISO 4217 currency code.
    pub currency: String,

    /// Let the provider pick payment methods from dashboard settings.
    pub automatic_payment_methods: bool,
}

impl CreatePaymentIntentRequest {
    /// Request with automatic payment method selection enabled.
    pub fn new(amount: MinorUnits, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            automatic_payment_methods: true,
        }
    }
}

/// Payment intent in the payment system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's intent ID (pi_...).
    pub id: String,

    /// Secret the client uses to confirm the payment.
    pub client_secret: String,

    /// Amount in minor units.
    pub amount: i64,

    /// Currency (lowercase).
    pub currency: String,

    /// Current intent status.
    pub status: PaymentIntentStatus,
}

/// Payment intent status from payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,

    /// Unknown status from provider.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentIntentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::RequiresAction => "requires_action",
            PaymentIntentStatus::Processing => "processing",
            PaymentIntentStatus::RequiresCapture => "requires_capture",
            PaymentIntentStatus::Canceled => "canceled",
            PaymentIntentStatus::Succeeded => "succeeded",
            PaymentIntentStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Webhook event from payment provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Event payload (provider-specific).
    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,

    /// Whether the event came from live mode.
    pub livemode: bool,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Funds have been captured.
    PaymentIntentSucceeded,

    /// The payment attempt failed.
    PaymentIntentPaymentFailed,

    /// Unknown event type.
    Unknown(String),
}

impl WebhookEventType {
    /// Map a provider event type string.
    pub fn from_provider(event_type: &str) -> Self {
        match event_type {
            "payment_intent.succeeded" => WebhookEventType::PaymentIntentSucceeded,
            "payment_intent.payment_failed" => WebhookEventType::PaymentIntentPaymentFailed,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookEventType::PaymentIntentSucceeded => write!(f, "payment_intent.succeeded"),
            WebhookEventType::PaymentIntentPaymentFailed => {
                write!(f, "payment_intent.payment_failed")
            }
            WebhookEventType::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// Webhook event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Payment intent data.
    #[serde(rename = "payment_intent")]
    PaymentIntent {
        payment_intent_id: String,
        object: String,
        status: PaymentIntentStatus,
        amount: i64,
        currency: String,
        last_payment_error: Option<String>,
    },

    /// Raw/unknown event data.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Request rejected as invalid (bad amount, currency, ...).
    InvalidRequest,

    /// Card was declined.
    CardDeclined,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Invalid webhook signature or payload.
    InvalidWebhook,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn create_request_enables_automatic_payment_methods() {
        let request = CreatePaymentIntentRequest::new(MinorUnits::new(100).unwrap(), "eur");
        assert!(request.automatic_payment_methods);
        assert_eq!(request.amount.value(), 100);
    }

    #[test]
    fn event_type_round_trips_provider_names() {
        for name in [
            "payment_intent.succeeded",
            "payment_intent.payment_failed",
            "charge.refunded",
        ] {
            assert_eq!(WebhookEventType::from_provider(name).to_string(), name);
        }
        assert_eq!(
            WebhookEventType::from_provider("charge.refunded"),
            WebhookEventType::Unknown("charge.refunded".to_string())
        );
    }

    #[test]
    fn unknown_intent_status_deserializes() {
        let status: PaymentIntentStatus = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(status, PaymentIntentStatus::Unknown);

        let status: PaymentIntentStatus =
            serde_json::from_str("\"requires_payment_method\"").unwrap();
        assert_eq!(status, PaymentIntentStatus::RequiresPaymentMethod);
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::invalid_request("Amount must be at least €0.50 eur")
            .with_provider_code("amount_too_small");
        assert!(err.to_string().contains("invalid_request"));
        assert!(err.to_string().contains("Amount must be at least"));
        assert_eq!(err.provider_code.as_deref(), Some("amount_too_small"));
    }
}
