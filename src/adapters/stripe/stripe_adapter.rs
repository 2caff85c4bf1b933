//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for Stripe API integration.
//! Handles payment intent creation and webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key, webhook_secret);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::ports::{
    CreatePaymentIntentRequest, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentIntentStatus, PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    SignatureHeader, StripeErrorResponse, StripePaymentIntent, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Stripe API version the request and response shapes are written against.
const STRIPE_API_VERSION: &str = "2023-10-16";

/// Identifies this integration to Stripe for support and debugging.
const APP_INFO: &str = "Genesis RE/1.1.0 (https://genesis.re/)";

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Whether to reject test-mode webhook events.
    require_livemode: bool,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            require_livemode: false,
        }
    }

    /// Build from application payment configuration.
    ///
    /// `require_livemode` is set by the caller for production deployments.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        let base = Self::new(&config.stripe_secret_key, &config.stripe_webhook_secret);
        match &config.stripe_api_base_url {
            Some(url) => base.with_base_url(url),
            None => base,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Require livemode events in production.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` for Stripe API integration.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now.checked_sub(header.timestamp).ok_or_else(|| {
            tracing::debug!(event_timestamp = header.timestamp, "Webhook timestamp out of range");
            PaymentError::invalid_webhook("Invalid timestamp")
        })?;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::debug!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::debug!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature over "<timestamp>.<raw body>"
        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .map_err(|e| PaymentError::invalid_webhook(format!("Invalid secret: {}", e)))?;

        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison against every v1 entry
        let expected_bytes: &[u8] = expected.as_slice();
        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| bool::from(expected_bytes.ct_eq(provided.as_slice())));

        if !matched {
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert to domain types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::debug!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::debug!(
                event_id = %stripe_event.id,
                "Rejected test mode event in production"
            );
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in production",
            ));
        }

        let event_type = WebhookEventType::from_provider(&stripe_event.event_type);
        let data = self.extract_event_data(&stripe_event)?;

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
            livemode: stripe_event.livemode,
        })
    }

    /// Extract event data from Stripe event into domain format.
    fn extract_event_data(
        &self,
        event: &StripeWebhookEvent,
    ) -> Result<WebhookEventData, PaymentError> {
        if event.event_type.starts_with("payment_intent.") {
            let intent: StripePaymentIntent = serde_json::from_value(event.data.object.clone())
                .map_err(|e| {
                    PaymentError::invalid_webhook(format!("Invalid payment intent: {}", e))
                })?;

            return Ok(WebhookEventData::PaymentIntent {
                status: parse_intent_status(&intent.status),
                payment_intent_id: intent.id,
                object: intent.object,
                amount: intent.amount,
                currency: intent.currency,
                last_payment_error: intent.last_payment_error.and_then(|e| e.message),
            });
        }

        Ok(WebhookEventData::Raw {
            json: event.data.object.to_string(),
        })
    }

    /// Map a non-success Stripe response to a `PaymentError`.
    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<StripeErrorResponse>(&body)
            .map(|r| r.error)
            .unwrap_or_default();

        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            402 => PaymentErrorCode::CardDeclined,
            429 => PaymentErrorCode::RateLimitExceeded,
            400 | 404 => PaymentErrorCode::InvalidRequest,
            _ => PaymentErrorCode::ProviderError,
        };

        let message = detail
            .message
            .unwrap_or_else(|| format!("Stripe API error ({}): {}", status, body));

        let error = PaymentError::new(code, message);
        match detail.code {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }
}

fn parse_intent_status(status: &str) -> PaymentIntentStatus {
    serde_json::from_value(serde_json::Value::String(status.to_string()))
        .unwrap_or(PaymentIntentStatus::Unknown)
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let params = vec![
            ("amount", request.amount.value().to_string()),
            ("currency", request.currency.to_lowercase()),
            (
                "automatic_payment_methods[enabled]",
                request.automatic_payment_methods.to_string(),
            ),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .header("Stripe-Version", STRIPE_API_VERSION)
            .header(reqwest::header::USER_AGENT, APP_INFO)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error = Self::error_from_response(response).await;
            tracing::error!(
                code = %error.code,
                provider_code = ?error.provider_code,
                message = %error.message,
                "Stripe create_payment_intent failed"
            );
            return Err(error);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Stripe response is missing client_secret",
            )
        })?;

        tracing::info!(
            payment_intent_id = %intent.id,
            amount = intent.amount,
            currency = %intent.currency,
            "Payment intent created"
        );

        Ok(PaymentIntent {
            status: parse_intent_status(&intent.status),
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::debug!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        self.verify_signature(payload, &header)?;

        // 3. Parse and convert event
        let webhook_event = self.parse_event(payload)?;

        tracing::debug!(
            event_id = %webhook_event.id,
            event_type = %webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}
