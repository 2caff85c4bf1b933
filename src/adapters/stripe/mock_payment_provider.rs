//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking
//! - Webhook event simulation

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CreatePaymentIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus,
    PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Inject errors
/// mock.set_error(PaymentError::invalid_request("Amount too small"));
///
/// // Use in tests
/// let result = mock.create_payment_intent(request).await;
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Next payment intent to return.
    next_intent: Option<PaymentIntent>,

    /// Next webhook event to return.
    next_webhook_event: Option<WebhookEvent>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Requests received by `create_payment_intent`.
    intent_requests: Vec<CreatePaymentIntentRequest>,

    /// Webhook verification behavior.
    webhook_verify_mode: WebhookVerifyMode,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

/// How to handle webhook verification.
#[derive(Default, Clone)]
enum WebhookVerifyMode {
    /// Accept any payload and return configured event.
    #[default]
    AcceptAll,

    /// Always fail verification.
    AlwaysFail,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().webhook_verify_mode = WebhookVerifyMode::AlwaysFail;
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the intent to return on next `create_payment_intent` call.
    pub fn set_payment_intent(&self, intent: PaymentIntent) {
        self.inner.lock().unwrap().next_intent = Some(intent);
    }

    /// Set the event to return from `verify_webhook`.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Requests passed to `create_payment_intent`, oldest first.
    pub fn intent_requests(&self) -> Vec<CreatePaymentIntentRequest> {
        self.inner.lock().unwrap().intent_requests.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.record_call(
            "create_payment_intent",
            vec![request.amount.to_string(), request.currency.clone()],
        );
        self.check_error("create_payment_intent")?;

        let mut state = self.inner.lock().unwrap();
        state.intent_requests.push(request.clone());

        if let Some(intent) = state.next_intent.take() {
            return Ok(intent);
        }

        let id = format!("pi_mock_{}", state.intent_requests.len());
        Ok(PaymentIntent {
            client_secret: format!("{}_secret_mock", id),
            id,
            amount: request.amount.value(),
            currency: request.currency,
            status: PaymentIntentStatus::RequiresPaymentMethod,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call(
            "verify_webhook",
            vec![
                String::from_utf8_lossy(payload).chars().take(50).collect(),
                signature.chars().take(20).collect(),
            ],
        );
        self.check_error("verify_webhook")?;

        let state = self.inner.lock().unwrap();

        if let WebhookVerifyMode::AlwaysFail = state.webhook_verify_mode {
            return Err(PaymentError::invalid_webhook("Verification disabled"));
        }

        // Return configured event or parse from payload
        if let Some(event) = &state.next_webhook_event {
            return Ok(event.clone());
        }

        let parsed: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        let id = parsed["id"].as_str().unwrap_or("evt_mock").to_string();
        let event_type = parsed["type"].as_str().unwrap_or("unknown");
        let created = parsed["created"]
            .as_i64()
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        let livemode = parsed["livemode"].as_bool().unwrap_or(false);

        Ok(WebhookEvent {
            id,
            event_type: WebhookEventType::from_provider(event_type),
            data: WebhookEventData::Raw {
                json: String::from_utf8_lossy(payload).to_string(),
            },
            created_at: created,
            livemode,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test Helpers
// ════════════════════════════════════════════════════════════════════════════════

impl MockPaymentProvider {
    /// Create a webhook event for a payment intent.
    pub fn payment_intent_event(
        event_type: WebhookEventType,
        payment_intent_id: &str,
        status: PaymentIntentStatus,
    ) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_{}", payment_intent_id),
            event_type,
            data: WebhookEventData::PaymentIntent {
                payment_intent_id: payment_intent_id.to_string(),
                object: "payment_intent".to_string(),
                status,
                amount: 15000,
                currency: "eur".to_string(),
                last_payment_error: None,
            },
            created_at: chrono::Utc::now().timestamp(),
            livemode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::MinorUnits;
    use crate::ports::PaymentErrorCode;

    fn request(amount: i64) -> CreatePaymentIntentRequest {
        CreatePaymentIntentRequest::new(MinorUnits::new(amount).unwrap(), "eur")
    }

    #[tokio::test]
    async fn create_payment_intent_echoes_amount() {
        let mock = MockPaymentProvider::new();

        let intent = mock.create_payment_intent(request(15000)).await.unwrap();

        assert_eq!(intent.amount, 15000);
        assert_eq!(intent.currency, "eur");
        assert!(intent.client_secret.starts_with("pi_mock_1"));
    }

    #[tokio::test]
    async fn set_payment_intent_returns_configured() {
        let mock = MockPaymentProvider::new();
        mock.set_payment_intent(PaymentIntent {
            id: "pi_custom".to_string(),
            client_secret: "pi_custom_secret".to_string(),
            amount: 42,
            currency: "eur".to_string(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
        });

        let intent = mock.create_payment_intent(request(100)).await.unwrap();
        assert_eq!(intent.id, "pi_custom");
    }

    #[tokio::test]
    async fn set_error_returns_error_once() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::invalid_request("Amount too small"));

        let err = mock.create_payment_intent(request(1)).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);

        assert!(mock.create_payment_intent(request(1)).await.is_ok());
    }

    #[tokio::test]
    async fn set_method_error_only_affects_method() {
        let mock = MockPaymentProvider::new();
        mock.set_method_error("verify_webhook", PaymentError::invalid_webhook("bad"));

        assert!(mock.create_payment_intent(request(100)).await.is_ok());
        assert!(mock.verify_webhook(b"{}", "sig").await.is_err());

        mock.clear_errors();
        assert!(mock.verify_webhook(b"{}", "sig").await.is_ok());
    }

    #[tokio::test]
    async fn tracks_method_calls_and_requests() {
        let mock = MockPaymentProvider::new();

        mock.create_payment_intent(request(100)).await.unwrap();
        mock.create_payment_intent(request(200)).await.unwrap();

        assert!(mock.was_called("create_payment_intent"));
        assert_eq!(mock.call_count("create_payment_intent"), 2);
        assert!(!mock.was_called("verify_webhook"));
        assert_eq!(mock.calls()[1].args, vec!["200", "eur"]);
        assert_eq!(mock.intent_requests()[0].amount.value(), 100);
    }

    #[tokio::test]
    async fn verify_webhook_returns_configured_event() {
        let mock = MockPaymentProvider::new();
        let event = MockPaymentProvider::payment_intent_event(
            WebhookEventType::PaymentIntentSucceeded,
            "pi_1",
            PaymentIntentStatus::Succeeded,
        );
        mock.set_webhook_event(event.clone());

        let result = mock.verify_webhook(b"ignored", "sig").await.unwrap();
        assert_eq!(result, event);
    }

    #[tokio::test]
    async fn verify_webhook_parses_payload_when_no_event_set() {
        let mock = MockPaymentProvider::new();
        let payload = br#"{"id":"evt_1","type":"payment_intent.payment_failed","created":1}"#;

        let event = mock.verify_webhook(payload, "sig").await.unwrap();

        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::PaymentIntentPaymentFailed);
        assert_eq!(event.created_at, 1);
    }

    #[tokio::test]
    async fn rejecting_webhooks_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();

        let err = mock.verify_webhook(b"{}", "sig").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }
}
