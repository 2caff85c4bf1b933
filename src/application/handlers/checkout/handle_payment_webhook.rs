//! HandlePaymentWebhookHandler - Command handler for processing payment provider webhooks.

use std::sync::Arc;

use crate::ports::{PaymentError, PaymentProvider, WebhookEventData, WebhookEventType};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
    /// Webhook signature header.
    pub signature: String,
}

/// Branch taken for a verified webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// `payment_intent.succeeded`: funds captured.
    PaymentCaptured,
    /// `payment_intent.payment_failed`.
    PaymentFailed,
    /// Any other event type.
    Ignored,
}

/// Handler for processing payment provider webhooks.
///
/// Verifies the signature, then logs according to the event type. Nothing
/// is persisted.
pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, PaymentError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook signature verification failed");
                e
            })?;

        if let WebhookEventData::PaymentIntent { object, status, .. } = &event.data {
            tracing::info!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Webhook received: {} {}",
                object,
                status
            );
        }

        // 2. Branch on event type
        let outcome = match event.event_type {
            WebhookEventType::PaymentIntentSucceeded => {
                tracing::info!(event_id = %event.id, "Payment captured!");
                WebhookOutcome::PaymentCaptured
            }
            WebhookEventType::PaymentIntentPaymentFailed => {
                tracing::info!(event_id = %event.id, "Payment failed.");
                WebhookOutcome::PaymentFailed
            }
            WebhookEventType::Unknown(ref event_type) => {
                tracing::debug!(event_id = %event.id, event_type = %event_type, "Ignoring webhook event");
                WebhookOutcome::Ignored
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::ports::{PaymentErrorCode, PaymentIntentStatus};

    fn command(payload: &str) -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            payload: payload.as_bytes().to_vec(),
            signature: "t=1,v1=00".to_string(),
        }
    }

    #[tokio::test]
    async fn succeeded_event_is_captured() {
        let mock = MockPaymentProvider::new();
        mock.set_webhook_event(MockPaymentProvider::payment_intent_event(
            WebhookEventType::PaymentIntentSucceeded,
            "pi_1",
            PaymentIntentStatus::Succeeded,
        ));
        let handler = HandlePaymentWebhookHandler::new(Arc::new(mock));

        let outcome = handler.handle(command("{}")).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::PaymentCaptured);
    }

    #[tokio::test]
    async fn payment_failed_event_is_reported() {
        let mock = MockPaymentProvider::new();
        mock.set_webhook_event(MockPaymentProvider::payment_intent_event(
            WebhookEventType::PaymentIntentPaymentFailed,
            "pi_2",
            PaymentIntentStatus::RequiresPaymentMethod,
        ));
        let handler = HandlePaymentWebhookHandler::new(Arc::new(mock));

        let outcome = handler.handle(command("{}")).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::PaymentFailed);
    }

    #[tokio::test]
    async fn other_event_types_are_ignored() {
        let handler = HandlePaymentWebhookHandler::new(Arc::new(MockPaymentProvider::new()));

        let outcome = handler
            .handle(command(r#"{"id":"evt_3","type":"charge.refunded","created":1}"#))
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Ignored);
    }

    #[tokio::test]
    async fn verification_failure_is_returned() {
        let handler =
            HandlePaymentWebhookHandler::new(Arc::new(MockPaymentProvider::rejecting_webhooks()));

        let err = handler.handle(command("{}")).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }
}
