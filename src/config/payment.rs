//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_secret_key: String,

    /// Stripe publishable key, handed to the checkout page
    pub stripe_publishable_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Stripe API base URL override
    pub stripe_api_base_url: Option<String>,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("stripe_secret_key", &"[REDACTED]")
            .field("stripe_publishable_key", &self.stripe_publishable_key)
            .field("stripe_webhook_secret", &"[REDACTED]")
            .field("stripe_api_base_url", &self.stripe_api_base_url)
            .finish()
    }
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_live_")
            && self.stripe_publishable_key.starts_with("pk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if self.stripe_publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_PUBLISHABLE_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.stripe_secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidStripePublishableKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        if let Some(url) = &self.stripe_api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("STRIPE_API_BASE_URL"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            stripe_secret_key: "sk_test_abcd1234".to_string(),
            stripe_publishable_key: "pk_test_abcd1234".to_string(),
            stripe_webhook_secret: "whsec_xyz789".to_string(),
            stripe_api_base_url: None,
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid_config();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_is_live_mode_requires_both_keys() {
        let config = PaymentConfig {
            stripe_secret_key: "sk_live_xxx".to_string(),
            ..valid_config()
        };
        assert!(!config.is_live_mode());

        let config = PaymentConfig {
            stripe_secret_key: "sk_live_xxx".to_string(),
            stripe_publishable_key: "pk_live_xxx".to_string(),
            ..valid_config()
        };
        assert!(config.is_live_mode());
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_secret_key() {
        let config = PaymentConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"))
        );
    }

    #[test]
    fn test_validation_missing_publishable_key() {
        let config = PaymentConfig {
            stripe_publishable_key: String::new(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STRIPE_PUBLISHABLE_KEY"))
        );
    }

    #[test]
    fn test_validation_invalid_secret_key_prefix() {
        let config = PaymentConfig {
            stripe_secret_key: "pk_test_xxx".to_string(), // Wrong prefix
            ..valid_config()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStripeKey));
    }

    #[test]
    fn test_validation_invalid_publishable_key_prefix() {
        let config = PaymentConfig {
            stripe_publishable_key: "sk_test_xxx".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidStripePublishableKey)
        );
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        let config = PaymentConfig {
            stripe_webhook_secret: "secret_xxx".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidStripeWebhookSecret)
        );
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let config = PaymentConfig {
            stripe_api_base_url: Some("api.stripe.com".to_string()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("sk_test_abcd1234"));
        assert!(!rendered.contains("whsec_xyz789"));
        assert!(rendered.contains("pk_test_abcd1234"));
    }
}
