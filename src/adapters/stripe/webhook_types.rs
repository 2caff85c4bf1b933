//! Stripe-specific wire types.
//!
//! These types represent Stripe API objects as they arrive in API responses
//! and webhook payloads, and the `Stripe-Signature` header format.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureParseError {
    /// Header is empty or missing.
    MissingHeader,
    /// Missing timestamp component (t=...).
    MissingTimestamp,
    /// Missing v1 signature component.
    MissingV1Signature,
    /// Invalid timestamp format.
    InvalidTimestamp,
    /// Invalid signature format (not valid hex).
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "Missing Stripe-Signature header"),
            Self::MissingTimestamp => write!(f, "Missing timestamp (t=) in signature"),
            Self::MissingV1Signature => write!(f, "Missing v1 signature in header"),
            Self::InvalidTimestamp => write!(f, "Invalid timestamp format"),
            Self::InvalidSignatureFormat => write!(f, "Invalid signature format (not valid hex)"),
        }
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed Stripe-Signature header components.
///
/// The header format is: `t=timestamp,v1=signature[,v1=signature...][,v0=legacy]`
///
/// Stripe sends one `v1` entry per active signing secret, so during secret
/// rotation several may be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe generated the event.
    pub timestamp: i64,

    /// v1 signatures (HMAC-SHA256), decoded from hex.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse a Stripe-Signature header into components.
    ///
    /// Unknown schemes (including `v0`) are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.trim().is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    let signature = hex::decode(value.trim())
                        .map_err(|_| SignatureParseError::InvalidSignatureFormat)?;
                    v1_signatures.push(signature);
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw Stripe webhook event as received from the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,

    /// Stripe API version used for this event.
    pub api_version: Option<String>,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Unique intent identifier (pi_...).
    pub id: String,

    /// Object type (always "payment_intent").
    pub object: String,

    /// Amount in the currency's smallest unit.
    pub amount: i64,

    /// Currency (lowercase).
    pub currency: String,

    /// Intent status (requires_payment_method, succeeded, ...).
    pub status: String,

    /// Client secret; present on create/retrieve with a secret key.
    pub client_secret: Option<String>,

    /// Error from the most recent payment attempt.
    pub last_payment_error: Option<StripeErrorDetail>,
}

/// Error envelope returned by the Stripe API on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorDetail,
}

/// Stripe error object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeErrorDetail {
    /// Error type (api_error, card_error, invalid_request_error, ...).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Short machine-readable code (e.g. "amount_too_small").
    pub code: Option<String>,

    /// Human-readable message.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_header() {
        let header = SignatureHeader::parse("t=1704067200,v1=abcd,v0=ef01").unwrap();
        assert_eq!(header.timestamp, 1704067200);
        assert_eq!(header.v1_signatures, vec![vec![0xab, 0xcd]]);
    }

    #[test]
    fn parse_collects_every_v1_signature() {
        let header = SignatureHeader::parse("t=1,v1=aa,v1=bb").unwrap();
        assert_eq!(header.v1_signatures, vec![vec![0xaa], vec![0xbb]]);
    }

    #[test]
    fn parse_tolerates_whitespace_and_unknown_fields() {
        let header = SignatureHeader::parse(" t=5 , v1=00ff , v9=zz, junk").unwrap();
        assert_eq!(header.timestamp, 5);
        assert_eq!(header.v1_signatures, vec![vec![0x00, 0xff]]);
    }

    #[test]
    fn parse_rejects_empty_header() {
        assert_eq!(
            SignatureHeader::parse(""),
            Err(SignatureParseError::MissingHeader)
        );
    }

    #[test]
    fn parse_rejects_missing_timestamp() {
        assert_eq!(
            SignatureHeader::parse("v1=abcd"),
            Err(SignatureParseError::MissingTimestamp)
        );
    }

    #[test]
    fn parse_rejects_missing_v1() {
        assert_eq!(
            SignatureHeader::parse("t=1704067200,v0=abcd"),
            Err(SignatureParseError::MissingV1Signature)
        );
    }

    #[test]
    fn parse_rejects_bad_timestamp_and_hex() {
        assert_eq!(
            SignatureHeader::parse("t=yesterday,v1=abcd"),
            Err(SignatureParseError::InvalidTimestamp)
        );
        assert_eq!(
            SignatureHeader::parse("t=1,v1=not-hex"),
            Err(SignatureParseError::InvalidSignatureFormat)
        );
    }

    #[test]
    fn deserialize_payment_intent() {
        let json = r#"{
            "id": "pi_123",
            "object": "payment_intent",
            "amount": 15000,
            "currency": "eur",
            "status": "requires_payment_method",
            "client_secret": "pi_123_secret_456",
            "last_payment_error": null
        }"#;

        let intent: StripePaymentIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.amount, 15000);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_456"));
    }

    #[test]
    fn deserialize_error_response() {
        let json = r#"{"error": {"type": "invalid_request_error", "code": "amount_too_small", "message": "Amount must be at least €0.50 eur"}}"#;
        let response: StripeErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.code.as_deref(), Some("amount_too_small"));
        assert_eq!(
            response.error.error_type.as_deref(),
            Some("invalid_request_error")
        );
    }
}
