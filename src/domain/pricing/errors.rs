//! Pricing error types.

use thiserror::Error;

/// A fiat amount that cannot be charged.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AmountError {
    /// NaN or infinite amount.
    #[error("Amount is not a finite number: {0}")]
    NotFinite(f64),

    /// Zero or negative amount.
    #[error("Amount must be positive: {0}")]
    NotPositive(f64),

    /// Amount does not fit the processor's integer range.
    #[error("Amount is too large: {0}")]
    TooLarge(f64),
}
