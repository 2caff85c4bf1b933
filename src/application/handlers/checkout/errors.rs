//! Checkout error types.

use thiserror::Error;

use crate::domain::pricing::AmountError;
use crate::ports::{ContractReadError, PaymentError};

/// Errors from checkout operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// The fiat conversion was unavailable; no intent was created.
    #[error("Price is currently unavailable")]
    PriceUnavailable,

    /// The contract price could not be read.
    #[error("Failed to read contract price: {0}")]
    ContractRead(#[from] ContractReadError),

    /// The computed price is not a chargeable amount.
    #[error("Computed price is not chargeable: {0}")]
    InvalidAmount(#[from] AmountError),

    /// The payment processor rejected the request.
    #[error("{}", .0.message)]
    Payment(#[from] PaymentError),
}
