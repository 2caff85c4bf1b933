//! Contract reader port for on-chain price lookups.
//!
//! The checkout price is whatever the sale contract reports from its
//! `currentPrice()` accessor at request time.

use async_trait::async_trait;
use thiserror::Error;

/// Port for reading the current price from the sale contract.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Read the contract's current price, decoded to the native unit (ETH).
    async fn current_price(&self) -> Result<f64, ContractReadError>;
}

/// Errors from contract reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractReadError {
    /// Transport or RPC failure talking to the node.
    #[error("RPC call failed: {0}")]
    Rpc(String),

    /// The node answered but the value could not be decoded.
    #[error("Failed to decode contract value: {0}")]
    Decode(String),
}
