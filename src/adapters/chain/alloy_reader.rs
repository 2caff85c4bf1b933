//! JSON-RPC contract reader built on alloy.

use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;

use crate::ports::{ContractReadError, ContractReader};

sol! {
    #[sol(rpc)]
    interface SaleContract {
        function currentPrice() external view returns (uint256);
    }
}

/// Reads the sale contract's price through an Ethereum JSON-RPC endpoint.
pub struct AlloyContractReader {
    provider: DynProvider,
    address: Address,
}

impl AlloyContractReader {
    /// Wrap an existing provider.
    pub fn new<P: Provider + 'static>(provider: P, address: Address) -> Self {
        Self {
            provider: provider.erased(),
            address,
        }
    }

    /// Build an HTTP provider for `rpc_url`.
    ///
    /// No request is made until the first read.
    pub fn connect(rpc_url: &str, address: Address) -> Result<Self, ContractReadError> {
        let url = rpc_url
            .parse()
            .map_err(|e| ContractReadError::Rpc(format!("invalid RPC URL: {e}")))?;
        let provider = ProviderBuilder::new().connect_http(url);
        Ok(Self::new(provider, address))
    }

    /// Address of the contract being read.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl ContractReader for AlloyContractReader {
    async fn current_price(&self) -> Result<f64, ContractReadError> {
        let contract = SaleContract::new(self.address, &self.provider);
        let wei = contract
            .currentPrice()
            .call()
            .await
            .map_err(|e| ContractReadError::Rpc(format!("currentPrice failed: {e}")))?;

        tracing::debug!(contract = %self.address, wei = %wei, "Read currentPrice");

        wei_to_native(wei)
    }
}

/// Convert a wei amount (18 decimals) to a floating-point ETH value.
pub fn wei_to_native(wei: U256) -> Result<f64, ContractReadError> {
    let formatted = format_ether(wei);
    formatted
        .parse::<f64>()
        .map_err(|e| ContractReadError::Decode(format!("{formatted}: {e}")))
}
