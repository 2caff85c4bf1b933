//! Blockchain configuration (contract price source)

use std::str::FromStr;

use alloy::primitives::Address;
use serde::Deserialize;

use super::error::ValidationError;

/// Blockchain configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Network name (`mainnet`/`homestead`, `sepolia`, `holesky`)
    #[serde(default = "default_network")]
    pub network: String,

    /// Infura project id used to derive the RPC endpoint
    pub infura_id: Option<String>,

    /// Explicit JSON-RPC endpoint, takes precedence over `infura_id`
    pub rpc_url: Option<String>,

    /// Address of the contract exposing `currentPrice()`
    #[serde(default)]
    pub contract_address: String,
}

/// Supported Ethereum networks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Sepolia,
    Holesky,
}

impl Network {
    /// Infura subdomain for this network
    pub fn infura_subdomain(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Holesky => "holesky",
        }
    }

    /// Chain id reported by nodes on this network
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Sepolia => 11_155_111,
            Network::Holesky => 17_000,
        }
    }
}

impl FromStr for Network {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "homestead" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "holesky" => Ok(Network::Holesky),
            other => Err(ValidationError::UnsupportedNetwork(other.to_string())),
        }
    }
}

impl ChainConfig {
    /// Parsed network
    pub fn network(&self) -> Result<Network, ValidationError> {
        self.network.parse()
    }

    /// Parsed contract address
    pub fn contract_address(&self) -> Result<Address, ValidationError> {
        if self.contract_address.is_empty() {
            return Err(ValidationError::MissingRequired("CONTRACT_ADDRESS"));
        }
        Address::from_str(&self.contract_address)
            .map_err(|_| ValidationError::InvalidContractAddress(self.contract_address.clone()))
    }

    /// Resolve the JSON-RPC endpoint for the configured network
    pub fn rpc_url(&self) -> Result<String, ValidationError> {
        if let Some(url) = self.rpc_url.as_ref().filter(|u| !u.is_empty()) {
            return Ok(url.clone());
        }

        let network = self.network()?;
        match self.infura_id.as_ref().filter(|id| !id.is_empty()) {
            Some(id) => Ok(format!(
                "https://{}.infura.io/v3/{}",
                network.infura_subdomain(),
                id
            )),
            None => Err(ValidationError::MissingRequired("INFURA_ID")),
        }
    }

    /// Validate chain configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.network()?;
        self.contract_address()?;

        let url = self.rpc_url()?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("RPC_URL"));
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            infura_id: None,
            rpc_url: None,
            contract_address: String::new(),
        }
    }
}

fn default_network() -> String {
    "mainnet".to_string()
}
