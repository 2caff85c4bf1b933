//! On-chain adapters implementing `ContractReader`.
//!
//! - `AlloyContractReader` calls `currentPrice()` over JSON-RPC
//! - `MockContractReader` returns canned values for tests

mod alloy_reader;
mod mock_reader;

pub use alloy_reader::{wei_to_native, AlloyContractReader, SaleContract};
pub use mock_reader::MockContractReader;
