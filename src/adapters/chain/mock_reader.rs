//! Mock contract reader for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{ContractReadError, ContractReader};

/// Contract reader returning a configurable price or error.
#[derive(Clone)]
pub struct MockContractReader {
    result: Arc<Mutex<Result<f64, ContractReadError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockContractReader {
    /// Reader that reports `price` ETH.
    pub fn with_price(price: f64) -> Self {
        Self {
            result: Arc::new(Mutex::new(Ok(price))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reader whose every call fails with `error`.
    pub fn failing(error: ContractReadError) -> Self {
        Self {
            result: Arc::new(Mutex::new(Err(error))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Change the price returned by subsequent calls.
    pub fn set_price(&self, price: f64) {
        *self.result.lock().unwrap() = Ok(price);
    }

    /// Number of `current_price` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractReader for MockContractReader {
    async fn current_price(&self) -> Result<f64, ContractReadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_price_and_counts_calls() {
        let reader = MockContractReader::with_price(0.05);

        assert_eq!(reader.current_price().await.unwrap(), 0.05);
        reader.set_price(0.1);
        assert_eq!(reader.current_price().await.unwrap(), 0.1);
        assert_eq!(reader.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_reader_returns_error() {
        let reader = MockContractReader::failing(ContractReadError::Rpc("down".to_string()));
        assert!(reader.current_price().await.is_err());
    }
}
