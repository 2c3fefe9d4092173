use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use std::error::Error;

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Bytecode at `address`. Empty when the account is counterfactual.
    async fn get_bytecode(&self, address: Address)
        -> Result<Bytes, Box<dyn Error + Send + Sync>>;

    async fn get_nonce(&self, address: Address) -> Result<u64, Box<dyn Error + Send + Sync>>;
}
