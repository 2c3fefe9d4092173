#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{keccak256, Address, Bytes};
use async_trait::async_trait;
use sessionkit_sdk::core::connection::ChainReader;
use sessionkit_sdk::core::signer::AccountSigner;
use sessionkit_sdk::{ProviderKind, SessionKitError, SignerCapability};

/// In-memory chain: bytecode and nonces by address, with an optional
/// transport failure mode.
pub struct MockChainReader {
    bytecode: HashMap<Address, Bytes>,
    nonces: HashMap<Address, u64>,
    fail: bool,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self {
            bytecode: HashMap::new(),
            nonces: HashMap::new(),
            fail: false,
        }
    }

    /// A reader whose every call fails at the transport layer.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_bytecode(mut self, address: Address, bytecode: Bytes) -> Self {
        self.bytecode.insert(address, bytecode);
        self
    }

    pub fn with_nonce(mut self, address: Address, nonce: u64) -> Self {
        self.nonces.insert(address, nonce);
        self
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn get_bytecode(
        &self,
        address: Address,
    ) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
        if self.fail {
            return Err("rpc endpoint unreachable".into());
        }
        Ok(self.bytecode.get(&address).cloned().unwrap_or_default())
    }

    async fn get_nonce(
        &self,
        address: Address,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        if self.fail {
            return Err("rpc endpoint unreachable".into());
        }
        Ok(self.nonces.get(&address).copied().unwrap_or_default())
    }
}

/// Signer with a fixed address; signatures are a keyed digest of the payload
/// so tests can recompute them.
pub struct StubSigner {
    pub address: Address,
}

impl StubSigner {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

#[async_trait]
impl AccountSigner for StubSigner {
    fn address(&self) -> Result<Address, SessionKitError> {
        Ok(self.address)
    }

    async fn sign_message(&self, payload: &[u8]) -> Result<Bytes, SessionKitError> {
        let mut preimage = self.address.to_vec();
        preimage.extend_from_slice(payload);
        Ok(keccak256(preimage).to_vec().into())
    }
}

/// Signer whose provider cannot resolve an account.
pub struct UnavailableSigner;

#[async_trait]
impl AccountSigner for UnavailableSigner {
    fn address(&self) -> Result<Address, SessionKitError> {
        Err(SessionKitError::SignerUnavailable(
            "provider returned no accounts".to_string(),
        ))
    }

    async fn sign_message(&self, _payload: &[u8]) -> Result<Bytes, SessionKitError> {
        Err(SessionKitError::SignerUnavailable(
            "provider returned no accounts".to_string(),
        ))
    }
}

/// Owner capability backed by a stub signer on the embedded provider.
pub fn embedded_owner(address: Address) -> SignerCapability {
    SignerCapability::new(ProviderKind::Embedded, Arc::new(StubSigner::new(address)))
}
