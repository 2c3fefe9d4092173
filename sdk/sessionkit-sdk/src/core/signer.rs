use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::error::{Result, SessionKitError};

/// Abstraction for an entity that holds a key and can sign payloads.
/// This allows the SDK to work with:
/// 1. Provider-backed signers (embedded wallets, injected extensions)
/// 2. Address-only identities (watch-only flows, pure derivation)
#[async_trait]
pub trait AccountSigner: Send + Sync {
    /// The signer's address.
    /// Returns Err when the backing provider cannot resolve an account.
    fn address(&self) -> Result<Address>;

    /// Sign an arbitrary payload.
    /// Not all signers support this (address-only identities do not).
    async fn sign_message(&self, payload: &[u8]) -> Result<Bytes>;
}

/// Identity that knows its address but holds no key material.
#[derive(Debug, Clone, Copy)]
pub struct AddressOnlySigner {
    address: Address,
}

impl AddressOnlySigner {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

#[async_trait]
impl AccountSigner for AddressOnlySigner {
    fn address(&self) -> Result<Address> {
        Ok(self.address)
    }

    async fn sign_message(&self, _payload: &[u8]) -> Result<Bytes> {
        Err(SessionKitError::SigningNotSupported)
    }
}
