use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;

use crate::core::signer::AccountSigner;
use crate::error::{Result, SessionKitError};

/// Kind of wallet provider backing a signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// In-app embedded wallet
    Embedded,
    /// Browser-injected wallet extension
    Injected,
    /// WalletConnect-relayed remote wallet
    WalletConnect,
    /// Hardware-backed signer
    Hardware,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Embedded => "embedded",
            ProviderKind::Injected => "injected",
            ProviderKind::WalletConnect => "walletconnect",
            ProviderKind::Hardware => "hardware",
        };
        f.write_str(name)
    }
}

/// A signer paired with the provider kind it came from.
#[derive(Clone)]
pub struct SignerCapability {
    pub kind: ProviderKind,
    pub signer: Arc<dyn AccountSigner>,
}

impl SignerCapability {
    pub fn new(kind: ProviderKind, signer: Arc<dyn AccountSigner>) -> Self {
        Self { kind, signer }
    }

    /// The backing signer's address.
    pub fn address(&self) -> Result<Address> {
        self.signer.address()
    }
}

impl fmt::Debug for SignerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerCapability")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Runtime collection of the signers available to the application.
#[derive(Debug, Default)]
pub struct CapabilityRegistry {
    capabilities: Vec<SignerCapability>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a signer capability.
    pub fn register(&mut self, capability: SignerCapability) {
        self.capabilities.push(capability);
    }

    /// First registered capability of the given kind, registration order wins.
    pub fn select(&self, kind: ProviderKind) -> Option<&SignerCapability> {
        self.capabilities.iter().find(|c| c.kind == kind)
    }

    /// Like [`Self::select`], but a missing kind is an error.
    pub fn require(&self, kind: ProviderKind) -> Result<&SignerCapability> {
        self.select(kind)
            .ok_or(SessionKitError::NoCompatibleSigner(kind))
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
