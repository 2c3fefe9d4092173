// Example: Approving a scoped session key
//
// This example demonstrates how to:
// 1. Register the owner's signer in the capability registry
// 2. Build a scoped-call policy for a swap router
// 3. Approve a session key and print the portable credential

use std::sync::Arc;

use alloy_primitives::{address, keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use sessionkit_sdk::{
    AccountSigner, ApproveSessionBuilder, CapabilityRegistry, ChainProfile, ChainReader,
    PolicySetBuilder, ProviderKind, ScopedCallBuilder, SignerCapability,
};

/// Chain stub: every account reads as counterfactual.
struct OfflineReader;

#[async_trait]
impl ChainReader for OfflineReader {
    async fn get_bytecode(
        &self,
        _address: Address,
    ) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Bytes::new())
    }

    async fn get_nonce(
        &self,
        _address: Address,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        Ok(0)
    }
}

/// Demo signer with a fixed address and a stand-in signature scheme.
struct DemoSigner {
    address: Address,
}

#[async_trait]
impl AccountSigner for DemoSigner {
    fn address(&self) -> sessionkit_sdk::Result<Address> {
        Ok(self.address)
    }

    async fn sign_message(&self, payload: &[u8]) -> sessionkit_sdk::Result<Bytes> {
        Ok(keccak256(payload).to_vec().into())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Register the owner's signer
    let owner = DemoSigner {
        address: address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
    };
    let mut registry = CapabilityRegistry::new();
    registry.register(SignerCapability::new(
        ProviderKind::Embedded,
        Arc::new(owner),
    ));

    // 2. Scope: swaps on the router, up to 1 ETH of value per call
    let router = address!("1111111254eeb25477b68fb85ed929f73a960582");
    let swap = ScopedCallBuilder::new()
        .with_target(router)
        .with_signature("swap(address,uint256,bytes)")
        .with_value_limit(U256::from(1_000_000_000_000_000_000u64))
        .build()?;
    let policies = PolicySetBuilder::new().policy(swap).build()?;

    // 3. Approve the session key against the counterfactual account
    let session_key = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
    let approval = ApproveSessionBuilder::from_registry(&registry, ProviderKind::Embedded)?
        .with_session_key(session_key)
        .with_profile(ChainProfile::sepolia())
        .with_policies(policies)
        .approve(&OfflineReader)
        .await?;

    println!("Approved session key {session_key}:");
    println!("  Account: {}", approval.account.address());
    println!("  Policies: {}", approval.credential.policies.len());
    println!("  Credential blob: {}", approval.blob);

    Ok(())
}
