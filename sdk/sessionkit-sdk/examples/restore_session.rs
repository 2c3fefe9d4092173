// Example: Restoring a session and signing an in-scope action
//
// This example demonstrates how to:
// 1. Approve a session key with a scoped-call grant
// 2. Restore the session from the credential blob alone
// 3. Sign an in-scope action and watch an out-of-scope one get refused

use std::sync::Arc;

use alloy_primitives::{address, keccak256, Address, Bytes, U256};
use async_trait::async_trait;
use sessionkit_sdk::state::ProposedAction;
use sessionkit_sdk::utils::function_selector;
use sessionkit_sdk::{
    AccountSigner, ApproveSessionBuilder, ChainProfile, ChainReader, PolicySetBuilder,
    ProviderKind, ScopedCallBuilder, SessionAccount, SignerCapability,
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
    let profile = ChainProfile::sepolia();
    let router = address!("1111111254eeb25477b68fb85ed929f73a960582");
    let session_key = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

    // 1. The owner approves a swap-only session
    let owner = SignerCapability::new(
        ProviderKind::Embedded,
        Arc::new(DemoSigner {
            address: address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
        }),
    );
    let swap = ScopedCallBuilder::new()
        .with_target(router)
        .with_signature("swap(address,uint256,bytes)")
        .with_value_limit(U256::from(1_000_000_000_000_000_000u64))
        .build()?;
    let approval = ApproveSessionBuilder::new()
        .with_owner(owner)
        .with_session_key(session_key)
        .with_profile(profile)
        .with_policies(PolicySetBuilder::new().policy(swap).build()?)
        .approve(&OfflineReader)
        .await?;

    // 2. Later, a holder of the session key restores from the blob
    let session_signer = Arc::new(DemoSigner {
        address: session_key,
    });
    let session = SessionAccount::restore(&approval.blob, session_signer)?;

    println!("Restored session for account {}", session.address());

    // 3. An in-scope swap signs; a token transfer does not
    let swap_action = ProposedAction {
        target: router,
        value: U256::from(250_000_000_000_000_000u64),
        selector: function_selector("swap(address,uint256,bytes)"),
        arguments: Vec::new(),
    };
    println!("  Swap verdict: {:?}", session.evaluate(&swap_action));

    let signed = session.sign_action(&swap_action, &profile).await?;
    println!("  Signed digest: {}", signed.digest);
    println!("  Signature: {}", signed.signature);

    let transfer_action = ProposedAction {
        target: address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
        value: U256::ZERO,
        selector: function_selector("transfer(address,uint256)"),
        arguments: Vec::new(),
    };
    match session.sign_action(&transfer_action, &profile).await {
        Err(refusal) => println!("  Transfer refused: {refusal}"),
        Ok(_) => println!("  Transfer unexpectedly signed"),
    }

    Ok(())
}
