use std::sync::Arc;

use alloy_primitives::{address, Address, Bytes};
use sessionkit_sdk::core::constants::ECDSA_VALIDATOR;
use sessionkit_sdk::state::{CompositionStage, EntryPointVersion, KernelVersion};
use sessionkit_sdk::{
    compute_account_address, AccountSigner, AddressOnlySigner, CapabilityRegistry,
    DeploymentStatus, ProviderKind, SessionKitError, SignerCapability, SmartAccount,
    SmartAccountBuilder, Strategy,
};

mod common;
use common::{embedded_owner, MockChainReader, StubSigner, UnavailableSigner};

const OWNER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

//=============================================================================
// Counterfactual Derivation
//=============================================================================

#[test]
fn test_derivation_is_deterministic() {
    let first = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    let second = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    assert_eq!(first, second);
}

#[test]
fn test_indexes_separate_accounts() {
    let primary = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    let secondary = compute_account_address(
        OWNER,
        1,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    assert_ne!(primary, secondary);
}

#[test]
fn test_kernel_versions_separate_accounts() {
    let current = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    let previous = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_0,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    assert_ne!(current, previous);
}

//=============================================================================
// Account Connection
//=============================================================================

#[tokio::test]
async fn test_connect_composes_sudo_only() {
    let account = SmartAccount::connect()
        .with_owner(embedded_owner(OWNER))
        .connect(&MockChainReader::new())
        .await
        .unwrap();

    assert_eq!(account.composed.stage(), CompositionStage::SudoOnly);
    assert_eq!(account.composed.sudo().config.module, ECDSA_VALIDATOR);
    assert_eq!(account.descriptor().owner, OWNER);
    assert_eq!(
        account.address(),
        compute_account_address(
            OWNER,
            0,
            KernelVersion::V3_1,
            EntryPointVersion::V0_7,
            ECDSA_VALIDATOR
        )
    );
}

#[tokio::test]
async fn test_connect_via_registry() {
    let mut registry = CapabilityRegistry::new();
    registry.register(embedded_owner(OWNER));

    let account = SmartAccountBuilder::from_registry(&registry, ProviderKind::Embedded)
        .unwrap()
        .with_strategy(Strategy::new(5))
        .connect(&MockChainReader::new())
        .await
        .unwrap();

    assert_eq!(account.descriptor().index, 5);
    assert_eq!(
        account.address(),
        compute_account_address(
            OWNER,
            5,
            KernelVersion::V3_1,
            EntryPointVersion::V0_7,
            ECDSA_VALIDATOR
        )
    );
}

#[tokio::test]
async fn test_connect_requires_an_owner() {
    let err = SmartAccount::connect()
        .connect(&MockChainReader::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionKitError::MissingParameter("owner")));
}

#[tokio::test]
async fn test_unresolvable_owner_is_reported() {
    let capability = SignerCapability::new(ProviderKind::Injected, Arc::new(UnavailableSigner));
    let err = SmartAccount::connect()
        .with_owner(capability)
        .connect(&MockChainReader::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionKitError::SignerUnavailable(_)));
}

#[tokio::test]
async fn test_probe_failure_is_a_provider_error() {
    let err = SmartAccount::connect()
        .with_owner(embedded_owner(OWNER))
        .connect(&MockChainReader::failing())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionKitError::ProviderError(_)));
}

#[tokio::test]
async fn test_deployment_status_follows_bytecode() {
    let expected = compute_account_address(
        OWNER,
        0,
        KernelVersion::V3_1,
        EntryPointVersion::V0_7,
        ECDSA_VALIDATOR,
    );
    let deployed_reader = MockChainReader::new()
        .with_bytecode(expected, Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]))
        .with_nonce(expected, 7);

    let account = SmartAccount::connect()
        .with_owner(embedded_owner(OWNER))
        .connect(&deployed_reader)
        .await
        .unwrap();
    assert_eq!(
        account.deployment_status(&deployed_reader).await.unwrap(),
        DeploymentStatus::Deployed
    );
    assert_eq!(account.nonce(&deployed_reader).await.unwrap(), 7);

    let fresh_reader = MockChainReader::new();
    assert_eq!(
        account.deployment_status(&fresh_reader).await.unwrap(),
        DeploymentStatus::Counterfactual
    );
    assert_eq!(account.nonce(&fresh_reader).await.unwrap(), 0);
}

//=============================================================================
// Capability Registry & Signers
//=============================================================================

#[test]
fn test_registry_selects_by_kind() {
    let mut registry = CapabilityRegistry::new();
    assert!(registry.is_empty());

    registry.register(embedded_owner(OWNER));
    registry.register(SignerCapability::new(
        ProviderKind::Injected,
        Arc::new(StubSigner::new(address!(
            "70997970c51812dc3a010c7d01b50e0d17dc79c8"
        ))),
    ));
    registry.register(embedded_owner(address!(
        "3c44cdddb6a900fa2b585dd299e03d12fa4293bc"
    )));
    assert_eq!(registry.len(), 3);

    // First registration of a kind wins
    let selected = registry.select(ProviderKind::Embedded).unwrap();
    assert_eq!(selected.address().unwrap(), OWNER);

    let err = registry.require(ProviderKind::Hardware).unwrap_err();
    assert!(matches!(
        err,
        SessionKitError::NoCompatibleSigner(ProviderKind::Hardware)
    ));
}

#[tokio::test]
async fn test_address_only_identity_cannot_sign() {
    let signer = AddressOnlySigner::new(OWNER);
    assert_eq!(signer.address().unwrap(), OWNER);

    let err = signer.sign_message(b"digest").await.unwrap_err();
    assert!(matches!(err, SessionKitError::SigningNotSupported));

    // Watch-only connection still derives and composes
    let capability = SignerCapability::new(ProviderKind::Injected, Arc::new(signer));
    let account = SmartAccount::connect()
        .with_owner(capability)
        .connect(&MockChainReader::new())
        .await
        .unwrap();
    assert_eq!(account.descriptor().owner, OWNER);
}
