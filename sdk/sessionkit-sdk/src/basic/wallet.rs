use tracing::debug;

use crate::basic::actions::ApproveSessionBuilder;
use crate::core::connection::ChainReader;
use crate::core::constants;
use crate::core::registry::{CapabilityRegistry, ProviderKind, SignerCapability};
use crate::error::{Result, SessionKitError};
use crate::types::{ChainProfile, DeploymentStatus, Strategy};
use crate::utils;
use alloy_primitives::Address;
use sessionkit_state::{AccountDescriptor, ComposedAccount, ValidatorConfig};

/// Resolve the owner's signer and derive its counterfactual account.
///
/// Probes the chain for bytecode at the derived address. The probe
/// tolerates an empty result (the account may not be deployed) but
/// surfaces transport failures.
pub async fn derive_account(
    owner: &SignerCapability,
    index: u64,
    profile: &ChainProfile,
    reader: &impl ChainReader,
) -> Result<AccountDescriptor> {
    let owner_address = owner.address()?;
    let address = utils::compute_account_address(
        owner_address,
        index,
        profile.kernel_version,
        profile.entry_point,
        constants::ECDSA_VALIDATOR,
    );

    let bytecode = reader
        .get_bytecode(address)
        .await
        .map_err(|e| SessionKitError::ProviderError(e.to_string()))?;
    debug!(
        account = %address,
        owner = %owner_address,
        index,
        deployed = !bytecode.is_empty(),
        "derived smart account"
    );

    Ok(AccountDescriptor::new(
        address,
        owner_address,
        index,
        profile.entry_point,
        profile.kernel_version,
    ))
}

/// An owner-controlled smart account, deployed or counterfactual.
#[derive(Debug, Clone)]
pub struct SmartAccount {
    /// Account address plus its validator composition
    pub composed: ComposedAccount,

    /// Owner capability the account was connected with
    pub owner: SignerCapability,

    /// Chain and contract stack the account lives on
    pub profile: ChainProfile,

    /// Derivation strategy used for the address
    pub strategy: Strategy,
}

impl SmartAccount {
    /// Start connecting an account.
    pub fn connect() -> SmartAccountBuilder {
        SmartAccountBuilder::new()
    }

    /// The account address.
    pub fn address(&self) -> Address {
        self.composed.address()
    }

    pub fn descriptor(&self) -> &AccountDescriptor {
        self.composed.descriptor()
    }

    /// Whether the account contract exists on-chain yet.
    pub async fn deployment_status(
        &self,
        reader: &impl ChainReader,
    ) -> Result<DeploymentStatus> {
        let bytecode = reader
            .get_bytecode(self.address())
            .await
            .map_err(|e| SessionKitError::ProviderError(e.to_string()))?;
        Ok(if bytecode.is_empty() {
            DeploymentStatus::Counterfactual
        } else {
            DeploymentStatus::Deployed
        })
    }

    /// Current account nonce. Zero for counterfactual accounts.
    pub async fn nonce(&self, reader: &impl ChainReader) -> Result<u64> {
        reader
            .get_nonce(self.address())
            .await
            .map_err(|e| SessionKitError::ProviderError(e.to_string()))
    }

    /// Start approving a session key for this account.
    pub fn approve_session(&self) -> ApproveSessionBuilder {
        ApproveSessionBuilder::new()
            .with_owner(self.owner.clone())
            .with_strategy(self.strategy)
            .with_profile(self.profile)
    }
}

/// Builder for connecting a [`SmartAccount`].
#[derive(Debug, Clone, Default)]
pub struct SmartAccountBuilder {
    owner: Option<SignerCapability>,
    strategy: Strategy,
    profile: ChainProfile,
}

impl SmartAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the owner from a registry lookup.
    pub fn from_registry(registry: &CapabilityRegistry, kind: ProviderKind) -> Result<Self> {
        let owner = registry.require(kind)?.clone();
        Ok(Self::new().with_owner(owner))
    }

    pub fn with_owner(mut self, owner: SignerCapability) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_profile(mut self, profile: ChainProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Derive the account and compose it with its sudo validator.
    pub async fn connect(self, reader: &impl ChainReader) -> Result<SmartAccount> {
        let owner = self.owner.ok_or(SessionKitError::MissingParameter("owner"))?;
        let descriptor = derive_account(&owner, self.strategy.key, &self.profile, reader).await?;

        let composed = ComposedAccount::builder(descriptor)
            .with_sudo(ValidatorConfig::owner_ecdsa(
                constants::ECDSA_VALIDATOR,
                owner.address()?,
            ))
            .build()?;

        Ok(SmartAccount {
            composed,
            owner,
            profile: self.profile,
            strategy: self.strategy,
        })
    }
}
