//! Composed account model: the derived descriptor plus its validator stack.
//!
//! Composition is pure and idempotent. `build` validates the whole stack and
//! either returns a complete [`ComposedAccount`] or an error; nothing partial
//! escapes.

use alloy_primitives::Address;

use crate::error::SessionStateError;
use crate::policy::{self, Policy};
use crate::version::{EntryPointVersion, KernelVersion};

/// Deterministically derived smart account identity.
///
/// Immutable once created. Two descriptors name the same account iff
/// `(owner, index, kernel_version)` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDescriptor {
    /// Counterfactual account address.
    pub address: Address,

    /// Address identity of the owner capability.
    pub owner: Address,

    /// Caller-chosen account index under the owner.
    pub index: u64,

    /// Entry point revision the account binds to.
    pub entry_point: EntryPointVersion,

    /// Account implementation version.
    pub kernel_version: KernelVersion,
}

impl AccountDescriptor {
    pub fn new(
        address: Address,
        owner: Address,
        index: u64,
        entry_point: EntryPointVersion,
        kernel_version: KernelVersion,
    ) -> Self {
        Self {
            address,
            owner,
            index,
            entry_point,
            kernel_version,
        }
    }
}

/// Authority tier of a validator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorRole {
    /// Unconditional, full-authority validator.
    Sudo,
    /// Policy-gated validator.
    Regular,
}

/// Configuration of one validator module installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// On-chain validator module the slot points at.
    pub module: Address,

    /// Identity the module authenticates (owner or session key address).
    pub subject: Address,

    /// Policy set gating the slot. Empty for sudo.
    pub policies: Vec<Policy>,
}

impl ValidatorConfig {
    /// Sudo slot config: the owner, authenticated by an ECDSA validator
    /// module.
    pub fn owner_ecdsa(module: Address, owner: Address) -> Self {
        Self {
            module,
            subject: owner,
            policies: Vec::new(),
        }
    }

    /// Regular slot config: a session key gated by `policies`.
    pub fn permission(module: Address, session_key: Address, policies: Vec<Policy>) -> Self {
        Self {
            module,
            subject: session_key,
            policies,
        }
    }
}

/// One installed validator slot on a composed account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSlot {
    pub role: ValidatorRole,
    pub config: ValidatorConfig,
}

/// Which validator tiers a composition produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionStage {
    SudoOnly,
    SudoPlusRegular,
}

/// An account descriptor with its validated validator stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAccount {
    descriptor: AccountDescriptor,
    sudo: ValidatorSlot,
    regular: Option<ValidatorSlot>,
}

impl ComposedAccount {
    /// Start composing the validator stack for a descriptor.
    pub fn builder(descriptor: AccountDescriptor) -> ComposeBuilder {
        ComposeBuilder::new(descriptor)
    }

    /// Counterfactual account address.
    pub fn address(&self) -> Address {
        self.descriptor.address
    }

    pub fn descriptor(&self) -> &AccountDescriptor {
        &self.descriptor
    }

    pub fn sudo(&self) -> &ValidatorSlot {
        &self.sudo
    }

    pub fn regular(&self) -> Option<&ValidatorSlot> {
        self.regular.as_ref()
    }

    pub fn stage(&self) -> CompositionStage {
        if self.regular.is_some() {
            CompositionStage::SudoPlusRegular
        } else {
            CompositionStage::SudoOnly
        }
    }
}

/// Builder assembling the sudo/regular validator pair for an account.
#[derive(Debug, Clone)]
pub struct ComposeBuilder {
    descriptor: AccountDescriptor,
    sudo: Option<ValidatorConfig>,
    regular: Option<ValidatorConfig>,
}

impl ComposeBuilder {
    pub fn new(descriptor: AccountDescriptor) -> Self {
        Self {
            descriptor,
            sudo: None,
            regular: None,
        }
    }

    /// The mandatory unconditional validator.
    pub fn with_sudo(mut self, config: ValidatorConfig) -> Self {
        self.sudo = Some(config);
        self
    }

    /// The optional policy-gated validator.
    pub fn with_regular(mut self, config: ValidatorConfig) -> Self {
        self.regular = Some(config);
        self
    }

    /// Validate and assemble the stack.
    ///
    /// Requires an implementation version with a modular validator layout
    /// matching the descriptor's entry point, exactly one sudo validator
    /// without policies, and (when present) a regular validator with a
    /// well-formed non-empty policy set.
    pub fn build(self) -> Result<ComposedAccount, SessionStateError> {
        let kernel = self.descriptor.kernel_version;
        if !kernel.supports_modular_validators()
            || kernel.required_entry_point() != self.descriptor.entry_point
        {
            return Err(SessionStateError::UnsupportedImplementationVersion {
                kernel,
                entry_point: self.descriptor.entry_point,
            });
        }

        let sudo = self.sudo.ok_or(SessionStateError::MissingSudoValidator)?;
        if !sudo.policies.is_empty() {
            return Err(SessionStateError::InvalidPolicy(
                "sudo validator is unconditional and takes no policies".to_string(),
            ));
        }

        let regular = match self.regular {
            Some(config) => {
                policy::validate_policies(&config.policies)?;
                Some(ValidatorSlot {
                    role: ValidatorRole::Regular,
                    config,
                })
            }
            None => None,
        };

        Ok(ComposedAccount {
            descriptor: self.descriptor,
            sudo: ValidatorSlot {
                role: ValidatorRole::Sudo,
                config: sudo,
            },
            regular,
        })
    }
}
