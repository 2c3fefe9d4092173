use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use sessionkit_state::{EntryPointVersion, KernelVersion, ProposedAction};

/// Account derivation strategy.
///
/// The key feeds the counterfactual salt, so distinct keys yield distinct
/// account addresses for the same owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strategy {
    /// Derivation index, 0 is the owner's primary account
    pub key: u64,
}

impl Strategy {
    pub fn new(key: u64) -> Self {
        Self { key }
    }
}

/// The chain and contract stack an account is derived against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainProfile {
    /// EIP-155 chain ID, bound into action digests
    pub chain_id: u64,

    /// EntryPoint revision the account validates through
    pub entry_point: EntryPointVersion,

    /// Kernel implementation the factory deploys
    pub kernel_version: KernelVersion,
}

impl ChainProfile {
    pub fn new(
        chain_id: u64,
        entry_point: EntryPointVersion,
        kernel_version: KernelVersion,
    ) -> Self {
        Self {
            chain_id,
            entry_point,
            kernel_version,
        }
    }

    /// Sepolia testnet on the current Kernel stack
    pub fn sepolia() -> Self {
        Self::new(11_155_111, EntryPointVersion::V0_7, KernelVersion::V3_1)
    }
}

impl Default for ChainProfile {
    fn default() -> Self {
        Self::new(1, EntryPointVersion::V0_7, KernelVersion::V3_1)
    }
}

/// Whether the account contract exists on-chain yet.
///
/// A counterfactual account has a fixed address and can receive funds and
/// session approvals before any deployment transaction runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// Address is derived but carries no bytecode
    Counterfactual,

    /// Account contract is live at the address
    Deployed,
}

/// An action authorized by a session key, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedAction {
    /// Account the action executes from
    pub account: Address,

    /// The approved call
    pub action: ProposedAction,

    /// Digest the session key signed
    pub digest: B256,

    /// Session key signature over the digest
    pub signature: Bytes,
}
