pub mod basic;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

pub use crate::basic::actions::{ApproveSessionBuilder, SessionAccount, SessionApproval};
pub use crate::basic::policy::{PolicySetBuilder, ScopedCallBuilder};
pub use crate::basic::wallet::{SmartAccount, SmartAccountBuilder};
pub use crate::core::connection::ChainReader;
pub use crate::core::registry::{CapabilityRegistry, ProviderKind, SignerCapability};
pub use crate::core::signer::{AccountSigner, AddressOnlySigner};
pub use crate::error::{Result, SessionKitError};
pub use crate::types::{ChainProfile, DeploymentStatus, SignedAction, Strategy};
pub use crate::utils::{action_digest, compute_account_address, function_selector};

pub mod state {
    pub use sessionkit_state::{
        compute_integrity_tag, evaluate, validate_policies, AccountDescriptor, ArgumentMatcher,
        ComposeBuilder, ComposedAccount, CompositionStage, EntryPointVersion, KernelVersion,
        Policy, ProposedAction, ScopedCallPolicy, SessionCredential, SessionStateError,
        ValidatorConfig, ValidatorRole, ValidatorSlot, Verdict, CREDENTIAL_FORMAT_VERSION,
    };
}
