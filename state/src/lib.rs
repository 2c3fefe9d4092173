//! SessionKit State Module
//!
//! This module defines the core state structures for policy-scoped session
//! credentials on smart accounts: the account descriptor with its sudo/regular
//! validator stack, the policy engine, and the portable credential format.
//!
//! Everything here is pure and synchronous. A holder who only needs to verify
//! a credential blob depends on this crate alone.

pub mod account;
pub mod credential;
pub mod error;
pub mod policy;
pub mod version;

pub use account::{
    AccountDescriptor, ComposeBuilder, ComposedAccount, CompositionStage, ValidatorConfig,
    ValidatorRole, ValidatorSlot,
};
pub use credential::{compute_integrity_tag, SessionCredential, CREDENTIAL_FORMAT_VERSION};
pub use error::SessionStateError;
pub use policy::{
    evaluate, validate_policies, ArgumentMatcher, Policy, ProposedAction, ScopedCallPolicy,
    Verdict,
};
pub use version::{EntryPointVersion, KernelVersion};
