use alloy_primitives::{Address, Selector};
use sessionkit_state::SessionStateError;
use thiserror::Error;

use crate::core::registry::ProviderKind;

/// SDK-specific error types for SessionKit operations
#[derive(Debug, Error)]
pub enum SessionKitError {
    /// The selected signer could not produce an address or signature
    #[error("Signer unavailable: {0}")]
    SignerUnavailable(String),

    /// No registered signer matches the requested provider kind
    #[error("No compatible signer for provider kind: {0}")]
    NoCompatibleSigner(ProviderKind),

    /// Chain read failed (RPC transport, node error)
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The signer is an address-only identity and cannot sign
    #[error("Signer does not support signing")]
    SigningNotSupported,

    /// A restored session's signer does not control the credential's key
    #[error("Signer address {actual} does not match credential session key {expected}")]
    SignerMismatch { expected: Address, actual: Address },

    /// The proposed action falls outside the session's granted scope
    #[error("Action on {target} with selector {selector} is outside the session scope")]
    PolicyDenied { target: Address, selector: Selector },

    /// A builder was finalized without a required parameter
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Error raised by account composition or credential handling
    #[error(transparent)]
    State(#[from] SessionStateError),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SessionKitError>;
