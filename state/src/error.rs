use thiserror::Error;

use crate::version::{EntryPointVersion, KernelVersion};

/// Errors produced by the state layer: composition, policy validation, and
/// credential encoding/decoding.
#[derive(Debug, Error)]
pub enum SessionStateError {
    /// Policy set is malformed (empty set, zero target, policies on sudo)
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Composition was attempted without a sudo validator
    #[error("Composition requires a sudo validator")]
    MissingSudoValidator,

    /// The implementation version has no known validator layout for this entry point
    #[error("Unsupported implementation version: kernel {kernel} with entry point {entry_point}")]
    UnsupportedImplementationVersion {
        kernel: KernelVersion,
        entry_point: EntryPointVersion,
    },

    /// Credential issuance needs a regular validator bound to the session key
    #[error("Composed account has no regular validator bound to the session key")]
    NoRegularValidator,

    /// Credential blob failed integrity verification
    #[error("Tampered credential: {0}")]
    TamperedCredential(String),

    /// Credential was written by a newer format than this build understands
    #[error("Credential format version {found} is newer than supported version {supported}")]
    VersionMismatch { found: u16, supported: u16 },
}
