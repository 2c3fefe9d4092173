//! Portable, tamper-evident session credential.
//!
//! The credential is the one persisted artifact of an approval: a session
//! key's granted scope on one account, verifiable by any holder without the
//! owner's signer. The rendering is JSON wrapped in URL-safe base64;
//! compatibility across minor format versions is additive-only, so unknown
//! fields are ignored on decode.

use alloy_primitives::{keccak256, Address, B256};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::account::ComposedAccount;
use crate::error::SessionStateError;
use crate::policy::{ArgumentMatcher, Policy};

/// Newest credential format this build writes and understands.
pub const CREDENTIAL_FORMAT_VERSION: u16 = 1;

/// An approved session key's scope on one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    /// Format the blob was written with.
    pub format_version: u16,

    /// Account the session acts on.
    pub account_address: Address,

    /// The approved session key.
    pub session_key_address: Address,

    /// Granted scope, in evaluation order.
    pub policies: Vec<Policy>,

    /// keccak-256 over the canonical preimage of the fields above.
    pub integrity_tag: B256,
}

impl SessionCredential {
    /// Issue a credential for `session_key` from a composed account.
    ///
    /// The account must carry a regular validator whose subject is
    /// `session_key`.
    pub fn issue(
        account: &ComposedAccount,
        session_key: Address,
    ) -> Result<Self, SessionStateError> {
        let regular = account
            .regular()
            .ok_or(SessionStateError::NoRegularValidator)?;
        if regular.config.subject != session_key {
            return Err(SessionStateError::NoRegularValidator);
        }

        let policies = regular.config.policies.clone();
        let integrity_tag = compute_integrity_tag(
            CREDENTIAL_FORMAT_VERSION,
            account.address(),
            session_key,
            &policies,
        );

        Ok(Self {
            format_version: CREDENTIAL_FORMAT_VERSION,
            account_address: account.address(),
            session_key_address: session_key,
            policies,
            integrity_tag,
        })
    }

    /// Render the credential as a URL-safe base64 blob.
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).expect("credential JSON rendering does not fail");
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Parse and verify a blob produced by [`SessionCredential::encode`].
    ///
    /// Verification order: parse, gate on `format_version`, recompute the
    /// integrity tag. A blob that is not valid base64/JSON was not produced
    /// by this codec and reports as tampered.
    pub fn decode(blob: &str) -> Result<Self, SessionStateError> {
        let raw = URL_SAFE_NO_PAD
            .decode(blob)
            .map_err(|e| SessionStateError::TamperedCredential(format!("not base64: {e}")))?;
        let credential: SessionCredential = serde_json::from_slice(&raw)
            .map_err(|e| SessionStateError::TamperedCredential(format!("not a credential: {e}")))?;

        if credential.format_version > CREDENTIAL_FORMAT_VERSION {
            return Err(SessionStateError::VersionMismatch {
                found: credential.format_version,
                supported: CREDENTIAL_FORMAT_VERSION,
            });
        }

        let expected = compute_integrity_tag(
            credential.format_version,
            credential.account_address,
            credential.session_key_address,
            &credential.policies,
        );
        if expected != credential.integrity_tag {
            return Err(SessionStateError::TamperedCredential(
                "integrity tag mismatch".to_string(),
            ));
        }

        Ok(credential)
    }
}

/// Compute the integrity tag over the canonical credential preimage.
///
/// Preimage layout (lengths and counts little-endian, value limits as
/// 32-byte big-endian words):
/// - format_version: u16
/// - account_address: 20 bytes
/// - session_key_address: 20 bytes
/// - policy_count: u32, then per policy:
///   - AllowAll: tag byte 0x00
///   - ScopedCall: tag byte 0x01, target (20 bytes), value_limit (32 bytes),
///     selector (4 bytes), matcher_count: u32, then per matcher:
///     Any: 0x00 | Exact: 0x01, value_length: u32, value bytes
pub fn compute_integrity_tag(
    format_version: u16,
    account: Address,
    session_key: Address,
    policies: &[Policy],
) -> B256 {
    let mut preimage = Vec::with_capacity(64);
    preimage.extend_from_slice(&format_version.to_le_bytes());
    preimage.extend_from_slice(account.as_slice());
    preimage.extend_from_slice(session_key.as_slice());
    preimage.extend_from_slice(&(policies.len() as u32).to_le_bytes());

    for policy in policies {
        match policy {
            Policy::AllowAll => preimage.push(0x00),
            Policy::ScopedCall(scope) => {
                preimage.push(0x01);
                preimage.extend_from_slice(scope.target.as_slice());
                preimage.extend_from_slice(&scope.value_limit.to_be_bytes::<32>());
                preimage.extend_from_slice(scope.selector.as_slice());
                preimage.extend_from_slice(&(scope.argument_matchers.len() as u32).to_le_bytes());
                for matcher in &scope.argument_matchers {
                    match matcher {
                        ArgumentMatcher::Any => preimage.push(0x00),
                        ArgumentMatcher::Exact { value } => {
                            preimage.push(0x01);
                            preimage.extend_from_slice(&(value.len() as u32).to_le_bytes());
                            preimage.extend_from_slice(value);
                        }
                    }
                }
            }
        }
    }

    keccak256(preimage)
}
