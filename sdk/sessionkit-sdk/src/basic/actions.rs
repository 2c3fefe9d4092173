use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::basic::wallet;
use crate::core::connection::ChainReader;
use crate::core::constants;
use crate::core::registry::{CapabilityRegistry, ProviderKind, SignerCapability};
use crate::core::signer::AccountSigner;
use crate::error::{Result, SessionKitError};
use crate::types::{ChainProfile, SignedAction, Strategy};
use crate::utils;
use alloy_primitives::Address;
use sessionkit_state::{
    ComposedAccount, Policy, ProposedAction, SessionCredential, ValidatorConfig, Verdict,
};

/// Result of approving a session key: the recomposed account and the
/// portable credential in both decoded and encoded form.
#[derive(Debug, Clone)]
pub struct SessionApproval {
    /// Account recomposed with the permission validator installed
    pub account: ComposedAccount,

    /// The issued credential
    pub credential: SessionCredential,

    /// `credential` rendered for storage or transfer
    pub blob: String,
}

/// Builder for approving a session key on an owner's account.
#[derive(Debug, Clone, Default)]
pub struct ApproveSessionBuilder {
    owner: Option<SignerCapability>,
    session_key: Option<Address>,
    strategy: Strategy,
    profile: ChainProfile,
    policies: Vec<Policy>,
}

impl ApproveSessionBuilder {
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

    /// The key being granted a session.
    pub fn with_session_key(mut self, session_key: Address) -> Self {
        self.session_key = Some(session_key);
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

    /// Scope granted to the session key.
    ///
    /// There is no default grant. An unrestricted session must pass
    /// [`Policy::AllowAll`] explicitly; an empty set fails composition.
    pub fn with_policies(mut self, policies: Vec<Policy>) -> Self {
        self.policies = policies;
        self
    }

    /// Recompose the account with the permission validator and issue the
    /// session credential.
    pub async fn approve(self, reader: &impl ChainReader) -> Result<SessionApproval> {
        let owner = self.owner.ok_or(SessionKitError::MissingParameter("owner"))?;
        let session_key = self
            .session_key
            .ok_or(SessionKitError::MissingParameter("session_key"))?;

        let descriptor =
            wallet::derive_account(&owner, self.strategy.key, &self.profile, reader).await?;
        let owner_address = owner.address()?;

        let account = ComposedAccount::builder(descriptor)
            .with_sudo(ValidatorConfig::owner_ecdsa(
                constants::ECDSA_VALIDATOR,
                owner_address,
            ))
            .with_regular(ValidatorConfig::permission(
                constants::PERMISSION_VALIDATOR,
                session_key,
                self.policies,
            ))
            .build()
            .map_err(|e| {
                error!(session_key = %session_key, error = %e, "session composition failed");
                SessionKitError::from(e)
            })?;

        let credential = SessionCredential::issue(&account, session_key)?;
        let blob = credential.encode();
        debug!(
            account = %account.address(),
            session_key = %session_key,
            policies = credential.policies.len(),
            "session key approved"
        );

        Ok(SessionApproval {
            account,
            credential,
            blob,
        })
    }
}

/// A session restored from a credential blob, bound to the session key's
/// signer. Evaluates and signs actions without the owner present.
#[derive(Clone)]
pub struct SessionAccount {
    credential: SessionCredential,
    signer: Arc<dyn AccountSigner>,
}

impl SessionAccount {
    /// Restore a session from an encoded credential.
    ///
    /// The signer must control the credential's session key; verification
    /// of the blob itself happens during decoding.
    pub fn restore(blob: &str, signer: Arc<dyn AccountSigner>) -> Result<Self> {
        let credential = SessionCredential::decode(blob)?;
        let actual = signer.address()?;
        if actual != credential.session_key_address {
            warn!(
                expected = %credential.session_key_address,
                actual = %actual,
                "restored signer does not hold the session key"
            );
            return Err(SessionKitError::SignerMismatch {
                expected: credential.session_key_address,
                actual,
            });
        }

        debug!(
            account = %credential.account_address,
            session_key = %actual,
            "session restored"
        );
        Ok(Self { credential, signer })
    }

    /// Account the session acts on.
    pub fn address(&self) -> Address {
        self.credential.account_address
    }

    pub fn session_key(&self) -> Address {
        self.credential.session_key_address
    }

    pub fn credential(&self) -> &SessionCredential {
        &self.credential
    }

    /// Evaluate an action against the session's granted scope.
    pub fn evaluate(&self, action: &ProposedAction) -> Verdict {
        sessionkit_state::evaluate(&self.credential.policies, action)
    }

    /// Sign an in-scope action with the session key.
    pub async fn sign_action(
        &self,
        action: &ProposedAction,
        profile: &ChainProfile,
    ) -> Result<SignedAction> {
        if !self.evaluate(action).is_allow() {
            warn!(
                target = %action.target,
                selector = %action.selector,
                "action denied by session scope"
            );
            return Err(SessionKitError::PolicyDenied {
                target: action.target,
                selector: action.selector,
            });
        }

        let digest = utils::action_digest(profile.chain_id, self.address(), action);
        let signature = self.signer.sign_message(digest.as_slice()).await?;

        Ok(SignedAction {
            account: self.address(),
            action: action.clone(),
            digest,
            signature,
        })
    }
}

impl fmt::Debug for SessionAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAccount")
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
