use alloy_primitives::{Address, Bytes, Selector, U256};
use sessionkit_state::{validate_policies, ArgumentMatcher, Policy, ScopedCallPolicy};

use crate::error::{Result, SessionKitError};
use crate::utils::function_selector;

/// Fluent builder for a session's policy set.
///
/// There is no implicit grant: an unrestricted session must opt in through
/// [`PolicySetBuilder::allow_all`], and an empty set fails validation.
#[derive(Debug, Default)]
pub struct PolicySetBuilder {
    policies: Vec<Policy>,
}

impl PolicySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the session unrestricted use of the account.
    pub fn allow_all(mut self) -> Self {
        self.policies.push(Policy::AllowAll);
        self
    }

    /// Add a scoped-call grant.
    pub fn scoped_call(mut self, scope: ScopedCallPolicy) -> Self {
        self.policies.push(Policy::ScopedCall(scope));
        self
    }

    /// Add a pre-built policy.
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }

    /// Validate and return the policy set.
    pub fn build(self) -> Result<Vec<Policy>> {
        validate_policies(&self.policies)?;
        Ok(self.policies)
    }
}

/// Fluent builder for a single scoped-call policy.
#[derive(Debug, Default)]
pub struct ScopedCallBuilder {
    target: Option<Address>,
    value_limit: U256,
    selector: Option<Selector>,
    argument_matchers: Vec<ArgumentMatcher>,
}

impl ScopedCallBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contract the session key may call.
    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    /// Maximum native value per call. Defaults to zero (no value transfer).
    pub fn with_value_limit(mut self, limit: U256) -> Self {
        self.value_limit = limit;
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Set the selector from a function signature.
    pub fn with_signature(mut self, signature: &str) -> Self {
        self.selector = Some(function_selector(signature));
        self
    }

    /// Leave the next argument position unconstrained.
    pub fn match_any(mut self) -> Self {
        self.argument_matchers.push(ArgumentMatcher::Any);
        self
    }

    /// Pin the next argument position to an exact value.
    pub fn match_exact(mut self, value: impl Into<Bytes>) -> Self {
        self.argument_matchers.push(ArgumentMatcher::Exact {
            value: value.into(),
        });
        self
    }

    pub fn build(self) -> Result<Policy> {
        let target = self
            .target
            .ok_or(SessionKitError::MissingParameter("target"))?;
        let selector = self
            .selector
            .ok_or(SessionKitError::MissingParameter("selector"))?;

        Ok(Policy::ScopedCall(ScopedCallPolicy {
            target,
            value_limit: self.value_limit,
            selector,
            argument_matchers: self.argument_matchers,
        }))
    }
}
