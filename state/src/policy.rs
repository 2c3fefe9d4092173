//! Policy model and evaluation.
//!
//! A regular validator carries an ordered policy set. An action is authorized
//! iff at least one policy in the set allows it: the set is scanned in order
//! and the first allowing policy short-circuits the scan. An empty set denies.

use alloy_primitives::{Address, Bytes, Selector, U256};
use serde::{Deserialize, Serialize};

use crate::error::SessionStateError;

/// Per-argument constraint of a scoped call, matched by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgumentMatcher {
    /// Accepts any value, including an absent argument.
    Any,
    /// Accepts only an argument that is present and byte-equal to `value`.
    Exact { value: Bytes },
}

impl ArgumentMatcher {
    /// Whether the matcher accepts the argument at its position.
    pub fn accepts(&self, argument: Option<&Bytes>) -> bool {
        match self {
            ArgumentMatcher::Any => true,
            ArgumentMatcher::Exact { value } => argument == Some(value),
        }
    }
}

/// Scope of a single permitted contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedCallPolicy {
    /// Contract the session key may call.
    pub target: Address,

    /// Maximum native value the call may carry.
    pub value_limit: U256,

    /// Function selector the call must use.
    pub selector: Selector,

    /// Positional constraints on the call arguments. Arguments beyond the
    /// list are unconstrained.
    pub argument_matchers: Vec<ArgumentMatcher>,
}

impl ScopedCallPolicy {
    /// Whether the action falls inside this scope.
    pub fn allows(&self, action: &ProposedAction) -> bool {
        if action.target != self.target {
            return false;
        }
        if action.value > self.value_limit {
            return false;
        }
        if action.selector != self.selector {
            return false;
        }
        self.argument_matchers
            .iter()
            .enumerate()
            .all(|(position, matcher)| matcher.accepts(action.arguments.get(position)))
    }
}

/// A rule constraining which actions a regular validator may authorize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// No restriction.
    AllowAll,
    /// Restricted to a single target/selector scope.
    ScopedCall(ScopedCallPolicy),
}

impl Policy {
    /// Whether this single policy allows the action.
    pub fn allows(&self, action: &ProposedAction) -> bool {
        match self {
            Policy::AllowAll => true,
            Policy::ScopedCall(scope) => scope.allows(action),
        }
    }
}

/// An action a session key proposes to perform on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Contract the call goes to.
    pub target: Address,

    /// Native value the call carries.
    pub value: U256,

    /// Function selector of the call.
    pub selector: Selector,

    /// Decoded call arguments, in call order.
    pub arguments: Vec<Bytes>,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny,
}

impl Verdict {
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// Evaluate an ordered policy set against a proposed action.
///
/// First-match-allow: the first policy allowing the action decides the
/// verdict. No allowing policy, or an empty set, denies.
pub fn evaluate(policies: &[Policy], action: &ProposedAction) -> Verdict {
    if policies.iter().any(|policy| policy.allows(action)) {
        Verdict::Allow
    } else {
        Verdict::Deny
    }
}

/// Check that a policy set is well-formed for attachment to a regular
/// validator: non-empty, and every scoped call names a non-zero target.
pub fn validate_policies(policies: &[Policy]) -> Result<(), SessionStateError> {
    if policies.is_empty() {
        return Err(SessionStateError::InvalidPolicy(
            "policy set is empty".to_string(),
        ));
    }
    for (position, policy) in policies.iter().enumerate() {
        if let Policy::ScopedCall(scope) = policy {
            if scope.target == Address::ZERO {
                return Err(SessionStateError::InvalidPolicy(format!(
                    "scoped call at position {position} has a zero target"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;

    use super::*;

    fn selector(signature: &str) -> Selector {
        Selector::from_slice(&keccak256(signature.as_bytes())[..4])
    }

    fn swap() -> Selector {
        selector("swap(address,uint256,bytes)")
    }

    fn scoped(target: Address, limit: u64, sel: Selector) -> Policy {
        Policy::ScopedCall(ScopedCallPolicy {
            target,
            value_limit: U256::from(limit),
            selector: sel,
            argument_matchers: Vec::new(),
        })
    }

    fn action(target: Address, value: u64, sel: Selector) -> ProposedAction {
        ProposedAction {
            target,
            value: U256::from(value),
            selector: sel,
            arguments: Vec::new(),
        }
    }

    #[test]
    fn test_allow_all_allows_anything() {
        let policies = vec![Policy::AllowAll];
        let verdict = evaluate(
            &policies,
            &action(Address::repeat_byte(0xAA), u64::MAX, swap()),
        );
        assert_eq!(verdict, Verdict::Allow);
    }

    #[test]
    fn test_empty_set_denies() {
        let verdict = evaluate(&[], &action(Address::repeat_byte(0xAA), 0, swap()));
        assert_eq!(verdict, Verdict::Deny);
    }

    #[test]
    fn test_scoped_call_allows_inside_scope() {
        let target = Address::repeat_byte(0xAA);
        let policies = vec![scoped(target, 1000, swap())];
        assert_eq!(evaluate(&policies, &action(target, 500, swap())), Verdict::Allow);
    }

    #[test]
    fn test_value_limit_is_inclusive() {
        let target = Address::repeat_byte(0xAA);
        let policies = vec![scoped(target, 1000, swap())];
        assert_eq!(evaluate(&policies, &action(target, 1000, swap())), Verdict::Allow);
        assert_eq!(evaluate(&policies, &action(target, 1001, swap())), Verdict::Deny);
    }

    #[test]
    fn test_scoped_call_denies_other_target() {
        let policies = vec![scoped(Address::repeat_byte(0xAA), 1000, swap())];
        let verdict = evaluate(&policies, &action(Address::repeat_byte(0xBB), 1, swap()));
        assert_eq!(verdict, Verdict::Deny);
    }

    #[test]
    fn test_scoped_call_denies_other_selector() {
        let target = Address::repeat_byte(0xAA);
        let policies = vec![scoped(target, 1000, swap())];
        let verdict = evaluate(&policies, &action(target, 1, selector("transfer(address,uint256)")));
        assert_eq!(verdict, Verdict::Deny);
    }

    #[test]
    fn test_exact_matcher_pins_the_argument() {
        let target = Address::repeat_byte(0xAA);
        let pinned = Bytes::from(vec![0x01, 0x02]);
        let policy = Policy::ScopedCall(ScopedCallPolicy {
            target,
            value_limit: U256::from(1000u64),
            selector: swap(),
            argument_matchers: vec![
                ArgumentMatcher::Any,
                ArgumentMatcher::Exact {
                    value: pinned.clone(),
                },
            ],
        });

        let mut ok = action(target, 1, swap());
        ok.arguments = vec![Bytes::from(vec![0xFF]), pinned];
        assert_eq!(evaluate(std::slice::from_ref(&policy), &ok), Verdict::Allow);

        let mut wrong_value = action(target, 1, swap());
        wrong_value.arguments = vec![Bytes::from(vec![0xFF]), Bytes::from(vec![0x09])];
        assert_eq!(
            evaluate(std::slice::from_ref(&policy), &wrong_value),
            Verdict::Deny
        );

        // Exact requires the argument to be present at all.
        let mut absent = action(target, 1, swap());
        absent.arguments = vec![Bytes::from(vec![0xFF])];
        assert_eq!(
            evaluate(std::slice::from_ref(&policy), &absent),
            Verdict::Deny
        );
    }

    #[test]
    fn test_any_matcher_accepts_absent_argument() {
        let target = Address::repeat_byte(0xAA);
        let policy = Policy::ScopedCall(ScopedCallPolicy {
            target,
            value_limit: U256::from(1000u64),
            selector: swap(),
            argument_matchers: vec![ArgumentMatcher::Any, ArgumentMatcher::Any],
        });
        let bare = action(target, 1, swap());
        assert_eq!(evaluate(std::slice::from_ref(&policy), &bare), Verdict::Allow);
    }

    #[test]
    fn test_arguments_beyond_matchers_are_unconstrained() {
        let target = Address::repeat_byte(0xAA);
        let policy = Policy::ScopedCall(ScopedCallPolicy {
            target,
            value_limit: U256::from(1000u64),
            selector: swap(),
            argument_matchers: vec![ArgumentMatcher::Any],
        });
        let mut act = action(target, 1, swap());
        act.arguments = vec![Bytes::from(vec![0x01]), Bytes::from(vec![0x02])];
        assert_eq!(evaluate(std::slice::from_ref(&policy), &act), Verdict::Allow);
    }

    #[test]
    fn test_first_allowing_policy_wins() {
        let target = Address::repeat_byte(0xAA);
        let policies = vec![
            scoped(Address::repeat_byte(0xBB), 1, swap()),
            Policy::AllowAll,
        ];
        assert_eq!(evaluate(&policies, &action(target, 9999, swap())), Verdict::Allow);
    }

    #[test]
    fn test_validate_rejects_empty_set() {
        let err = validate_policies(&[]).unwrap_err();
        assert!(matches!(err, SessionStateError::InvalidPolicy(_)));
    }

    #[test]
    fn test_validate_rejects_zero_target() {
        let policies = vec![scoped(Address::ZERO, 1000, swap())];
        let err = validate_policies(&policies).unwrap_err();
        assert!(matches!(err, SessionStateError::InvalidPolicy(_)));
    }

    #[test]
    fn test_validate_accepts_allow_all() {
        assert!(validate_policies(&[Policy::AllowAll]).is_ok());
    }
}
