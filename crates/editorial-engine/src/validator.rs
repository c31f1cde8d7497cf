//! Transition validator: decides legality of a requested transition
//!
//! A pure check over the static registry — no side effects, no I/O.
//! The three illegal causes are distinguished so the caller can tell a
//! missing edge from a role problem from a missing reason.

use crate::registry::{StateRegistry, TransitionRule};
use crate::{WorkflowError, WorkflowResult};
use editorial_types::{Role, WorkflowState};

/// Validates `(from, to, role, reason)` against the state registry
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionValidator {
    registry: StateRegistry,
}

impl TransitionValidator {
    pub fn new() -> Self {
        Self {
            registry: StateRegistry::new(),
        }
    }

    /// Check legality of a requested transition.
    ///
    /// Returns the matched rule on success. Checks run in order: edge
    /// existence (closed world, so self-loops fail here), role
    /// sufficiency, then reason presence. A reason is "present" when it
    /// is non-empty after trimming.
    pub fn validate(
        &self,
        from: WorkflowState,
        to: WorkflowState,
        role: Role,
        reason: Option<&str>,
    ) -> WorkflowResult<&'static TransitionRule> {
        let rule = self
            .registry
            .rule(from, to)
            .ok_or(WorkflowError::NoSuchTransition { from, to })?;

        if role < rule.min_role {
            return Err(WorkflowError::RoleInsufficient {
                from,
                to,
                required: rule.min_role,
                actual: role,
            });
        }

        if rule.reason_required && reason.map_or(true, |r| r.trim().is_empty()) {
            return Err(WorkflowError::ReasonRequired { from, to });
        }

        Ok(rule)
    }
}
