//! State registry: the static table of legal workflow transitions
//!
//! Closed world — nothing is legal unless explicitly listed here, which
//! also rules out self-loops. Each edge carries the minimum role that
//! may take it and whether a reason is mandatory. The table is plain
//! data; legality decisions belong to the validator.

use editorial_types::{Role, StateCategory, WorkflowState};
use serde::{Deserialize, Serialize};

/// One legal edge in the workflow graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// Source state
    pub from: WorkflowState,
    /// Target state
    pub to: WorkflowState,
    /// Minimum role allowed to take this edge
    pub min_role: Role,
    /// Whether a non-empty reason is mandatory
    pub reason_required: bool,
}

const fn edge(
    from: WorkflowState,
    to: WorkflowState,
    min_role: Role,
    reason_required: bool,
) -> TransitionRule {
    TransitionRule {
        from,
        to,
        min_role,
        reason_required,
    }
}

use editorial_types::Role::{Admin, Reviewer, SuperAdmin};
use editorial_types::WorkflowState::*;

/// Every legal workflow transition. Edges into `rejected` and
/// `needs_more_research` always require a reason; archival does too.
pub const TRANSITIONS: &[TransitionRule] = &[
    // Intake and triage
    edge(Submitted, Queued, Reviewer, false),
    edge(Submitted, DuplicateDetected, Reviewer, false),
    edge(Submitted, Rejected, Admin, true),
    edge(Queued, Assigned, Reviewer, false),
    edge(Queued, DuplicateDetected, Reviewer, false),
    edge(Queued, Rejected, Admin, true),
    edge(Queued, Archived, Admin, true),
    // Research
    edge(Assigned, InResearch, Reviewer, false),
    edge(Assigned, Queued, Admin, false),
    edge(InResearch, DraftReady, Reviewer, false),
    edge(InResearch, NeedsMoreResearch, Admin, true),
    edge(NeedsMoreResearch, InResearch, Reviewer, false),
    // Review tiers
    edge(DraftReady, AdminReview, Reviewer, false),
    edge(DraftReady, PeerReview, Admin, false),
    edge(AdminReview, PeerReview, Admin, false),
    edge(AdminReview, FinalApproval, Admin, false),
    edge(AdminReview, NeedsMoreResearch, Admin, true),
    edge(AdminReview, Rejected, Admin, true),
    edge(PeerReview, FinalApproval, Admin, false),
    edge(PeerReview, NeedsMoreResearch, Admin, true),
    edge(PeerReview, Rejected, Admin, true),
    // Publication
    edge(FinalApproval, Published, Admin, false),
    edge(FinalApproval, NeedsMoreResearch, Admin, true),
    edge(FinalApproval, Rejected, Admin, true),
    // Correction branch
    edge(Published, UnderCorrection, Admin, false),
    edge(Published, Archived, SuperAdmin, true),
    edge(UnderCorrection, Published, Admin, false),
    edge(UnderCorrection, Corrected, Admin, false),
    edge(Corrected, Published, Admin, false),
    // Duplicate quarantine always ends in archival
    edge(DuplicateDetected, Archived, Reviewer, false),
];

/// Lookup over the static transition table
#[derive(Clone, Copy, Debug, Default)]
pub struct StateRegistry;

impl StateRegistry {
    pub fn new() -> Self {
        Self
    }

    /// The rule for `(from, to)`, or `None` when no such edge exists
    pub fn rule(&self, from: WorkflowState, to: WorkflowState) -> Option<&'static TransitionRule> {
        TRANSITIONS.iter().find(|r| r.from == from && r.to == to)
    }

    /// Check whether `(from, to)` is a listed edge
    pub fn is_known_pair(&self, from: WorkflowState, to: WorkflowState) -> bool {
        self.rule(from, to).is_some()
    }

    /// All outgoing edges from a state
    pub fn outgoing(&self, from: WorkflowState) -> Vec<&'static TransitionRule> {
        TRANSITIONS.iter().filter(|r| r.from == from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_self_loops_listed() {
        assert!(TRANSITIONS.iter().all(|r| r.from != r.to));
    }

    #[test]
    fn test_every_state_is_reachable_or_initial() {
        for state in WorkflowState::ALL {
            if state == Submitted {
                continue;
            }
            assert!(
                TRANSITIONS.iter().any(|r| r.to == state),
                "state '{state}' has no incoming edge"
            );
        }
    }

    #[test]
    fn test_rejected_always_needs_reason() {
        for rule in TRANSITIONS.iter().filter(|r| r.to == Rejected) {
            assert!(rule.reason_required, "edge {} -> rejected", rule.from);
            assert!(rule.min_role >= Admin);
        }
    }

    #[test]
    fn test_needs_more_research_always_needs_reason() {
        for rule in TRANSITIONS.iter().filter(|r| r.to == NeedsMoreResearch) {
            assert!(rule.reason_required);
        }
    }

    #[test]
    fn test_duplicate_reachable_only_from_intake() {
        for rule in TRANSITIONS.iter().filter(|r| r.to == DuplicateDetected) {
            assert!(matches!(rule.from, Submitted | Queued));
        }
        // And its only exit is archival
        let exits = StateRegistry::new().outgoing(DuplicateDetected);
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].to, Archived);
    }

    #[test]
    fn test_terminal_states_have_no_pipeline_exits() {
        // rejected and archived are dead ends; published only exits into
        // the correction branch
        assert!(StateRegistry::new().outgoing(Rejected).is_empty());
        assert!(StateRegistry::new().outgoing(Archived).is_empty());
        for rule in StateRegistry::new().outgoing(Published) {
            assert!(matches!(
                rule.to.category(),
                StateCategory::CorrectionBranch | StateCategory::Terminal
            ));
        }
    }

    #[test]
    fn test_unpublish_is_super_admin_only() {
        let rule = StateRegistry::new().rule(Published, Archived).unwrap();
        assert_eq!(rule.min_role, SuperAdmin);
        assert!(rule.reason_required);
    }

    #[test]
    fn test_lookup() {
        let registry = StateRegistry::new();
        assert!(registry.is_known_pair(Submitted, Queued));
        assert!(!registry.is_known_pair(Submitted, Published));
        assert!(!registry.is_known_pair(Queued, Queued));
        assert_eq!(registry.outgoing(Queued).len(), 4);
    }
}
