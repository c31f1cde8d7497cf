//! Domain events emitted by the engine
//!
//! Notification and analytics collaborators subscribe to these; the
//! engine itself never sends email or writes analytics. Payloads mirror
//! the audit record structures.

use crate::{
    ActorId, CorrectionId, CorrectionType, FactCheckId, Role, SubmissionId, WorkflowState,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted after a workflow transition commits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOccurred {
    pub submission_id: SubmissionId,
    /// `None` for the initial submitted record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_state: Option<WorkflowState>,
    pub to_state: WorkflowState,
    pub actor_id: ActorId,
    pub actor_role: Role,
    pub occurred_at: DateTime<Utc>,
}

/// Emitted after an accepted correction is applied
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionApplied {
    pub correction_id: CorrectionId,
    pub fact_check_id: FactCheckId,
    pub correction_type: CorrectionType,
    /// The new content version number
    pub version: u32,
    pub applied_by: ActorId,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_event_serde() {
        let event = TransitionOccurred {
            submission_id: SubmissionId::new("sub-1"),
            from_state: Some(WorkflowState::Queued),
            to_state: WorkflowState::Assigned,
            actor_id: ActorId::new("rev-1"),
            actor_role: Role::Reviewer,
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: TransitionOccurred = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_initial_event_omits_from_state() {
        let event = TransitionOccurred {
            submission_id: SubmissionId::new("sub-1"),
            from_state: None,
            to_state: WorkflowState::Submitted,
            actor_id: ActorId::new("rev-1"),
            actor_role: Role::Reviewer,
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("from_state"));
    }
}
