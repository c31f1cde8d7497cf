//! Transition records: the append-only workflow audit trail
//!
//! Every successful transition appends exactly one record. The ordered
//! sequence for a submission reconstructs its history and always ends in
//! the submission's current state.

use crate::{ActorId, Role, SubmissionId, WorkflowState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a transition record
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionRecordId(pub String);

impl TransitionRecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TransitionRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable audit entry for one workflow transition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowTransitionRecord {
    /// Unique record identifier
    pub id: TransitionRecordId,
    /// The submission this record belongs to
    pub submission_id: SubmissionId,
    /// State before the transition; `None` only for the initial record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_state: Option<WorkflowState>,
    /// State after the transition
    pub to_state: WorkflowState,
    /// Who performed the transition
    pub actor_id: ActorId,
    /// The actor's role at the time of the transition
    pub actor_role: Role,
    /// Reason, mandatory for edges the registry marks reason-required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    /// When the transition occurred
    pub occurred_at: DateTime<Utc>,
}

impl WorkflowTransitionRecord {
    /// Record for a regular transition
    pub fn new(
        submission_id: SubmissionId,
        from_state: WorkflowState,
        to_state: WorkflowState,
        actor_id: ActorId,
        actor_role: Role,
    ) -> Self {
        Self {
            id: TransitionRecordId::generate(),
            submission_id,
            from_state: Some(from_state),
            to_state,
            actor_id,
            actor_role,
            reason: None,
            metadata: HashMap::new(),
            occurred_at: Utc::now(),
        }
    }

    /// The initial record written when a submission is created
    pub fn initial(submission_id: SubmissionId, actor_id: ActorId, actor_role: Role) -> Self {
        Self {
            id: TransitionRecordId::generate(),
            submission_id,
            from_state: None,
            to_state: WorkflowState::Submitted,
            actor_id,
            actor_role,
            reason: None,
            metadata: HashMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Verify chain integrity of an ordered transition history.
///
/// Each record's `from_state` must equal the previous record's
/// `to_state`, and only the first record may have `from_state == None`.
pub fn history_is_consistent(records: &[WorkflowTransitionRecord]) -> bool {
    let mut prev: Option<WorkflowState> = None;
    for (i, record) in records.iter().enumerate() {
        match (i, record.from_state) {
            (0, _) => {}
            (_, Some(from)) if Some(from) == prev => {}
            _ => return false,
        }
        prev = Some(record.to_state);
    }
    true
}
