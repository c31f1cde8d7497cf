//! Error types for the workflow and correction layers
//!
//! Every failure is a typed result, never an exception used for control
//! flow. The three illegal-transition causes are distinct variants so
//! callers can produce precise user-facing messages; the API boundary
//! maps these to status codes.

use editorial_store::StoreError;
use editorial_types::{CorrectionId, CorrectionStatus, Role, SubmissionId, WorkflowState};

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors from workflow engine operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no transition from '{from}' to '{to}'")]
    NoSuchTransition {
        from: WorkflowState,
        to: WorkflowState,
    },

    #[error("transition '{from}' -> '{to}' requires role '{required}' or above, actor is '{actual}'")]
    RoleInsufficient {
        from: WorkflowState,
        to: WorkflowState,
        required: Role,
        actual: Role,
    },

    #[error("transition '{from}' -> '{to}' requires a reason")]
    ReasonRequired {
        from: WorkflowState,
        to: WorkflowState,
    },

    #[error("submission {0} does not qualify for peer review")]
    PeerReviewNotRequired(SubmissionId),

    #[error("peer review has {have} of {quorum} required reviewers")]
    NeedsMoreReviewers { have: usize, quorum: usize },

    #[error(
        "peer review consensus not reached: {approved} approved, {rejected} rejected, {pending} pending"
    )]
    ConsensusNotReached {
        approved: usize,
        rejected: usize,
        pending: usize,
    },

    #[error("submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    #[error("submission {0} was modified concurrently; reload and retry")]
    ConcurrentModification(SubmissionId),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for correction operations
pub type CorrectionResult<T> = Result<T, CorrectionError>;

/// Errors from correction lifecycle operations
#[derive(Debug, thiserror::Error)]
pub enum CorrectionError {
    #[error("correction not found: {0}")]
    NotFound(CorrectionId),

    #[error("correction {id} is '{status:?}', operation requires '{required:?}'")]
    InvalidStatus {
        id: CorrectionId,
        status: CorrectionStatus,
        required: CorrectionStatus,
    },

    #[error("correction {0} has already been applied")]
    AlreadyApplied(CorrectionId),

    #[error("correction operation requires role '{required}' or above, actor is '{actual}'")]
    RoleInsufficient { required: Role, actual: Role },

    #[error("correction {0} was modified concurrently; reload and retry")]
    ConcurrentModification(CorrectionId),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
