//! Workflow states: the discrete stages of the editorial lifecycle
//!
//! The state set is closed. A submission is always in exactly one of
//! these states, and the only way between them is a transition mediated
//! by the workflow engine.

use serde::{Deserialize, Serialize};

/// One discrete stage in a submission's editorial lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Freshly received, not yet triaged
    #[default]
    Submitted,
    /// Triaged and waiting for a reviewer
    Queued,
    /// Claimed by one or more reviewers
    Assigned,
    /// Research in progress
    InResearch,
    /// Draft complete, ready for editorial review
    DraftReady,
    /// Sent back: the draft needs further research
    NeedsMoreResearch,
    /// Under review by an admin editor
    AdminReview,
    /// Under review by independent peer reviewers
    PeerReview,
    /// Cleared review, awaiting the publish decision
    FinalApproval,
    /// Publicly visible
    Published,
    /// Declined with a recorded reason
    Rejected,
    /// Removed from the active pipeline
    Archived,
    /// Flagged as a duplicate of an existing submission
    DuplicateDetected,
    /// Published fact-check with a correction in progress
    UnderCorrection,
    /// Correction applied; a new content version exists
    Corrected,
}

/// Partition of the state set, used for reporting and registry checks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCategory {
    /// Entry point of the lifecycle
    Initial,
    /// Normal editorial pipeline
    Active,
    /// No further editorial work
    Terminal,
    /// Post-publication correction branch
    CorrectionBranch,
    /// Duplicate quarantine, only exit is archival
    Duplicate,
}

impl WorkflowState {
    /// All states, in lifecycle order
    pub const ALL: [WorkflowState; 15] = [
        Self::Submitted,
        Self::Queued,
        Self::Assigned,
        Self::InResearch,
        Self::DraftReady,
        Self::NeedsMoreResearch,
        Self::AdminReview,
        Self::PeerReview,
        Self::FinalApproval,
        Self::Published,
        Self::Rejected,
        Self::Archived,
        Self::DuplicateDetected,
        Self::UnderCorrection,
        Self::Corrected,
    ];

    /// The snake_case wire name of this state
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Queued => "queued",
            Self::Assigned => "assigned",
            Self::InResearch => "in_research",
            Self::DraftReady => "draft_ready",
            Self::NeedsMoreResearch => "needs_more_research",
            Self::AdminReview => "admin_review",
            Self::PeerReview => "peer_review",
            Self::FinalApproval => "final_approval",
            Self::Published => "published",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
            Self::DuplicateDetected => "duplicate_detected",
            Self::UnderCorrection => "under_correction",
            Self::Corrected => "corrected",
        }
    }

    /// Which partition of the lifecycle this state belongs to
    pub fn category(&self) -> StateCategory {
        match self {
            Self::Submitted => StateCategory::Initial,
            Self::Queued
            | Self::Assigned
            | Self::InResearch
            | Self::DraftReady
            | Self::NeedsMoreResearch
            | Self::AdminReview
            | Self::PeerReview
            | Self::FinalApproval => StateCategory::Active,
            Self::Published | Self::Rejected | Self::Archived => StateCategory::Terminal,
            Self::UnderCorrection | Self::Corrected => StateCategory::CorrectionBranch,
            Self::DuplicateDetected => StateCategory::Duplicate,
        }
    }

    /// Check if this state ends the editorial pipeline.
    ///
    /// `published` and `corrected` still carry outgoing correction-branch
    /// edges, so "terminal" here means "no further *editorial* work",
    /// not "no outgoing edges".
    pub fn is_terminal(&self) -> bool {
        self.category() == StateCategory::Terminal
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
