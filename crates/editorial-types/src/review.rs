//! Peer reviews: independent reviewer decisions on a fact-check
//!
//! Peer review is a veto gate, not a vote. A single rejection blocks
//! publication regardless of how many approvals exist. The consensus
//! rules themselves live in the engine; these are the records it reads.

use crate::{ActorId, FactCheckId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a peer review
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerReviewId(pub String);

impl PeerReviewId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PeerReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reviewer's decision on a fact-check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Review opened but no decision yet
    #[default]
    Pending,
    /// Reviewer approves publication
    Approved,
    /// Reviewer vetoes publication
    Rejected,
}

impl ReviewDecision {
    /// Check if the decision is final (approved or rejected)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One reviewer's review of a fact-check during its peer-review phase.
///
/// At most one exists per (fact-check, reviewer) pair; a reviewer may
/// update their decision but never hold two reviews on the same
/// fact-check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeerReview {
    /// Unique review identifier
    pub id: PeerReviewId,
    /// The fact-check under review
    pub fact_check_id: FactCheckId,
    /// The reviewer
    pub reviewer_id: ActorId,
    /// Current decision
    pub decision: ReviewDecision,
    /// Optional review comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When the review was first opened
    pub created_at: DateTime<Utc>,
    /// When the review was last updated
    pub updated_at: DateTime<Utc>,
}

impl PeerReview {
    pub fn new(fact_check_id: FactCheckId, reviewer_id: ActorId, decision: ReviewDecision) -> Self {
        let now = Utc::now();
        Self {
            id: PeerReviewId::generate(),
            fact_check_id,
            reviewer_id,
            decision,
            comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Replace the decision, keeping identity and creation time
    pub fn update_decision(&mut self, decision: ReviewDecision, comment: Option<String>) {
        self.decision = decision;
        if comment.is_some() {
            self.comment = comment;
        }
        self.updated_at = Utc::now();
    }
}

/// The computed consensus over all peer reviews of a fact-check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusReport {
    /// All existing reviews are terminal and quorum is met
    pub consensus_reached: bool,
    /// Consensus reached with unanimous approval
    pub approved: bool,
    /// Count of approved reviews
    pub approved_count: usize,
    /// Count of rejected reviews
    pub rejected_count: usize,
    /// Count of reviews still pending
    pub pending_count: usize,
    /// Fewer distinct reviewers than the quorum requires
    pub needs_more_reviewers: bool,
}

impl ConsensusReport {
    /// Total number of reviews the report was computed over
    pub fn total(&self) -> usize {
        self.approved_count + self.rejected_count + self.pending_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_terminality() {
        assert!(!ReviewDecision::Pending.is_terminal());
        assert!(ReviewDecision::Approved.is_terminal());
        assert!(ReviewDecision::Rejected.is_terminal());
    }

    #[test]
    fn test_update_decision_keeps_identity() {
        let mut review = PeerReview::new(
            FactCheckId::new("fc-1"),
            ActorId::new("rev-1"),
            ReviewDecision::Pending,
        );
        let id = review.id.clone();
        let created = review.created_at;

        review.update_decision(ReviewDecision::Approved, Some("Sources check out".into()));
        assert_eq!(review.id, id);
        assert_eq!(review.created_at, created);
        assert_eq!(review.decision, ReviewDecision::Approved);
        assert_eq!(review.comment.as_deref(), Some("Sources check out"));
    }

    #[test]
    fn test_update_decision_preserves_comment_when_absent() {
        let mut review = PeerReview::new(
            FactCheckId::new("fc-1"),
            ActorId::new("rev-1"),
            ReviewDecision::Pending,
        )
        .with_comment("first pass");

        review.update_decision(ReviewDecision::Rejected, None);
        assert_eq!(review.comment.as_deref(), Some("first pass"));
    }

    #[test]
    fn test_report_total() {
        let report = ConsensusReport {
            consensus_reached: false,
            approved: false,
            approved_count: 1,
            rejected_count: 0,
            pending_count: 2,
            needs_more_reviewers: false,
        };
        assert_eq!(report.total(), 3);
    }
}
