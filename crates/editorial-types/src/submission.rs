//! Submissions: units of editorial work
//!
//! A submission is created in `submitted`, mutated exclusively through
//! the workflow engine, and never deleted. Its `version` field is the
//! optimistic-concurrency token: every committed write bumps it, and the
//! store rejects writes whose expected version is stale.

use crate::{ActorId, WorkflowState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Engagement score at or above which a claim qualifies for mandatory
/// peer review even without a sensitive claim category.
pub const ENGAGEMENT_PEER_REVIEW_THRESHOLD: u32 = 10_000;

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a submission
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        let mut end = self.0.len().min(8);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        &self.0[..end]
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for the fact-check artifact a submission produces
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactCheckId(pub String);

impl FactCheckId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        let mut end = self.0.len().min(8);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        &self.0[..end]
    }
}

impl std::fmt::Display for FactCheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Classification ───────────────────────────────────────────────────

/// Editorial priority of a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Broad category of the claim under investigation.
///
/// Political and health/safety claims always qualify for peer review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    #[default]
    General,
    Political,
    HealthSafety,
    Economic,
    Science,
}

impl ClaimCategory {
    /// Categories whose claims always require peer review
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Political | Self::HealthSafety)
    }
}

// ── Submission ───────────────────────────────────────────────────────

/// A unit of editorial work moving through the workflow
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier
    pub id: SubmissionId,
    /// The fact-check artifact this submission produces
    pub fact_check_id: FactCheckId,
    /// Claim title / headline
    pub title: String,
    /// Current workflow state
    pub current_state: WorkflowState,
    /// Optimistic-concurrency token, bumped on every committed write
    pub version: u64,
    /// Reviewers assigned to this submission (additive set, never overwritten)
    pub assigned_reviewers: BTreeSet<ActorId>,
    /// If flagged as a duplicate, the submission it duplicates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<SubmissionId>,
    /// Editorial priority
    pub priority: Priority,
    /// Claim classification
    pub claim_category: ClaimCategory,
    /// External engagement score for the claim (shares, reach)
    pub engagement_score: u32,
    /// Explicit request to run peer review regardless of classification
    pub peer_review_requested: bool,
    /// When the submission was received
    pub created_at: DateTime<Utc>,
    /// When the submission was last written
    pub updated_at: DateTime<Utc>,
    /// Metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Submission {
    /// Create a new submission in the `submitted` state, version 1
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::generate(),
            fact_check_id: FactCheckId::generate(),
            title: title.into(),
            current_state: WorkflowState::Submitted,
            version: 1,
            assigned_reviewers: BTreeSet::new(),
            duplicate_of: None,
            priority: Priority::Normal,
            claim_category: ClaimCategory::General,
            engagement_score: 0,
            peer_review_requested: false,
            created_at: now,
            updated_at: now,
            metadata: HashMap::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_claim_category(mut self, category: ClaimCategory) -> Self {
        self.claim_category = category;
        self
    }

    pub fn with_engagement_score(mut self, score: u32) -> Self {
        self.engagement_score = score;
        self
    }

    pub fn with_peer_review_requested(mut self) -> Self {
        self.peer_review_requested = true;
        self
    }

    pub fn with_duplicate_of(mut self, original: SubmissionId) -> Self {
        self.duplicate_of = Some(original);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether this submission must pass peer review before final approval.
    ///
    /// Derived, never stored: sensitive claim category, engagement at or
    /// above the default threshold, or an explicit request.
    pub fn requires_peer_review(&self) -> bool {
        self.requires_peer_review_at(ENGAGEMENT_PEER_REVIEW_THRESHOLD)
    }

    /// Same derivation under a caller-supplied engagement threshold
    pub fn requires_peer_review_at(&self, engagement_threshold: u32) -> bool {
        self.claim_category.is_sensitive()
            || self.engagement_score >= engagement_threshold
            || self.peer_review_requested
    }

    /// Check if a reviewer is already assigned
    pub fn is_assigned(&self, reviewer: &ActorId) -> bool {
        self.assigned_reviewers.contains(reviewer)
    }

    /// Check if the submission sits in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.current_state.is_terminal()
    }
}
