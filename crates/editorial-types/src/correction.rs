//! Corrections: post-publication amendments to fact-checks
//!
//! A correction request moves `pending -> {accepted, rejected}` and then
//! `accepted -> applied`, producing a new versioned content revision
//! exactly once. The SLA deadline is fixed at creation; overdue-ness is
//! always computed against the caller's clock, never stored.

use crate::{ActorId, FactCheckId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Response-time commitment for correction requests, in days
pub const SLA_RESPONSE_DAYS: i64 = 7;

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a correction request
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrectionId(pub String);

impl CorrectionId {
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

impl std::fmt::Display for CorrectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a correction application record
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Correction request ───────────────────────────────────────────────

/// The kind of amendment a correction makes, determining its effect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionType {
    /// Content fixed in place; no public notice
    Minor,
    /// Content updated with an appended, dated update note
    Update,
    /// Content and possibly rating changed, with a prominent correction
    /// notice; the only type eligible for the public corrections log
    Substantial,
}

impl CorrectionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Update => "update",
            Self::Substantial => "substantial",
        }
    }
}

impl std::fmt::Display for CorrectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle status of a correction request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    /// Awaiting editorial triage
    #[default]
    Pending,
    /// Accepted; awaiting application
    Accepted,
    /// Declined with resolution notes
    Rejected,
    /// Enacted on the fact-check's content; terminal
    Applied,
}

/// A request to amend a published fact-check
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrectionRequest {
    /// Unique request identifier
    pub id: CorrectionId,
    /// The fact-check the request targets
    pub fact_check_id: FactCheckId,
    /// Kind of amendment requested
    pub correction_type: CorrectionType,
    /// Contact of the external requester, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_contact: Option<String>,
    /// What is wrong and why
    pub details: String,
    /// Triage status
    pub status: CorrectionStatus,
    /// Fixed at creation: `created_at + SLA_RESPONSE_DAYS`
    pub sla_deadline: DateTime<Utc>,
    /// Who triaged the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<ActorId>,
    /// When the request was triaged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Why the request was accepted or rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    /// When the accepted correction was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
    /// When the request was received
    pub created_at: DateTime<Utc>,
}

impl CorrectionRequest {
    /// Create a pending request with the SLA deadline fixed at `now + 7 days`
    pub fn new(
        fact_check_id: FactCheckId,
        correction_type: CorrectionType,
        details: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CorrectionId::generate(),
            fact_check_id,
            correction_type,
            requester_contact: None,
            details: details.into(),
            status: CorrectionStatus::Pending,
            sla_deadline: now + Duration::days(SLA_RESPONSE_DAYS),
            reviewed_by: None,
            reviewed_at: None,
            resolution_notes: None,
            applied_at: None,
            created_at: now,
        }
    }

    pub fn with_requester_contact(mut self, contact: impl Into<String>) -> Self {
        self.requester_contact = Some(contact.into());
        self
    }

    /// Whether the request has blown its SLA at the given instant.
    ///
    /// Derived from the clock on every read; only pending requests can
    /// be overdue.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == CorrectionStatus::Pending && now > self.sla_deadline
    }

    /// Check if the correction has been applied
    pub fn is_applied(&self) -> bool {
        self.status == CorrectionStatus::Applied
    }

    /// Move an accepted request to `applied` at the given instant
    pub fn mark_applied(&mut self, at: DateTime<Utc>) {
        self.status = CorrectionStatus::Applied;
        self.applied_at = Some(at);
    }
}

// ── Content and applications ─────────────────────────────────────────

/// The publishable content of a fact-check, snapshotted by applications
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FactCheckContent {
    /// The fact-check body
    pub body: String,
    /// The verdict rating, if assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Appended "Update (date): summary" notes, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update_notes: Vec<String>,
    /// Prominent correction banner, set by substantial corrections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_notice: Option<String>,
}

impl FactCheckContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            rating: None,
            update_notes: Vec::new(),
            correction_notice: None,
        }
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }
}

/// A versioned record of a correction being enacted on a fact-check.
///
/// Versions per fact-check are strictly increasing and gapless, and
/// exactly one application is current at any time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrectionApplication {
    /// Unique application identifier
    pub id: ApplicationId,
    /// The correction this application enacts
    pub correction_id: CorrectionId,
    /// The fact-check whose content changed
    pub fact_check_id: FactCheckId,
    /// Kind of amendment applied
    pub correction_type: CorrectionType,
    /// Who applied the correction
    pub applied_by: ActorId,
    /// Monotonically increasing, gapless version number per fact-check
    pub version: u32,
    /// Whether this is the fact-check's current revision
    pub is_current: bool,
    /// Human-readable summary of what changed
    pub changes_summary: String,
    /// Content before the correction
    pub previous_content: FactCheckContent,
    /// Content after the correction
    pub new_content: FactCheckContent,
    /// When the correction was applied
    pub applied_at: DateTime<Utc>,
}

impl CorrectionApplication {
    /// Only substantial corrections appear in the public corrections log
    pub fn in_public_log(&self) -> bool {
        self.correction_type == CorrectionType::Substantial
    }
}
