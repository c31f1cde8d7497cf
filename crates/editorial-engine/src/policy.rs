//! Editorial policy: the tunable thresholds of the engine
//!
//! Defaults mirror the named constants; a host service can deserialize a
//! policy from its configuration file and hand it to the engine.

use crate::consensus::PEER_REVIEW_QUORUM;
use editorial_types::{ENGAGEMENT_PEER_REVIEW_THRESHOLD, SLA_RESPONSE_DAYS};
use serde::{Deserialize, Serialize};

/// Minimum length of resolution notes on a correction accept/reject
pub const MIN_RESOLUTION_NOTES_LEN: usize = 10;

/// Tunable editorial thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialPolicy {
    /// Distinct peer reviewers required before consensus can be evaluated
    pub peer_review_quorum: usize,
    /// Engagement score at which peer review becomes mandatory
    pub engagement_threshold: u32,
    /// Days allowed to triage a correction request
    pub sla_response_days: i64,
    /// Minimum length of correction resolution notes
    pub min_resolution_notes_len: usize,
}

impl Default for EditorialPolicy {
    fn default() -> Self {
        Self {
            peer_review_quorum: PEER_REVIEW_QUORUM,
            engagement_threshold: ENGAGEMENT_PEER_REVIEW_THRESHOLD,
            sla_response_days: SLA_RESPONSE_DAYS,
            min_resolution_notes_len: MIN_RESOLUTION_NOTES_LEN,
        }
    }
}
