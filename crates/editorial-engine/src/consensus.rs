//! Peer-review consensus: unanimous terminal agreement under a quorum
//!
//! A pure function over the set of reviews — identical inputs always
//! produce identical reports, so consensus can be recomputed after every
//! review write with no bookkeeping. Peer review is a veto gate, not a
//! vote: one rejection blocks approval no matter how many approve.

use editorial_types::{ConsensusReport, PeerReview, ReviewDecision};
use std::collections::BTreeSet;

/// Minimum number of distinct reviewers before consensus can be evaluated
pub const PEER_REVIEW_QUORUM: usize = 2;

/// Computes consensus status over the reviews of a fact-check
#[derive(Clone, Copy, Debug)]
pub struct ConsensusCalculator {
    quorum: usize,
}

impl ConsensusCalculator {
    pub fn new() -> Self {
        Self {
            quorum: PEER_REVIEW_QUORUM,
        }
    }

    pub fn with_quorum(quorum: usize) -> Self {
        Self { quorum }
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }

    /// Compute the consensus report for a set of reviews.
    ///
    /// - Fewer distinct reviewers than the quorum: `needs_more_reviewers`,
    ///   no consensus, regardless of individual decisions.
    /// - Any pending review keeps consensus unreached even past quorum.
    /// - `approved` requires consensus plus unanimity.
    pub fn compute(&self, reviews: &[PeerReview]) -> ConsensusReport {
        let mut approved_count = 0;
        let mut rejected_count = 0;
        let mut pending_count = 0;
        let mut reviewers = BTreeSet::new();

        for review in reviews {
            reviewers.insert(&review.reviewer_id);
            match review.decision {
                ReviewDecision::Approved => approved_count += 1,
                ReviewDecision::Rejected => rejected_count += 1,
                ReviewDecision::Pending => pending_count += 1,
            }
        }

        let needs_more_reviewers = reviewers.len() < self.quorum;
        let consensus_reached = !reviews.is_empty() && !needs_more_reviewers && pending_count == 0;
        let approved = consensus_reached && rejected_count == 0;

        ConsensusReport {
            consensus_reached,
            approved,
            approved_count,
            rejected_count,
            pending_count,
            needs_more_reviewers,
        }
    }
}

impl Default for ConsensusCalculator {
    fn default() -> Self {
        Self::new()
    }
}
