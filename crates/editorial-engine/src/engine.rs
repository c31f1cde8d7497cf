//! Workflow engine: orchestrates submission state transitions
//!
//! The engine validates a requested transition against the registry,
//! enforces the consensus and peer-review-entry preconditions, and
//! commits the history record and the updated submission together under
//! an optimistic-concurrency guard. It never retains a submission
//! instance across calls; the store is the single owner of persisted
//! state.

use crate::consensus::ConsensusCalculator;
use crate::events::EventSink;
use crate::policy::EditorialPolicy;
use crate::validator::TransitionValidator;
use crate::{WorkflowError, WorkflowResult};
use editorial_store::{EditorialStore, StoreError};
use editorial_types::{
    Actor, ConsensusReport, FactCheckId, PeerReview, ReviewDecision, Submission, SubmissionId,
    TransitionOccurred, WorkflowState, WorkflowTransitionRecord,
};
use std::sync::Arc;

/// The workflow engine — decides, persists, and emits; nothing else
pub struct WorkflowEngine<S> {
    store: Arc<S>,
    validator: TransitionValidator,
    consensus: ConsensusCalculator,
    policy: EditorialPolicy,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl<S: EditorialStore> WorkflowEngine<S> {
    /// Create an engine with the default editorial policy
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, EditorialPolicy::default())
    }

    /// Create an engine with an explicit policy
    pub fn with_policy(store: Arc<S>, policy: EditorialPolicy) -> Self {
        Self {
            store,
            validator: TransitionValidator::new(),
            consensus: ConsensusCalculator::with_quorum(policy.peer_review_quorum),
            policy,
            sinks: Vec::new(),
        }
    }

    /// Register a domain event subscriber
    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn policy(&self) -> &EditorialPolicy {
        &self.policy
    }

    // ── Submission lifecycle ─────────────────────────────────────────

    /// Persist a new submission in `submitted`, writing its initial
    /// history record and emitting the first transition event.
    pub async fn create_submission(
        &self,
        submission: Submission,
        actor: &Actor,
    ) -> WorkflowResult<Submission> {
        if submission.current_state != WorkflowState::Submitted {
            return Err(WorkflowError::Validation(
                "new submissions must start in 'submitted'".to_string(),
            ));
        }
        if submission.title.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "submission title must not be empty".to_string(),
            ));
        }

        let record = WorkflowTransitionRecord::initial(
            submission.id.clone(),
            actor.id.clone(),
            actor.role,
        );
        self.store
            .create_submission(submission.clone(), record.clone())
            .await?;

        tracing::info!(
            submission_id = %submission.id,
            actor = %actor.id,
            "submission created"
        );
        self.emit_transition(&record);
        Ok(submission)
    }

    /// Perform a workflow transition.
    ///
    /// Validates the edge, enforces the consensus gate on
    /// `peer_review -> final_approval` and the qualification gate on
    /// entry into `peer_review`, then commits the history record and the
    /// state change atomically. A concurrent writer that raced this call
    /// gets [`WorkflowError::ConcurrentModification`] and must reload;
    /// the engine never retries on its own.
    pub async fn transition(
        &self,
        submission_id: &SubmissionId,
        actor: &Actor,
        to_state: WorkflowState,
        reason: Option<&str>,
    ) -> WorkflowResult<WorkflowTransitionRecord> {
        let submission = self.load(submission_id).await?;
        let from_state = submission.current_state;

        self.validator
            .validate(from_state, to_state, actor.role, reason)?;

        // Consensus gate: leaving peer review for final approval needs
        // unanimous terminal agreement among a quorum of reviewers.
        if from_state == WorkflowState::PeerReview && to_state == WorkflowState::FinalApproval {
            let reviews = self.store.reviews_for(&submission.fact_check_id).await?;
            let report = self.consensus.compute(&reviews);
            if report.needs_more_reviewers {
                return Err(WorkflowError::NeedsMoreReviewers {
                    have: report.total(),
                    quorum: self.consensus.quorum(),
                });
            }
            if !report.approved {
                return Err(WorkflowError::ConsensusNotReached {
                    approved: report.approved_count,
                    rejected: report.rejected_count,
                    pending: report.pending_count,
                });
            }
        }

        // Qualification gate: peer review is only entered by submissions
        // that require it. Not a silent skip — an explicit failure.
        if to_state == WorkflowState::PeerReview
            && !submission.requires_peer_review_at(self.policy.engagement_threshold)
        {
            return Err(WorkflowError::PeerReviewNotRequired(submission.id.clone()));
        }

        let mut updated = submission.clone();
        updated.current_state = to_state;

        let mut record = WorkflowTransitionRecord::new(
            submission.id.clone(),
            from_state,
            to_state,
            actor.id.clone(),
            actor.role,
        );
        if let Some(reason) = reason {
            record = record.with_reason(reason.trim());
        }

        self.store
            .save_transition(record.clone(), updated, submission.version)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    tracing::warn!(
                        submission_id = %submission_id,
                        "transition lost optimistic-concurrency race"
                    );
                    WorkflowError::ConcurrentModification(submission_id.clone())
                }
                StoreError::NotFound(_) => WorkflowError::SubmissionNotFound(submission_id.clone()),
                other => WorkflowError::Store(other),
            })?;

        tracing::info!(
            submission_id = %submission_id,
            from = %from_state,
            to = %to_state,
            actor = %actor.id,
            "workflow transition committed"
        );
        self.emit_transition(&record);
        Ok(record)
    }

    /// Self-assign a reviewer to a submission.
    ///
    /// Idempotent: assigning an already-assigned reviewer returns
    /// `Ok(false)`, not an error. The store performs a set-insert, so a
    /// concurrent second reviewer's assignment is never lost.
    pub async fn self_assign(
        &self,
        submission_id: &SubmissionId,
        actor: &Actor,
    ) -> WorkflowResult<bool> {
        let inserted = self
            .store
            .assign_reviewer(submission_id, actor.id.clone())
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => WorkflowError::SubmissionNotFound(submission_id.clone()),
                other => WorkflowError::Store(other),
            })?;

        if inserted {
            tracing::info!(
                submission_id = %submission_id,
                reviewer = %actor.id,
                "reviewer self-assigned"
            );
        }
        Ok(inserted)
    }

    // ── Peer review ──────────────────────────────────────────────────

    /// Record (or update) a reviewer's decision and return the freshly
    /// recomputed consensus. One review per (fact-check, reviewer): a
    /// repeat submission updates the existing review in place.
    pub async fn submit_review(
        &self,
        fact_check_id: &FactCheckId,
        reviewer: &Actor,
        decision: ReviewDecision,
        comment: Option<String>,
    ) -> WorkflowResult<ConsensusReport> {
        let mut review = PeerReview::new(fact_check_id.clone(), reviewer.id.clone(), decision);
        review.comment = comment;
        self.store.upsert_review(review).await?;

        let report = self.consensus(fact_check_id).await?;
        tracing::info!(
            fact_check_id = %fact_check_id,
            reviewer = %reviewer.id,
            decision = ?decision,
            consensus = report.consensus_reached,
            "peer review recorded"
        );
        Ok(report)
    }

    /// The current consensus over all reviews of a fact-check
    pub async fn consensus(&self, fact_check_id: &FactCheckId) -> WorkflowResult<ConsensusReport> {
        let reviews = self.store.reviews_for(fact_check_id).await?;
        Ok(self.consensus.compute(&reviews))
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Load a submission
    pub async fn submission(&self, id: &SubmissionId) -> WorkflowResult<Submission> {
        self.load(id).await
    }

    /// The ordered transition history of a submission
    pub async fn history(
        &self,
        id: &SubmissionId,
    ) -> WorkflowResult<Vec<WorkflowTransitionRecord>> {
        self.store.history(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => WorkflowError::SubmissionNotFound(id.clone()),
            other => WorkflowError::Store(other),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn load(&self, id: &SubmissionId) -> WorkflowResult<Submission> {
        self.store.get_submission(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => WorkflowError::SubmissionNotFound(id.clone()),
            other => WorkflowError::Store(other),
        })
    }

    fn emit_transition(&self, record: &WorkflowTransitionRecord) {
        let event = TransitionOccurred {
            submission_id: record.submission_id.clone(),
            from_state: record.from_state,
            to_state: record.to_state,
            actor_id: record.actor_id.clone(),
            actor_role: record.actor_role,
            occurred_at: record.occurred_at,
        };
        for sink in &self.sinks {
            sink.transition_occurred(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use editorial_store::{InMemoryEditorialStore, SubmissionStore};
    use editorial_types::{history_is_consistent, ClaimCategory};

    async fn engine_with(
        submission: Submission,
    ) -> (WorkflowEngine<InMemoryEditorialStore>, SubmissionId) {
        let store = Arc::new(InMemoryEditorialStore::new());
        let engine = WorkflowEngine::new(store);
        let actor = Actor::reviewer("intake");
        let stored = engine.create_submission(submission, &actor).await.unwrap();
        let id = stored.id.clone();
        (engine, id)
    }

    #[tokio::test]
    async fn test_create_writes_initial_record() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let history = engine.history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].from_state.is_none());
        assert_eq!(history[0].to_state, WorkflowState::Submitted);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = Arc::new(InMemoryEditorialStore::new());
        let engine = WorkflowEngine::new(store);
        let err = engine
            .create_submission(Submission::new("  "), &Actor::reviewer("intake"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_legal_transition_updates_state_and_history() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let reviewer = Actor::reviewer("rev-1");

        let record = engine
            .transition(&id, &reviewer, WorkflowState::Queued, None)
            .await
            .unwrap();
        assert_eq!(record.from_state, Some(WorkflowState::Submitted));
        assert_eq!(record.to_state, WorkflowState::Queued);

        let submission = engine.submission(&id).await.unwrap();
        assert_eq!(submission.current_state, WorkflowState::Queued);
        assert_eq!(submission.version, 2);

        let history = engine.history(&id).await.unwrap();
        assert!(history_is_consistent(&history));
        assert_eq!(history.last().unwrap().to_state, submission.current_state);
    }

    #[tokio::test]
    async fn test_illegal_transition_leaves_state_unchanged() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;

        let err = engine
            .transition(&id, &Actor::super_admin("root"), WorkflowState::Published, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoSuchTransition { .. }));

        let submission = engine.submission(&id).await.unwrap();
        assert_eq!(submission.current_state, WorkflowState::Submitted);
        assert_eq!(engine.history(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_self_loop_always_illegal() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let err = engine
            .transition(&id, &Actor::super_admin("root"), WorkflowState::Submitted, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoSuchTransition { .. }));
    }

    #[tokio::test]
    async fn test_role_gate() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let reviewer = Actor::reviewer("rev-1");

        let err = engine
            .transition(&id, &reviewer, WorkflowState::Rejected, Some("spam"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::RoleInsufficient { .. }));
    }

    #[tokio::test]
    async fn test_reason_gate() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let admin = Actor::admin("ed-1");

        let err = engine
            .transition(&id, &admin, WorkflowState::Rejected, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::ReasonRequired { .. }));

        engine
            .transition(&id, &admin, WorkflowState::Rejected, Some("Out of scope"))
            .await
            .unwrap();
        let history = engine.history(&id).await.unwrap();
        assert_eq!(history.last().unwrap().reason.as_deref(), Some("Out of scope"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let store = Arc::new(InMemoryEditorialStore::new());
        let engine = WorkflowEngine::new(store);
        let err = engine
            .transition(
                &SubmissionId::new("missing"),
                &Actor::admin("ed-1"),
                WorkflowState::Queued,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::SubmissionNotFound(_)));
    }

    #[tokio::test]
    async fn test_peer_review_entry_requires_qualification() {
        let (engine, id) = engine_with(Submission::new("Local sports claim")).await;
        let admin = Actor::admin("ed-1");
        let reviewer = Actor::reviewer("rev-1");

        for (actor, state) in [
            (&reviewer, WorkflowState::Queued),
            (&reviewer, WorkflowState::Assigned),
            (&reviewer, WorkflowState::InResearch),
            (&reviewer, WorkflowState::DraftReady),
        ] {
            engine.transition(&id, actor, state, None).await.unwrap();
        }

        let err = engine
            .transition(&id, &admin, WorkflowState::PeerReview, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::PeerReviewNotRequired(_)));

        // The sibling path through admin review stays open
        engine
            .transition(&id, &reviewer, WorkflowState::AdminReview, None)
            .await
            .unwrap();
        engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_consensus_gate_on_peer_review_exit() {
        let (engine, id) = engine_with(
            Submission::new("Vaccine claim").with_claim_category(ClaimCategory::HealthSafety),
        )
        .await;
        let admin = Actor::admin("ed-1");
        let reviewer = Actor::reviewer("rev-1");

        for (actor, state) in [
            (&reviewer, WorkflowState::Queued),
            (&reviewer, WorkflowState::Assigned),
            (&reviewer, WorkflowState::InResearch),
            (&reviewer, WorkflowState::DraftReady),
            (&admin, WorkflowState::PeerReview),
        ] {
            engine.transition(&id, actor, state, None).await.unwrap();
        }

        let fact_check_id = engine.submission(&id).await.unwrap().fact_check_id;

        // No reviews yet: quorum unmet
        let err = engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NeedsMoreReviewers { have: 0, quorum: 2 }));

        // One approval: still below quorum
        engine
            .submit_review(&fact_check_id, &Actor::reviewer("peer-1"), ReviewDecision::Approved, None)
            .await
            .unwrap();
        let err = engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NeedsMoreReviewers { have: 1, quorum: 2 }));

        // A rejection vetoes even at quorum
        engine
            .submit_review(
                &fact_check_id,
                &Actor::reviewer("peer-2"),
                ReviewDecision::Rejected,
                Some("Source does not support the claim".into()),
            )
            .await
            .unwrap();
        let err = engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::ConsensusNotReached { approved: 1, rejected: 1, pending: 0 }
        ));

        // The second reviewer revises to approval: gate opens
        let report = engine
            .submit_review(&fact_check_id, &Actor::reviewer("peer-2"), ReviewDecision::Approved, None)
            .await
            .unwrap();
        assert!(report.approved);
        engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_admin_review_exit_skips_consensus_gate() {
        // The non-peer-review path to final approval needs no reviews
        let (engine, id) = engine_with(Submission::new("Plain claim")).await;
        let admin = Actor::admin("ed-1");
        let reviewer = Actor::reviewer("rev-1");

        for (actor, state) in [
            (&reviewer, WorkflowState::Queued),
            (&reviewer, WorkflowState::Assigned),
            (&reviewer, WorkflowState::InResearch),
            (&reviewer, WorkflowState::DraftReady),
            (&reviewer, WorkflowState::AdminReview),
        ] {
            engine.transition(&id, actor, state, None).await.unwrap();
        }

        engine
            .transition(&id, &admin, WorkflowState::FinalApproval, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_self_assignment_idempotent() {
        let (engine, id) = engine_with(Submission::new("Claim")).await;
        let reviewer = Actor::reviewer("rev-1");

        assert!(engine.self_assign(&id, &reviewer).await.unwrap());
        assert!(!engine.self_assign(&id, &reviewer).await.unwrap());
        assert!(engine.self_assign(&id, &Actor::reviewer("rev-2")).await.unwrap());

        let submission = engine.submission(&id).await.unwrap();
        assert_eq!(submission.assigned_reviewers.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_writers_one_wins() {
        let store = Arc::new(InMemoryEditorialStore::new());
        let engine = WorkflowEngine::new(store.clone());
        let reviewer = Actor::reviewer("rev-1");
        let stored = engine
            .create_submission(Submission::new("Raced claim"), &reviewer)
            .await
            .unwrap();

        // Two writers loaded the same snapshot. The first commits
        // through the engine and bumps the version.
        engine
            .transition(&stored.id, &reviewer, WorkflowState::Queued, None)
            .await
            .unwrap();

        // The second still holds the stale version and loses its CAS.
        let mut stale = stored.clone();
        stale.current_state = WorkflowState::Queued;
        let record = WorkflowTransitionRecord::new(
            stored.id.clone(),
            WorkflowState::Submitted,
            WorkflowState::Queued,
            reviewer.id.clone(),
            reviewer.role,
        );
        let err = store
            .save_transition(record, stale, stored.version)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Exactly one Queued record exists
        let history = engine.history(&stored.id).await.unwrap();
        assert_eq!(
            history
                .iter()
                .filter(|r| r.to_state == WorkflowState::Queued)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_events_emitted_on_commit_only() {
        let store = Arc::new(InMemoryEditorialStore::new());
        let sink = Arc::new(RecordingSink::new());
        let mut engine = WorkflowEngine::new(store);
        engine.subscribe(sink.clone());

        let reviewer = Actor::reviewer("rev-1");
        let stored = engine
            .create_submission(Submission::new("Claim"), &reviewer)
            .await
            .unwrap();
        engine
            .transition(&stored.id, &reviewer, WorkflowState::Queued, None)
            .await
            .unwrap();

        // A failed transition emits nothing
        let _ = engine
            .transition(&stored.id, &reviewer, WorkflowState::Published, None)
            .await
            .unwrap_err();

        let events = sink.transitions();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_state, WorkflowState::Submitted);
        assert_eq!(events[1].to_state, WorkflowState::Queued);
    }
}
