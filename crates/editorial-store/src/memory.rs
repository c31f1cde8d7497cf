//! In-memory reference implementation of the editorial storage traits.
//!
//! Deterministic and test-friendly. Per-call atomicity is provided by
//! taking every lock a call needs before mutating anything.

use crate::traits::{CorrectionStore, ReviewStore, SubmissionStore};
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use editorial_types::{
    ActorId, CorrectionApplication, CorrectionId, CorrectionRequest, CorrectionStatus,
    FactCheckContent, FactCheckId, PeerReview, Submission, SubmissionId, WorkflowTransitionRecord,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory editorial storage adapter.
#[derive(Default)]
pub struct InMemoryEditorialStore {
    submissions: RwLock<HashMap<SubmissionId, Submission>>,
    histories: RwLock<HashMap<SubmissionId, Vec<WorkflowTransitionRecord>>>,
    reviews: RwLock<HashMap<FactCheckId, Vec<PeerReview>>>,
    corrections: RwLock<HashMap<CorrectionId, CorrectionRequest>>,
    applications: RwLock<HashMap<FactCheckId, Vec<CorrectionApplication>>>,
    contents: RwLock<HashMap<FactCheckId, FactCheckContent>>,
}

impl InMemoryEditorialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(which: &str) -> StoreError {
    StoreError::Backend(format!("{which} lock poisoned"))
}

#[async_trait]
impl SubmissionStore for InMemoryEditorialStore {
    async fn create_submission(
        &self,
        submission: Submission,
        initial_record: WorkflowTransitionRecord,
    ) -> StoreResult<()> {
        let mut subs = self.submissions.write().map_err(|_| poisoned("submissions"))?;
        let mut hists = self.histories.write().map_err(|_| poisoned("histories"))?;

        if subs.contains_key(&submission.id) {
            return Err(StoreError::DuplicateRecord(format!(
                "submission {} already exists",
                submission.id
            )));
        }
        if initial_record.submission_id != submission.id {
            return Err(StoreError::InvariantViolation(
                "initial record does not reference the submission".to_string(),
            ));
        }

        hists.insert(submission.id.clone(), vec![initial_record]);
        subs.insert(submission.id.clone(), submission);
        Ok(())
    }

    async fn get_submission(&self, id: &SubmissionId) -> StoreResult<Submission> {
        let subs = self.submissions.read().map_err(|_| poisoned("submissions"))?;
        subs.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("submission {id}")))
    }

    async fn list_submissions(&self) -> StoreResult<Vec<Submission>> {
        let subs = self.submissions.read().map_err(|_| poisoned("submissions"))?;
        Ok(subs.values().cloned().collect())
    }

    async fn save_transition(
        &self,
        record: WorkflowTransitionRecord,
        mut updated: Submission,
        expected_version: u64,
    ) -> StoreResult<()> {
        let mut subs = self.submissions.write().map_err(|_| poisoned("submissions"))?;
        let mut hists = self.histories.write().map_err(|_| poisoned("histories"))?;

        let stored = subs
            .get(&updated.id)
            .ok_or_else(|| StoreError::NotFound(format!("submission {}", updated.id)))?;

        if stored.version != expected_version {
            return Err(StoreError::Conflict(format!(
                "submission {} is at version {}, expected {}",
                updated.id, stored.version, expected_version
            )));
        }
        if record.submission_id != updated.id || record.to_state != updated.current_state {
            return Err(StoreError::InvariantViolation(
                "transition record disagrees with the updated submission".to_string(),
            ));
        }

        updated.version = expected_version + 1;
        updated.updated_at = Utc::now();
        hists.entry(updated.id.clone()).or_default().push(record);
        subs.insert(updated.id.clone(), updated);
        Ok(())
    }

    async fn assign_reviewer(&self, id: &SubmissionId, reviewer: ActorId) -> StoreResult<bool> {
        let mut subs = self.submissions.write().map_err(|_| poisoned("submissions"))?;
        let submission = subs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("submission {id}")))?;

        let inserted = submission.assigned_reviewers.insert(reviewer);
        if inserted {
            // Bumping the version makes any in-flight full-record write
            // lose its version check instead of erasing the assignment.
            submission.version += 1;
            submission.updated_at = Utc::now();
        }
        Ok(inserted)
    }

    async fn history(&self, id: &SubmissionId) -> StoreResult<Vec<WorkflowTransitionRecord>> {
        let hists = self.histories.read().map_err(|_| poisoned("histories"))?;
        hists
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("submission {id}")))
    }
}

#[async_trait]
impl ReviewStore for InMemoryEditorialStore {
    async fn upsert_review(&self, review: PeerReview) -> StoreResult<PeerReview> {
        let mut reviews = self.reviews.write().map_err(|_| poisoned("reviews"))?;
        let entries = reviews.entry(review.fact_check_id.clone()).or_default();

        match entries
            .iter_mut()
            .find(|r| r.reviewer_id == review.reviewer_id)
        {
            Some(existing) => {
                existing.update_decision(review.decision, review.comment);
                Ok(existing.clone())
            }
            None => {
                entries.push(review.clone());
                Ok(review)
            }
        }
    }

    async fn reviews_for(&self, fact_check_id: &FactCheckId) -> StoreResult<Vec<PeerReview>> {
        let reviews = self.reviews.read().map_err(|_| poisoned("reviews"))?;
        Ok(reviews.get(fact_check_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CorrectionStore for InMemoryEditorialStore {
    async fn create_correction(&self, request: CorrectionRequest) -> StoreResult<()> {
        let mut corrections = self.corrections.write().map_err(|_| poisoned("corrections"))?;
        if corrections.contains_key(&request.id) {
            return Err(StoreError::DuplicateRecord(format!(
                "correction {} already exists",
                request.id
            )));
        }
        corrections.insert(request.id.clone(), request);
        Ok(())
    }

    async fn get_correction(&self, id: &CorrectionId) -> StoreResult<CorrectionRequest> {
        let corrections = self.corrections.read().map_err(|_| poisoned("corrections"))?;
        corrections
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("correction {id}")))
    }

    async fn list_corrections(&self) -> StoreResult<Vec<CorrectionRequest>> {
        let corrections = self.corrections.read().map_err(|_| poisoned("corrections"))?;
        Ok(corrections.values().cloned().collect())
    }

    async fn update_correction(
        &self,
        updated: CorrectionRequest,
        expected_status: CorrectionStatus,
    ) -> StoreResult<()> {
        let mut corrections = self.corrections.write().map_err(|_| poisoned("corrections"))?;
        let stored = corrections
            .get(&updated.id)
            .ok_or_else(|| StoreError::NotFound(format!("correction {}", updated.id)))?;

        if stored.status != expected_status {
            return Err(StoreError::Conflict(format!(
                "correction {} is {:?}, expected {:?}",
                updated.id, stored.status, expected_status
            )));
        }
        corrections.insert(updated.id.clone(), updated);
        Ok(())
    }

    async fn record_application(&self, application: CorrectionApplication) -> StoreResult<()> {
        let mut applications = self.applications.write().map_err(|_| poisoned("applications"))?;
        let entries = applications
            .entry(application.fact_check_id.clone())
            .or_default();

        let max_version = entries.iter().map(|a| a.version).max().unwrap_or(0);
        if application.version != max_version + 1 {
            return Err(StoreError::InvariantViolation(format!(
                "application version {} for fact-check {} must be {}",
                application.version,
                application.fact_check_id,
                max_version + 1
            )));
        }
        if !application.is_current {
            return Err(StoreError::InvariantViolation(
                "a newly recorded application must be current".to_string(),
            ));
        }

        for entry in entries.iter_mut() {
            entry.is_current = false;
        }
        entries.push(application);
        Ok(())
    }

    async fn applications_for(
        &self,
        fact_check_id: &FactCheckId,
    ) -> StoreResult<Vec<CorrectionApplication>> {
        let applications = self.applications.read().map_err(|_| poisoned("applications"))?;
        let mut entries = applications.get(fact_check_id).cloned().unwrap_or_default();
        entries.sort_by_key(|a| a.version);
        Ok(entries)
    }

    async fn get_content(&self, fact_check_id: &FactCheckId) -> StoreResult<FactCheckContent> {
        let contents = self.contents.read().map_err(|_| poisoned("contents"))?;
        contents
            .get(fact_check_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("content for fact-check {fact_check_id}")))
    }

    async fn put_content(
        &self,
        fact_check_id: &FactCheckId,
        content: FactCheckContent,
    ) -> StoreResult<()> {
        let mut contents = self.contents.write().map_err(|_| poisoned("contents"))?;
        contents.insert(fact_check_id.clone(), content);
        Ok(())
    }
}
