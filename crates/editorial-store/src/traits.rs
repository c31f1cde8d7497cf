use crate::StoreResult;
use async_trait::async_trait;
use editorial_types::{
    ActorId, CorrectionApplication, CorrectionId, CorrectionRequest, CorrectionStatus,
    FactCheckContent, FactCheckId, PeerReview, Submission, SubmissionId, WorkflowTransitionRecord,
};

/// Storage interface for submissions and their transition history.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert a new submission together with its initial history record.
    /// Fails with `DuplicateRecord` if the id already exists.
    async fn create_submission(
        &self,
        submission: Submission,
        initial_record: WorkflowTransitionRecord,
    ) -> StoreResult<()>;

    /// Get one submission by id.
    async fn get_submission(&self, id: &SubmissionId) -> StoreResult<Submission>;

    /// List all submissions.
    async fn list_submissions(&self) -> StoreResult<Vec<Submission>>;

    /// Atomically append a transition record and replace the submission,
    /// iff the stored version equals `expected_version` (compare-and-swap).
    /// The store bumps the committed submission's version to
    /// `expected_version + 1`; a losing writer gets `Conflict` and must
    /// reload. Both writes commit together or not at all.
    async fn save_transition(
        &self,
        record: WorkflowTransitionRecord,
        updated: Submission,
        expected_version: u64,
    ) -> StoreResult<()>;

    /// Atomically add a reviewer to the submission's assigned set.
    /// Returns `false` (not an error) when the reviewer was already
    /// assigned. Set-insert: concurrent assignments never overwrite
    /// each other, and an effective insert bumps the submission version
    /// so racing full-record writes fail their version check.
    async fn assign_reviewer(&self, id: &SubmissionId, reviewer: ActorId) -> StoreResult<bool>;

    /// The ordered transition history of a submission, oldest first.
    async fn history(&self, id: &SubmissionId) -> StoreResult<Vec<WorkflowTransitionRecord>>;
}

/// Storage interface for peer reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert or update the review keyed by (fact-check, reviewer).
    /// An existing review keeps its identity and creation time; only the
    /// decision and comment change. Returns the canonical stored record.
    async fn upsert_review(&self, review: PeerReview) -> StoreResult<PeerReview>;

    /// All reviews for a fact-check, one per distinct reviewer.
    async fn reviews_for(&self, fact_check_id: &FactCheckId) -> StoreResult<Vec<PeerReview>>;
}

/// Storage interface for correction requests, applications, and content.
#[async_trait]
pub trait CorrectionStore: Send + Sync {
    /// Insert a new correction request.
    async fn create_correction(&self, request: CorrectionRequest) -> StoreResult<()>;

    /// Get one correction request by id.
    async fn get_correction(&self, id: &CorrectionId) -> StoreResult<CorrectionRequest>;

    /// List all correction requests.
    async fn list_corrections(&self) -> StoreResult<Vec<CorrectionRequest>>;

    /// Replace a correction request iff its stored status equals
    /// `expected_status`; a losing writer gets `Conflict`.
    async fn update_correction(
        &self,
        updated: CorrectionRequest,
        expected_status: CorrectionStatus,
    ) -> StoreResult<()>;

    /// Atomically record a correction application: verifies the version
    /// is exactly one past the fact-check's current maximum, clears the
    /// previously current application's `is_current`, and appends.
    async fn record_application(&self, application: CorrectionApplication) -> StoreResult<()>;

    /// All applications for a fact-check, ordered by version ascending.
    async fn applications_for(
        &self,
        fact_check_id: &FactCheckId,
    ) -> StoreResult<Vec<CorrectionApplication>>;

    /// Get the current content of a fact-check.
    async fn get_content(&self, fact_check_id: &FactCheckId) -> StoreResult<FactCheckContent>;

    /// Replace the current content of a fact-check.
    async fn put_content(
        &self,
        fact_check_id: &FactCheckId,
        content: FactCheckContent,
    ) -> StoreResult<()>;
}

/// Unified storage bundle consumed by the workflow engine.
pub trait EditorialStore: SubmissionStore + ReviewStore + CorrectionStore + Send + Sync {}

impl<T> EditorialStore for T where T: SubmissionStore + ReviewStore + CorrectionStore + Send + Sync {}
