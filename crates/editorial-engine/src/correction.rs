//! Correction lifecycle: triage, review, and application of amendments
//!
//! A structurally parallel state machine to the workflow proper:
//! `pending -> {accepted, rejected}`, then `accepted -> applied` exactly
//! once. Application writes a new versioned content revision whose
//! effect depends on the correction type. The manager reads submission
//! workflow state but never mutates it.

use crate::events::EventSink;
use crate::policy::EditorialPolicy;
use crate::{CorrectionError, CorrectionResult};
use chrono::{Duration, Utc};
use editorial_store::{EditorialStore, StoreError};
use editorial_types::{
    Actor, ApplicationId, CorrectionApplication, CorrectionApplied, CorrectionId,
    CorrectionRequest, CorrectionStatus, CorrectionType, FactCheckContent, FactCheckId, Role,
};
use std::sync::Arc;

/// The triage decision on a pending correction request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrectionDecision {
    Accept,
    Reject,
}

/// Manages correction requests from intake through application
pub struct CorrectionManager<S> {
    store: Arc<S>,
    policy: EditorialPolicy,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl<S: EditorialStore> CorrectionManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, EditorialPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: EditorialPolicy) -> Self {
        Self {
            store,
            policy,
            sinks: Vec::new(),
        }
    }

    /// Register a domain event subscriber
    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    // ── Intake ───────────────────────────────────────────────────────

    /// Accept a correction request into triage.
    ///
    /// The SLA deadline is fixed here — request time plus the policy's
    /// response window — and never recomputed.
    pub async fn submit(
        &self,
        fact_check_id: &FactCheckId,
        correction_type: CorrectionType,
        details: &str,
        requester_contact: Option<String>,
    ) -> CorrectionResult<CorrectionRequest> {
        if details.trim().is_empty() {
            return Err(CorrectionError::Validation(
                "correction details must not be empty".to_string(),
            ));
        }

        let mut request =
            CorrectionRequest::new(fact_check_id.clone(), correction_type, details.trim());
        request.sla_deadline = request.created_at + Duration::days(self.policy.sla_response_days);
        request.requester_contact = requester_contact;

        self.store.create_correction(request.clone()).await?;
        tracing::info!(
            correction_id = %request.id,
            fact_check_id = %fact_check_id,
            correction_type = %correction_type,
            "correction request submitted"
        );
        Ok(request)
    }

    // ── Triage ───────────────────────────────────────────────────────

    /// Accept or reject a pending request.
    ///
    /// Requires an admin and resolution notes of at least the policy
    /// minimum — an unexplained decision is a usage error. Guarded by a
    /// status precondition so two concurrent triagers cannot both win.
    pub async fn review(
        &self,
        correction_id: &CorrectionId,
        reviewer: &Actor,
        decision: CorrectionDecision,
        resolution_notes: &str,
    ) -> CorrectionResult<CorrectionRequest> {
        if reviewer.role < Role::Admin {
            return Err(CorrectionError::RoleInsufficient {
                required: Role::Admin,
                actual: reviewer.role,
            });
        }
        if resolution_notes.trim().chars().count() < self.policy.min_resolution_notes_len {
            return Err(CorrectionError::Validation(format!(
                "resolution notes must be at least {} characters",
                self.policy.min_resolution_notes_len
            )));
        }

        let mut correction = self.load(correction_id).await?;
        if correction.status != CorrectionStatus::Pending {
            return Err(CorrectionError::InvalidStatus {
                id: correction_id.clone(),
                status: correction.status,
                required: CorrectionStatus::Pending,
            });
        }

        correction.status = match decision {
            CorrectionDecision::Accept => CorrectionStatus::Accepted,
            CorrectionDecision::Reject => CorrectionStatus::Rejected,
        };
        correction.reviewed_by = Some(reviewer.id.clone());
        correction.reviewed_at = Some(Utc::now());
        correction.resolution_notes = Some(resolution_notes.trim().to_string());

        self.store
            .update_correction(correction.clone(), CorrectionStatus::Pending)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    CorrectionError::ConcurrentModification(correction_id.clone())
                }
                other => CorrectionError::Store(other),
            })?;

        tracing::info!(
            correction_id = %correction_id,
            reviewer = %reviewer.id,
            decision = ?decision,
            "correction request triaged"
        );
        Ok(correction)
    }

    // ── Application ──────────────────────────────────────────────────

    /// Apply an accepted correction, producing the fact-check's next
    /// content revision.
    ///
    /// Effect by type: minor corrections swap the body silently; updates
    /// append a dated note; substantial corrections may change the
    /// rating, attach a prominent notice, and enter the public
    /// corrections log. `new_rating` is honored only for substantial
    /// corrections.
    ///
    /// The `accepted -> applied` status flip is the concurrency fence:
    /// it commits first under a status precondition, so of two appliers
    /// holding the same accepted snapshot exactly one wins and the loser
    /// gets [`CorrectionError::ConcurrentModification`]. A retry after a
    /// post-claim failure surfaces `AlreadyApplied`, never a duplicate
    /// content version.
    pub async fn apply(
        &self,
        correction_id: &CorrectionId,
        applier: &Actor,
        changes_summary: &str,
        new_body: &str,
        new_rating: Option<String>,
    ) -> CorrectionResult<CorrectionApplication> {
        if applier.role < Role::Admin {
            return Err(CorrectionError::RoleInsufficient {
                required: Role::Admin,
                actual: applier.role,
            });
        }
        if changes_summary.trim().is_empty() {
            return Err(CorrectionError::Validation(
                "changes summary must not be empty".to_string(),
            ));
        }

        let mut correction = self.load(correction_id).await?;
        if correction.is_applied() {
            return Err(CorrectionError::AlreadyApplied(correction_id.clone()));
        }
        if correction.status != CorrectionStatus::Accepted {
            return Err(CorrectionError::InvalidStatus {
                id: correction_id.clone(),
                status: correction.status,
                required: CorrectionStatus::Accepted,
            });
        }

        let fact_check_id = correction.fact_check_id.clone();
        let previous = self.store.get_content(&fact_check_id).await?;
        let applied_at = Utc::now();
        let stamp = applied_at.format("%Y-%m-%d");
        let summary = changes_summary.trim();

        // Claim the correction before touching content: a racing applier
        // still expecting 'accepted' loses this CAS.
        correction.mark_applied(applied_at);
        self.store
            .update_correction(correction.clone(), CorrectionStatus::Accepted)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    CorrectionError::ConcurrentModification(correction_id.clone())
                }
                other => CorrectionError::Store(other),
            })?;

        let mut new_content = previous.clone();
        new_content.body = new_body.to_string();
        match correction.correction_type {
            CorrectionType::Minor => {}
            CorrectionType::Update => {
                new_content
                    .update_notes
                    .push(format!("Update ({stamp}): {summary}"));
            }
            CorrectionType::Substantial => {
                if let Some(rating) = new_rating {
                    new_content.rating = Some(rating);
                }
                new_content.correction_notice = Some(format!("Correction ({stamp}): {summary}"));
            }
        }

        let next_version = self
            .store
            .applications_for(&fact_check_id)
            .await?
            .iter()
            .map(|a| a.version)
            .max()
            .unwrap_or(0)
            + 1;

        let application = CorrectionApplication {
            id: ApplicationId::generate(),
            correction_id: correction_id.clone(),
            fact_check_id: fact_check_id.clone(),
            correction_type: correction.correction_type,
            applied_by: applier.id.clone(),
            version: next_version,
            is_current: true,
            changes_summary: summary.to_string(),
            previous_content: previous,
            new_content: new_content.clone(),
            applied_at,
        };

        self.store.record_application(application.clone()).await?;
        self.store.put_content(&fact_check_id, new_content).await?;

        tracing::info!(
            correction_id = %correction_id,
            fact_check_id = %fact_check_id,
            version = next_version,
            "correction applied"
        );
        self.emit_applied(&application);
        Ok(application)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Load one correction request
    pub async fn correction(&self, id: &CorrectionId) -> CorrectionResult<CorrectionRequest> {
        self.load(id).await
    }

    /// Pending requests past their SLA deadline, most overdue first
    pub async fn overdue(
        &self,
        now: chrono::DateTime<Utc>,
    ) -> CorrectionResult<Vec<CorrectionRequest>> {
        let mut overdue: Vec<_> = self
            .store
            .list_corrections()
            .await?
            .into_iter()
            .filter(|c| c.is_overdue(now))
            .collect();
        overdue.sort_by_key(|c| c.sla_deadline);
        Ok(overdue)
    }

    /// Application history of a fact-check, oldest version first
    pub async fn applications(
        &self,
        fact_check_id: &FactCheckId,
    ) -> CorrectionResult<Vec<CorrectionApplication>> {
        Ok(self.store.applications_for(fact_check_id).await?)
    }

    /// The entries a fact-check contributes to the public corrections
    /// log: substantial applications only
    pub async fn public_log(
        &self,
        fact_check_id: &FactCheckId,
    ) -> CorrectionResult<Vec<CorrectionApplication>> {
        Ok(self
            .store
            .applications_for(fact_check_id)
            .await?
            .into_iter()
            .filter(|a| a.in_public_log())
            .collect())
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn load(&self, id: &CorrectionId) -> CorrectionResult<CorrectionRequest> {
        self.store.get_correction(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => CorrectionError::NotFound(id.clone()),
            other => CorrectionError::Store(other),
        })
    }

    fn emit_applied(&self, application: &CorrectionApplication) {
        let event = CorrectionApplied {
            correction_id: application.correction_id.clone(),
            fact_check_id: application.fact_check_id.clone(),
            correction_type: application.correction_type,
            version: application.version,
            applied_by: application.applied_by.clone(),
            occurred_at: application.applied_at,
        };
        for sink in &self.sinks {
            sink.correction_applied(&event);
        }
    }
}
