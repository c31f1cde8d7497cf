//! Editorial Workflow & Consensus Engine
//!
//! Governs the editorial lifecycle of fact-check submissions: a
//! 15-state workflow with role-gated transitions, peer-review consensus
//! as a veto gate on publication, and a parallel correction lifecycle
//! with SLA tracking and versioned content revisions.
//!
//! # Architecture
//!
//! - [`StateRegistry`] — Static table of legal transitions, minimum
//!   roles, and reason requirements. Closed world: unlisted pairs are
//!   illegal.
//! - [`TransitionValidator`] — Pure legality check over the registry,
//!   distinguishing missing-edge, insufficient-role, and missing-reason
//!   failures.
//! - [`WorkflowEngine`] — Orchestrates a transition: validate, enforce
//!   the consensus and peer-review-entry gates, commit history and state
//!   together under an optimistic-concurrency guard, emit a domain event.
//! - [`ConsensusCalculator`] — Pure function computing quorum and
//!   unanimity over peer reviews.
//! - [`CorrectionManager`] — Triage and application of post-publication
//!   corrections, with fixed SLA deadlines and gapless content versions.
//!
//! The engine decides and persists; authentication, notification
//! delivery, and HTTP surfaces are external collaborators behind the
//! [`editorial_store`] traits and the [`EventSink`] trait.
//!
//! # Example
//!
//! ```rust
//! use editorial_engine::WorkflowEngine;
//! use editorial_store::InMemoryEditorialStore;
//! use editorial_types::{Actor, Submission, WorkflowState};
//! use std::sync::Arc;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let engine = WorkflowEngine::new(Arc::new(InMemoryEditorialStore::new()));
//!     let reviewer = Actor::reviewer("rev-1");
//!
//!     let submission = engine
//!         .create_submission(Submission::new("Claim about turnout"), &reviewer)
//!         .await
//!         .unwrap();
//!
//!     engine
//!         .transition(&submission.id, &reviewer, WorkflowState::Queued, None)
//!         .await
//!         .unwrap();
//!
//!     let loaded = engine.submission(&submission.id).await.unwrap();
//!     assert_eq!(loaded.current_state, WorkflowState::Queued);
//! });
//! ```

#![deny(unsafe_code)]

pub mod consensus;
pub mod correction;
pub mod engine;
pub mod errors;
pub mod events;
pub mod policy;
pub mod registry;
pub mod validator;

pub use consensus::{ConsensusCalculator, PEER_REVIEW_QUORUM};
pub use correction::{CorrectionDecision, CorrectionManager};
pub use engine::WorkflowEngine;
pub use errors::{CorrectionError, CorrectionResult, WorkflowError, WorkflowResult};
pub use events::{EventSink, RecordingSink};
pub use policy::{EditorialPolicy, MIN_RESOLUTION_NOTES_LEN};
pub use registry::{StateRegistry, TransitionRule, TRANSITIONS};
pub use validator::TransitionValidator;
