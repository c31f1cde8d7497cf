//! Editorial Domain Types
//!
//! A fact-check moves through an editorial lifecycle: intake, research,
//! multi-tier review, peer-review consensus, publication, and
//! post-publication correction. These types are the vocabulary of that
//! lifecycle.
//!
//! # Key Concepts
//!
//! - **Submission**: A unit of editorial work, always in exactly one
//!   [`WorkflowState`]. Mutated only through the workflow engine.
//! - **WorkflowTransitionRecord**: An append-only audit entry. The ordered
//!   sequence of records for a submission reconstructs its full history.
//! - **PeerReview**: One reviewer's decision during the peer-review phase.
//!   At most one per (fact-check, reviewer) pair.
//! - **CorrectionRequest**: A request to amend a published fact-check,
//!   with a fixed 7-day SLA deadline.
//! - **CorrectionApplication**: A versioned record of a correction being
//!   enacted, with before/after content snapshots.
//!
//! # Design Principles
//!
//! 1. State changes happen only through the engine. No implicit mutation.
//! 2. History is append-only and always ends at the current state.
//! 3. Derived properties (overdue-ness, peer-review qualification) are
//!    computed from fields, never cached.

#![deny(unsafe_code)]

mod actor;
mod correction;
mod event;
mod review;
mod state;
mod submission;
mod transition;

pub use actor::*;
pub use correction::*;
pub use event::*;
pub use review::*;
pub use state::*;
pub use submission::*;
pub use transition::*;
