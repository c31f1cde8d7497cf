//! Storage boundary for the editorial workflow engine
//!
//! The engine owns decisions; this crate owns the narrow interface those
//! decisions are persisted through. Every trait method is atomic per
//! call, and writes that race a concurrent mutation surface a distinct
//! [`StoreError::Conflict`] so callers can reload and decide.
//!
//! [`InMemoryEditorialStore`] is the deterministic reference adapter used
//! by the engine's tests. Production deployments provide a transactional
//! backend behind the same traits.

#![deny(unsafe_code)]

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryEditorialStore;
pub use traits::{CorrectionStore, EditorialStore, ReviewStore, SubmissionStore};
