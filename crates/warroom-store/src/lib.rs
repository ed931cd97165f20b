//! Persistence layer for Warroom drafts.
//!
//! Defines the [`DraftStore`] trait — the seam every stateful draft
//! operation crosses — and an in-memory backend. The contract that makes
//! concurrent drafting safe lives here: `commit_pick` is a single atomic
//! unit guarded by a compare-and-set on the pick index.

mod assignment;
mod error;
mod memory;
mod store;

pub use assignment::{AcquiredVia, RosterAssignment};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{DraftStore, TurnAdvance};
