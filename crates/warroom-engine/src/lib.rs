//! The Warroom draft engine.
//!
//! Ties the pure domain rules to the persistence seam: [`DraftEngine`]
//! runs the pick transaction and lifecycle control, and the
//! [`spawn_supervisor`] task converts turn-clock expiries into the same
//! transaction. Events go out through an [`EventSink`] strictly after
//! the store commit, so nothing a client hears is ever ahead of the
//! authoritative state.

mod auth;
mod engine;
mod error;
mod events;
mod supervisor;

pub use auth::{Authorizer, OpenAuthorizer, OwnerTable};
pub use engine::{DraftEngine, EngineConfig};
pub use error::EngineError;
pub use events::{EventSink, NullSink};
pub use supervisor::{SupervisorCommand, SupervisorHandle, spawn_supervisor};
