//! Pure draft domain logic for Warroom.
//!
//! Everything in this crate is deterministic and I/O-free:
//!
//! - [`eligible_slot`] — the roster-eligibility resolver
//! - [`team_on_clock`] / [`round_of`] / [`total_picks`] — snake-order math
//! - [`DraftStatus`] — the lifecycle state machine
//! - [`DraftRoom`] — the authoritative snapshot type
//! - [`select_auto_pick`] — the deterministic timeout policy
//! - [`DraftError`] — the domain error taxonomy
//!
//! The engine crate drives these against the store; clients recompute the
//! same functions locally, which is why they must never be duplicated or
//! transmitted.

mod autopick;
mod error;
mod order;
mod room;
mod slots;
mod status;

pub use autopick::{PlayerInfo, select_auto_pick};
pub use error::DraftError;
pub use order::{round_of, team_on_clock, total_picks};
pub use room::{DraftRoom, now_ms};
pub use slots::{Position, RosterRules, Slot, SlotCounts, eligible_slot};
pub use status::DraftStatus;
