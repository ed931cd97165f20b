//! Errors surfaced by draft stores.

use warroom_core::DraftStatus;
use warroom_protocol::{LeagueId, PlayerId};

/// A store-level failure or lost conditional write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The pick-commit guard failed: the room's `current_pick` was not
    /// the value the caller read. Exactly one concurrent committer
    /// avoids this error per turn.
    #[error("pick conflict: expected pick {expected}, store is at {actual}")]
    PickConflict { expected: u32, actual: u32 },

    /// The room's status changed underneath a conditional room update.
    #[error("status conflict: expected {expected}, store has {actual}")]
    StatusConflict {
        expected: DraftStatus,
        actual: DraftStatus,
    },

    /// The player already has an active assignment in this league/week.
    #[error("player {0} is already on an active roster")]
    PlayerTaken(PlayerId),

    #[error("league {0} not found")]
    LeagueNotFound(LeagueId),

    /// Backend I/O failure (network, disk, serialization).
    #[error("store backend error: {0}")]
    Backend(String),
}
