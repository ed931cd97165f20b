//! Room-layer errors.

use warroom_protocol::{LeagueId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The room actor is gone (channel closed) or was never opened.
    #[error("draft room for {0} is unavailable")]
    Unavailable(LeagueId),

    /// Leave for a team that is not a member.
    #[error("{team} is not in the draft room for {league}")]
    NotJoined { league: LeagueId, team: TeamId },

    /// The event channel could not be established or dropped mid-stream.
    #[error("event channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// A snapshot fetch during reconciliation failed.
    #[error("snapshot fetch failed: {0}")]
    Snapshot(String),
}
