//! The domain error taxonomy.
//!
//! Every rejection a caller can see is one of these variants, returned
//! synchronously — there are no silent no-ops in the draft engine.

use warroom_protocol::{LeagueId, PlayerId, TeamId, UserId};

use crate::slots::Position;
use crate::status::DraftStatus;

/// A domain-level rejection of a draft operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// The operation is not permitted from the room's current status.
    #[error("cannot move draft from {from} to {to}")]
    InvalidTransition { from: DraftStatus, to: DraftStatus },

    /// The acting user is not the league owner.
    #[error("user {0} is not authorized to administer this draft")]
    Unauthorized(UserId),

    /// `make_pick` was called by a team that is not on the clock.
    /// The caller's view was stale; present as a non-fatal notice.
    #[error("not your turn: {team} picked while {on_clock} is on the clock")]
    NotYourTurn { team: TeamId, on_clock: TeamId },

    /// No roster slot can accept the player.
    #[error("no eligible slot for {player} ({position})")]
    NoEligibleSlot { player: PlayerId, position: Position },

    /// The player id is not in the league's catalog.
    #[error("player {0} is not in the draft catalog")]
    UnknownPlayer(PlayerId),

    /// The player already has an active assignment this league/week.
    #[error("player {0} has already been drafted")]
    PlayerAlreadyDrafted(PlayerId),

    /// Lost the conditional-write race: the state moved on between the
    /// caller's read and its write. Re-sync and retry if still relevant.
    #[error("pick no longer valid: expected pick {expected}, draft is at {actual}")]
    PickNoLongerValid { expected: u32, actual: u32 },

    /// The draft cannot start without a pick order.
    #[error("draft order for league {0} is empty")]
    DraftOrderEmpty(LeagueId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_presentable() {
        let err = DraftError::NotYourTurn {
            team: TeamId(2),
            on_clock: TeamId(1),
        };
        assert_eq!(
            err.to_string(),
            "not your turn: T-2 picked while T-1 is on the clock"
        );

        let err = DraftError::PickNoLongerValid {
            expected: 4,
            actual: 5,
        };
        assert!(err.to_string().contains("expected pick 4"));
    }
}
