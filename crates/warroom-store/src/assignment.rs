//! Roster assignment records.

use serde::{Deserialize, Serialize};
use warroom_core::Slot;
use warroom_protocol::{PlayerId, TeamId};

/// How a player ended up on a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquiredVia {
    Draft,
    Waiver,
    AdminAdd,
}

/// One player occupying one slot on one team's roster for a given week.
///
/// Uniqueness of an active player within a league/week is enforced by the
/// store at commit time, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterAssignment {
    pub team_id: TeamId,
    pub week: u32,
    pub player_id: PlayerId,
    pub slot: Slot,
    /// Dropped players keep their row with `is_active = false` so the
    /// transaction history survives.
    pub is_active: bool,
    pub acquired_via: AcquiredVia,
}

impl RosterAssignment {
    /// A freshly drafted assignment.
    pub fn drafted(team_id: TeamId, week: u32, player_id: PlayerId, slot: Slot) -> Self {
        Self {
            team_id,
            week,
            player_id,
            slot,
            is_active: true,
            acquired_via: AcquiredVia::Draft,
        }
    }
}
