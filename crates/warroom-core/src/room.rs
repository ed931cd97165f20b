//! The authoritative draft-room snapshot.
//!
//! `DraftRoom` is the record the store persists and every client
//! reconciles against. The realtime event stream only ever *hints* at
//! changes to this record; the snapshot itself is the truth.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use warroom_protocol::{LeagueId, TeamId};

use crate::order::team_on_clock;
use crate::status::DraftStatus;

/// Wall-clock milliseconds since the Unix epoch.
///
/// Deadlines cross the wire and are compared across machines, so they use
/// wall-clock time rather than a process-local `Instant`.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Authoritative draft progress for one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRoom {
    pub league_id: LeagueId,

    pub status: DraftStatus,

    /// The base pick order, fixed once the draft starts. Empty until an
    /// order has been set (and again after a reset).
    pub draft_order: Vec<TeamId>,

    /// Index into the expanded snake sequence. Monotonically increasing;
    /// only a reset may take it back to 0.
    pub current_pick: u32,

    /// When the current pick must resolve. `None` while the draft is not
    /// in progress.
    pub turn_deadline_ms: Option<u64>,

    /// When the current turn began; lets a reconnecting client compute
    /// remaining time without having seen the `turn_changed` event.
    pub turn_started_at_ms: Option<u64>,
}

impl DraftRoom {
    /// A fresh, pre-draft room.
    pub fn new(league_id: LeagueId) -> Self {
        Self {
            league_id,
            status: DraftStatus::Pending,
            draft_order: Vec::new(),
            current_pick: 0,
            turn_deadline_ms: None,
            turn_started_at_ms: None,
        }
    }

    /// The team currently authorized to pick, derived from the order and
    /// the pick index. `None` when the order is unset.
    pub fn team_on_clock(&self) -> Option<TeamId> {
        team_on_clock(&self.draft_order, self.current_pick)
    }

    /// Number of participating teams.
    pub fn team_count(&self) -> u32 {
        self.draft_order.len() as u32
    }

    /// Whether `current_pick` has consumed the whole snake sequence for
    /// the given number of rounds.
    pub fn is_final_pick_done(&self, rounds: u32) -> bool {
        !self.draft_order.is_empty()
            && self.current_pick >= self.team_count() * rounds
    }

    /// Milliseconds left on the current turn, measured against `now_ms`.
    /// `None` when no deadline is armed; zero when the deadline passed.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.turn_deadline_ms
            .map(|deadline| deadline.saturating_sub(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> DraftRoom {
        let mut room = DraftRoom::new(LeagueId(1));
        room.draft_order = vec![TeamId(1), TeamId(2), TeamId(3)];
        room
    }

    #[test]
    fn test_new_room_is_pending_and_orderless() {
        let room = DraftRoom::new(LeagueId(5));
        assert_eq!(room.status, DraftStatus::Pending);
        assert!(room.draft_order.is_empty());
        assert_eq!(room.current_pick, 0);
        assert_eq!(room.team_on_clock(), None);
    }

    #[test]
    fn test_team_on_clock_follows_snake_order() {
        let mut room = room();
        assert_eq!(room.team_on_clock(), Some(TeamId(1)));
        room.current_pick = 3;
        assert_eq!(room.team_on_clock(), Some(TeamId(3)));
        room.current_pick = 5;
        assert_eq!(room.team_on_clock(), Some(TeamId(1)));
    }

    #[test]
    fn test_is_final_pick_done() {
        let mut room = room();
        room.current_pick = 5;
        assert!(!room.is_final_pick_done(2));
        room.current_pick = 6;
        assert!(room.is_final_pick_done(2));
    }

    #[test]
    fn test_is_final_pick_done_false_without_order() {
        let room = DraftRoom::new(LeagueId(1));
        assert!(!room.is_final_pick_done(2));
    }

    #[test]
    fn test_remaining_ms_saturates_at_zero() {
        let mut room = room();
        assert_eq!(room.remaining_ms(1_000), None);
        room.turn_deadline_ms = Some(5_000);
        assert_eq!(room.remaining_ms(1_000), Some(4_000));
        assert_eq!(room.remaining_ms(9_000), Some(0));
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut room = room();
        room.status = DraftStatus::InProgress;
        room.turn_deadline_ms = Some(1_700_000_000_000);
        let json = serde_json::to_string(&room).unwrap();
        let decoded: DraftRoom = serde_json::from_str(&json).unwrap();
        assert_eq!(room, decoded);
    }
}
