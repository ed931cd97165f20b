//! The [`DraftStore`] trait: every stateful draft operation goes through
//! this seam, and every write that races with another writer is guarded
//! by a compare-and-set on the field it read.

use std::future::Future;

use warroom_core::{DraftRoom, DraftStatus, PlayerInfo};
use warroom_protocol::{LeagueId, TeamId};

use crate::{RosterAssignment, StoreError};

/// The turn-state mutation bundled into a pick commit.
///
/// Applied atomically with the assignment insert: `current_pick` is
/// incremented and these fields overwrite the room's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnAdvance {
    /// Deadline for the next turn. `None` when the draft pauses or
    /// completes with this commit.
    pub next_deadline_ms: Option<u64>,
    /// Start timestamp for the next turn.
    pub next_started_at_ms: Option<u64>,
    /// Status after the commit. Stays `InProgress` mid-draft; flips to
    /// `Completed` on the final pick.
    pub new_status: DraftStatus,
}

/// Persistence backend for draft state.
///
/// Implementations must make `commit_pick` atomic: the pick guard check,
/// the player-uniqueness check, the assignment insert, and the turn
/// advance succeed or fail as one unit. A backend that cannot provide
/// that (a plain key-value cache, say) cannot host a draft.
///
/// Methods are declared in desugared `impl Future + Send` form so the
/// returned futures can cross task boundaries (the supervisor and room
/// forwarders run under `tokio::spawn`). Implementations still write
/// plain `async fn`.
pub trait DraftStore: Send + Sync + 'static {
    /// Loads the authoritative room snapshot.
    fn load_room(
        &self,
        league: LeagueId,
    ) -> impl Future<Output = Result<DraftRoom, StoreError>> + Send;

    /// Overwrites the room, guarded by its current status.
    ///
    /// Fails with [`StoreError::StatusConflict`] if the stored status is
    /// not `expected_status` — the caller's read went stale.
    fn update_room(
        &self,
        room: &DraftRoom,
        expected_status: DraftStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically commits one pick.
    ///
    /// Guard: the stored `current_pick` must equal `expected_pick`, else
    /// [`StoreError::PickConflict`]. On success the room's pick index
    /// increments, `advance` is applied, and `assignment` (when `Some`)
    /// is inserted. `None` records a skip-turn: the turn advances with
    /// no player drafted.
    ///
    /// Returns the room as it stands after the commit.
    fn commit_pick(
        &self,
        league: LeagueId,
        expected_pick: u32,
        assignment: Option<RosterAssignment>,
        advance: TurnAdvance,
    ) -> impl Future<Output = Result<DraftRoom, StoreError>> + Send;

    /// Wipes draft progress: room back to `Pending` with an empty order,
    /// all draft-acquired assignments for `week` deactivated.
    fn reset_draft(
        &self,
        league: LeagueId,
        week: u32,
    ) -> impl Future<Output = Result<DraftRoom, StoreError>> + Send;

    /// Active assignments for one team in one week.
    fn team_roster(
        &self,
        league: LeagueId,
        team: TeamId,
        week: u32,
    ) -> impl Future<Output = Result<Vec<RosterAssignment>, StoreError>> + Send;

    /// Active assignments across the whole league for one week.
    fn league_assignments(
        &self,
        league: LeagueId,
        week: u32,
    ) -> impl Future<Output = Result<Vec<RosterAssignment>, StoreError>> + Send;

    /// The draftable player catalog, sorted by ascending rank.
    fn catalog(
        &self,
        league: LeagueId,
    ) -> impl Future<Output = Result<Vec<PlayerInfo>, StoreError>> + Send;

    /// All teams registered in the league.
    fn teams(&self, league: LeagueId) -> impl Future<Output = Result<Vec<TeamId>, StoreError>> + Send;
}
