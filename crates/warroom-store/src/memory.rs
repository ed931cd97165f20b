//! In-memory store backend.
//!
//! One async mutex over all leagues gives the atomicity `commit_pick`
//! requires for free. Fine for tests, demos, and single-process
//! deployments; a database-backed store would use a transaction instead.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use warroom_core::{DraftRoom, DraftStatus, PlayerInfo};
use warroom_protocol::{LeagueId, TeamId};

use crate::{DraftStore, RosterAssignment, StoreError, TurnAdvance};

#[derive(Debug)]
struct LeagueData {
    room: DraftRoom,
    assignments: Vec<RosterAssignment>,
    catalog: Vec<PlayerInfo>,
    teams: Vec<TeamId>,
}

/// All-in-memory [`DraftStore`]. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    leagues: Arc<Mutex<HashMap<LeagueId, LeagueData>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a league with its teams and player catalog. The room starts
    /// `Pending` with no order.
    pub async fn insert_league(
        &self,
        league: LeagueId,
        teams: Vec<TeamId>,
        mut catalog: Vec<PlayerInfo>,
    ) {
        catalog.sort_by_key(|p| p.rank);
        let data = LeagueData {
            room: DraftRoom::new(league),
            assignments: Vec::new(),
            catalog,
            teams,
        };
        self.leagues.lock().await.insert(league, data);
    }
}

impl DraftStore for MemoryStore {
    async fn load_room(&self, league: LeagueId) -> Result<DraftRoom, StoreError> {
        let leagues = self.leagues.lock().await;
        leagues
            .get(&league)
            .map(|d| d.room.clone())
            .ok_or(StoreError::LeagueNotFound(league))
    }

    async fn update_room(
        &self,
        room: &DraftRoom,
        expected_status: DraftStatus,
    ) -> Result<(), StoreError> {
        let mut leagues = self.leagues.lock().await;
        let data = leagues
            .get_mut(&room.league_id)
            .ok_or(StoreError::LeagueNotFound(room.league_id))?;
        if data.room.status != expected_status {
            return Err(StoreError::StatusConflict {
                expected: expected_status,
                actual: data.room.status,
            });
        }
        data.room = room.clone();
        Ok(())
    }

    async fn commit_pick(
        &self,
        league: LeagueId,
        expected_pick: u32,
        assignment: Option<RosterAssignment>,
        advance: TurnAdvance,
    ) -> Result<DraftRoom, StoreError> {
        let mut leagues = self.leagues.lock().await;
        let data = leagues
            .get_mut(&league)
            .ok_or(StoreError::LeagueNotFound(league))?;

        // The write guard. Anyone who read a pick index that has since
        // moved loses here, before any state changes.
        if data.room.current_pick != expected_pick {
            return Err(StoreError::PickConflict {
                expected: expected_pick,
                actual: data.room.current_pick,
            });
        }

        if let Some(assignment) = &assignment {
            let taken = data.assignments.iter().any(|a| {
                a.is_active && a.week == assignment.week && a.player_id == assignment.player_id
            });
            if taken {
                return Err(StoreError::PlayerTaken(assignment.player_id));
            }
        }

        if let Some(assignment) = assignment {
            tracing::debug!(
                league = %league,
                team = %assignment.team_id,
                player = %assignment.player_id,
                pick = expected_pick,
                "pick committed"
            );
            data.assignments.push(assignment);
        } else {
            tracing::debug!(league = %league, pick = expected_pick, "turn skipped");
        }

        data.room.current_pick += 1;
        data.room.turn_deadline_ms = advance.next_deadline_ms;
        data.room.turn_started_at_ms = advance.next_started_at_ms;
        data.room.status = advance.new_status;

        Ok(data.room.clone())
    }

    async fn reset_draft(&self, league: LeagueId, week: u32) -> Result<DraftRoom, StoreError> {
        let mut leagues = self.leagues.lock().await;
        let data = leagues
            .get_mut(&league)
            .ok_or(StoreError::LeagueNotFound(league))?;

        data.room = DraftRoom::new(league);
        for a in &mut data.assignments {
            if a.week == week && a.acquired_via == crate::AcquiredVia::Draft {
                a.is_active = false;
            }
        }
        tracing::info!(league = %league, week, "draft reset");
        Ok(data.room.clone())
    }

    async fn team_roster(
        &self,
        league: LeagueId,
        team: TeamId,
        week: u32,
    ) -> Result<Vec<RosterAssignment>, StoreError> {
        let leagues = self.leagues.lock().await;
        let data = leagues
            .get(&league)
            .ok_or(StoreError::LeagueNotFound(league))?;
        Ok(data
            .assignments
            .iter()
            .filter(|a| a.is_active && a.team_id == team && a.week == week)
            .cloned()
            .collect())
    }

    async fn league_assignments(
        &self,
        league: LeagueId,
        week: u32,
    ) -> Result<Vec<RosterAssignment>, StoreError> {
        let leagues = self.leagues.lock().await;
        let data = leagues
            .get(&league)
            .ok_or(StoreError::LeagueNotFound(league))?;
        Ok(data
            .assignments
            .iter()
            .filter(|a| a.is_active && a.week == week)
            .cloned()
            .collect())
    }

    async fn catalog(&self, league: LeagueId) -> Result<Vec<PlayerInfo>, StoreError> {
        let leagues = self.leagues.lock().await;
        leagues
            .get(&league)
            .map(|d| d.catalog.clone())
            .ok_or(StoreError::LeagueNotFound(league))
    }

    async fn teams(&self, league: LeagueId) -> Result<Vec<TeamId>, StoreError> {
        let leagues = self.leagues.lock().await;
        leagues
            .get(&league)
            .map(|d| d.teams.clone())
            .ok_or(StoreError::LeagueNotFound(league))
    }
}
