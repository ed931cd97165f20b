//! The draft coordination engine.
//!
//! Every mutation follows the same shape: load the authoritative
//! snapshot, validate against it, write through a store guard that fails
//! if the snapshot went stale, and only then announce the transition.
//! Concurrent callers both validate against the same read; the store
//! guard is what makes exactly one of them win.

use std::time::Duration;

use rand::seq::SliceRandom;
use warroom_core::{
    DraftError, DraftRoom, DraftStatus, PlayerInfo, RosterRules, SlotCounts, eligible_slot, now_ms,
    select_auto_pick,
};
use warroom_protocol::{DraftEvent, LeagueId, PlayerId, TeamId, UserId};
use warroom_store::{DraftStore, RosterAssignment, StoreError, TurnAdvance};

use crate::{Authorizer, EngineError, EventSink};

/// League-wide draft parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Length of each turn; also how far out pick deadlines are set.
    pub turn_duration: Duration,
    /// Roster shape. Its total size is the number of rounds.
    pub rules: RosterRules,
    /// The roster week drafted players land in.
    pub week: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_duration: Duration::from_secs(90),
            rules: RosterRules::default(),
            week: 1,
        }
    }
}

/// The engine. Clone-cheap when its collaborators are.
#[derive(Clone)]
pub struct DraftEngine<S, A, E> {
    store: S,
    auth: A,
    sink: E,
    config: EngineConfig,
}

impl<S, A, E> DraftEngine<S, A, E>
where
    S: DraftStore,
    A: Authorizer,
    E: EventSink,
{
    pub fn new(store: S, auth: A, sink: E, config: EngineConfig) -> Self {
        Self {
            store,
            auth,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of rounds: every team fills every roster slot.
    pub fn rounds(&self) -> u32 {
        self.config.rules.roster_size()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Shuffles the league's teams into a fresh base order.
    /// Owner-only; the order may only change before the draft starts.
    pub async fn randomize_draft_order(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<Vec<TeamId>, EngineError> {
        self.require_owner(acting, league).await?;

        let mut room = self.store.load_room(league).await?;
        if room.status != DraftStatus::Pending {
            return Err(DraftError::InvalidTransition {
                from: room.status,
                to: DraftStatus::Pending,
            }
            .into());
        }

        let mut order = self.store.teams(league).await?;
        order.shuffle(&mut rand::rng());
        room.draft_order = order.clone();

        self.update_guarded(&room, DraftStatus::Pending).await?;
        tracing::info!(%league, teams = order.len(), "draft order randomized");
        Ok(order)
    }

    /// Moves the draft to `in_progress` and opens a full-length turn.
    ///
    /// Covers both the initial start and resuming after a pause: either
    /// way the team on the clock gets a complete, untouched turn.
    pub async fn start_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, EngineError> {
        self.require_owner(acting, league).await?;

        let mut room = self.store.load_room(league).await?;
        let from = room.status;
        if !from.can_transition_to(DraftStatus::InProgress) {
            return Err(DraftError::InvalidTransition {
                from,
                to: DraftStatus::InProgress,
            }
            .into());
        }
        let on_clock = room
            .team_on_clock()
            .ok_or(DraftError::DraftOrderEmpty(league))?;

        let now = now_ms();
        let deadline_ms = now + self.config.turn_duration.as_millis() as u64;
        room.status = DraftStatus::InProgress;
        room.turn_deadline_ms = Some(deadline_ms);
        room.turn_started_at_ms = Some(now);

        self.update_guarded(&room, from).await?;

        let event = if room.current_pick == 0 {
            DraftEvent::DraftStarted {
                team_id: on_clock,
                deadline_ms,
            }
        } else {
            // Resume mid-draft: the clock moved, not the draft's start.
            DraftEvent::TurnChanged {
                team_id: on_clock,
                pick_number: room.current_pick,
                deadline_ms,
            }
        };
        self.sink.publish(league, event).await;

        tracing::info!(%league, %on_clock, pick = room.current_pick, "draft in progress");
        Ok(room)
    }

    /// Alias for [`start_draft`](Self::start_draft) from a paused draft.
    pub async fn resume_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, EngineError> {
        self.start_draft(league, acting).await
    }

    /// Owner-initiated pause.
    pub async fn pause_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, EngineError> {
        self.require_owner(acting, league).await?;
        self.suspend(league).await
    }

    /// System-initiated pause, used by the supervisor when auto-picks
    /// keep failing. Progress is preserved; resuming grants a new turn.
    pub async fn suspend(&self, league: LeagueId) -> Result<DraftRoom, EngineError> {
        let mut room = self.store.load_room(league).await?;
        let from = room.status;
        if !from.can_transition_to(DraftStatus::Pending) {
            return Err(DraftError::InvalidTransition {
                from,
                to: DraftStatus::Pending,
            }
            .into());
        }

        room.status = DraftStatus::Pending;
        room.turn_deadline_ms = None;
        room.turn_started_at_ms = None;

        self.update_guarded(&room, from).await?;
        self.sink.publish(league, DraftEvent::DraftPaused).await;

        tracing::info!(%league, pick = room.current_pick, "draft paused");
        Ok(room)
    }

    /// Owner-initiated completion, regardless of picks remaining.
    pub async fn complete_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, EngineError> {
        self.require_owner(acting, league).await?;

        let mut room = self.store.load_room(league).await?;
        let from = room.status;
        if !from.can_transition_to(DraftStatus::Completed) {
            return Err(DraftError::InvalidTransition {
                from,
                to: DraftStatus::Completed,
            }
            .into());
        }

        room.status = DraftStatus::Completed;
        room.turn_deadline_ms = None;
        room.turn_started_at_ms = None;

        self.update_guarded(&room, from).await?;
        self.sink.publish(league, DraftEvent::DraftCompleted).await;

        tracing::info!(%league, pick = room.current_pick, "draft completed by admin");
        Ok(room)
    }

    /// Wipes the draft back to square one: room pending, order empty,
    /// this week's drafted players released.
    pub async fn reset_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, EngineError> {
        self.require_owner(acting, league).await?;
        let room = self.store.reset_draft(league, self.config.week).await?;
        Ok(room)
    }

    // -----------------------------------------------------------------------
    // Picks
    // -----------------------------------------------------------------------

    /// The pick transaction.
    ///
    /// Validates turn, catalog membership, eligibility, and availability
    /// against a fresh snapshot, then commits through the pick guard.
    /// Losing the guard race surfaces as [`DraftError::PickNoLongerValid`].
    pub async fn make_pick(
        &self,
        league: LeagueId,
        team: TeamId,
        player: PlayerId,
    ) -> Result<DraftRoom, EngineError> {
        let room = self.store.load_room(league).await?;
        if !room.status.is_active() {
            return Err(DraftError::InvalidTransition {
                from: room.status,
                to: DraftStatus::InProgress,
            }
            .into());
        }
        let on_clock = room
            .team_on_clock()
            .ok_or(DraftError::DraftOrderEmpty(league))?;
        if team != on_clock {
            return Err(DraftError::NotYourTurn { team, on_clock }.into());
        }

        let catalog = self.store.catalog(league).await?;
        let info = catalog
            .iter()
            .find(|p| p.id == player)
            .ok_or(DraftError::UnknownPlayer(player))?;

        let counts = self.roster_counts(league, team).await?;
        let slot = eligible_slot(info.position, &counts, &self.config.rules).ok_or(
            DraftError::NoEligibleSlot {
                player,
                position: info.position,
            },
        )?;

        // Early availability check for a clean error. The store re-checks
        // inside the commit, so racing past this line is still safe.
        let drafted = self
            .store
            .league_assignments(league, self.config.week)
            .await?;
        if drafted.iter().any(|a| a.player_id == player) {
            return Err(DraftError::PlayerAlreadyDrafted(player).into());
        }

        let assignment = RosterAssignment::drafted(team, self.config.week, player, slot);
        let picked_at = room.current_pick;
        let advance = self.advance_after(&room);
        let updated = self
            .store
            .commit_pick(league, picked_at, Some(assignment), advance)
            .await
            .map_err(Self::map_commit_error)?;

        tracing::info!(%league, %team, %player, %slot, pick = picked_at, "pick made");
        self.sink
            .publish(
                league,
                DraftEvent::PickMade {
                    team_id: team,
                    player_id: player,
                    pick_number: picked_at,
                },
            )
            .await;
        self.announce_turn(league, &updated).await;

        Ok(updated)
    }

    /// The timeout path: drafts the best available player for whichever
    /// team is on the clock, or skips the turn when nothing fits.
    ///
    /// `expected_pick` is the turn the caller saw expire. If the draft
    /// has moved past it the call resolves as a stale pick, not an error
    /// to act on.
    pub async fn auto_pick(
        &self,
        league: LeagueId,
        expected_pick: u32,
    ) -> Result<DraftRoom, EngineError> {
        let room = self.store.load_room(league).await?;
        if !room.status.is_active() || room.current_pick != expected_pick {
            return Err(DraftError::PickNoLongerValid {
                expected: expected_pick,
                actual: room.current_pick,
            }
            .into());
        }
        let team = room
            .team_on_clock()
            .ok_or(DraftError::DraftOrderEmpty(league))?;

        let catalog = self.store.catalog(league).await?;
        let taken = self
            .store
            .league_assignments(league, self.config.week)
            .await?
            .iter()
            .map(|a| a.player_id)
            .collect();
        let counts = self.roster_counts(league, team).await?;

        let selection = select_auto_pick(&catalog, &taken, &counts, &self.config.rules);
        let assignment = selection
            .map(|(player, slot)| RosterAssignment::drafted(team, self.config.week, player, slot));

        let advance = self.advance_after(&room);
        let updated = self
            .store
            .commit_pick(league, expected_pick, assignment.clone(), advance)
            .await
            .map_err(Self::map_commit_error)?;

        match &assignment {
            Some(a) => {
                tracing::info!(
                    %league, %team, player = %a.player_id, slot = %a.slot,
                    pick = expected_pick, "auto-pick made"
                );
                self.sink
                    .publish(
                        league,
                        DraftEvent::PickMade {
                            team_id: team,
                            player_id: a.player_id,
                            pick_number: expected_pick,
                        },
                    )
                    .await;
            }
            None => {
                tracing::warn!(%league, %team, pick = expected_pick, "no eligible player, turn skipped");
            }
        }
        self.announce_turn(league, &updated).await;

        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The authoritative snapshot, as served to reconciling clients.
    pub async fn room(&self, league: LeagueId) -> Result<DraftRoom, EngineError> {
        Ok(self.store.load_room(league).await?)
    }

    /// A team's active roster for the configured week.
    pub async fn roster(
        &self,
        league: LeagueId,
        team: TeamId,
    ) -> Result<Vec<RosterAssignment>, EngineError> {
        Ok(self
            .store
            .team_roster(league, team, self.config.week)
            .await?)
    }

    /// Catalog players not yet drafted this week.
    pub async fn available_players(&self, league: LeagueId) -> Result<Vec<PlayerInfo>, EngineError> {
        let catalog = self.store.catalog(league).await?;
        let taken: std::collections::HashSet<PlayerId> = self
            .store
            .league_assignments(league, self.config.week)
            .await?
            .iter()
            .map(|a| a.player_id)
            .collect();
        Ok(catalog
            .into_iter()
            .filter(|p| !taken.contains(&p.id))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn require_owner(&self, user: UserId, league: LeagueId) -> Result<(), EngineError> {
        if self.auth.is_league_owner(user, league).await {
            Ok(())
        } else {
            Err(DraftError::Unauthorized(user).into())
        }
    }

    async fn roster_counts(
        &self,
        league: LeagueId,
        team: TeamId,
    ) -> Result<SlotCounts, EngineError> {
        let roster = self
            .store
            .team_roster(league, team, self.config.week)
            .await?;
        Ok(roster.iter().map(|a| a.slot).collect())
    }

    /// Turn-state update to apply alongside the next committed pick.
    fn advance_after(&self, room: &DraftRoom) -> TurnAdvance {
        let next_pick = room.current_pick + 1;
        let total = room.team_count() * self.rounds();
        if next_pick >= total {
            TurnAdvance {
                next_deadline_ms: None,
                next_started_at_ms: None,
                new_status: DraftStatus::Completed,
            }
        } else {
            let now = now_ms();
            TurnAdvance {
                next_deadline_ms: Some(now + self.config.turn_duration.as_millis() as u64),
                next_started_at_ms: Some(now),
                new_status: DraftStatus::InProgress,
            }
        }
    }

    /// Publishes the post-commit turn event: the next team on the clock,
    /// or completion.
    async fn announce_turn(&self, league: LeagueId, room: &DraftRoom) {
        match room.status {
            DraftStatus::Completed => {
                self.sink.publish(league, DraftEvent::DraftCompleted).await;
                tracing::info!(%league, "draft completed");
            }
            _ => {
                if let (Some(team_id), Some(deadline_ms)) =
                    (room.team_on_clock(), room.turn_deadline_ms)
                {
                    self.sink
                        .publish(
                            league,
                            DraftEvent::TurnChanged {
                                team_id,
                                pick_number: room.current_pick,
                                deadline_ms,
                            },
                        )
                        .await;
                }
            }
        }
    }

    async fn update_guarded(
        &self,
        room: &DraftRoom,
        expected: DraftStatus,
    ) -> Result<(), EngineError> {
        self.store
            .update_room(room, expected)
            .await
            .map_err(|err| match err {
                StoreError::StatusConflict { actual, .. } => DraftError::InvalidTransition {
                    from: actual,
                    to: room.status,
                }
                .into(),
                other => EngineError::Store(other),
            })
    }

    /// Commit-guard failures become domain errors the caller can present.
    fn map_commit_error(err: StoreError) -> EngineError {
        match err {
            StoreError::PickConflict { expected, actual } => {
                DraftError::PickNoLongerValid { expected, actual }.into()
            }
            StoreError::PlayerTaken(player) => DraftError::PlayerAlreadyDrafted(player).into(),
            other => EngineError::Store(other),
        }
    }
}
