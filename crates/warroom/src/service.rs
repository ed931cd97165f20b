//! `DraftService` wires the layers together: engine transactions publish
//! into per-league rooms, and every turn transition keeps that league's
//! auto-pick supervisor in sync.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use warroom_clock::ClockConfig;
use warroom_core::{DraftRoom, PlayerInfo};
use warroom_engine::{
    Authorizer, DraftEngine, EngineConfig, EventSink, SupervisorHandle, spawn_supervisor,
};
use warroom_protocol::{DraftEvent, LeagueId, PlayerId, TeamId, UserId};
use warroom_room::{
    EventChannel, EventConnection, InProcessChannel, RoomError, RoomManager, SnapshotSource,
};
use warroom_store::{DraftStore, RosterAssignment};

use crate::WarroomError;

/// Event sink that fans engine events out through the room layer.
#[derive(Clone)]
pub struct RoomSink {
    rooms: RoomManager,
}

impl EventSink for RoomSink {
    async fn publish(&self, league: LeagueId, event: DraftEvent) {
        self.rooms.publish(league, event).await;
    }
}

/// Combined service configuration.
///
/// The engine's turn duration sets the wall-clock deadlines clients see;
/// the clock config drives the supervisor. [`with_turn_duration`]
/// (Self::with_turn_duration) keeps the two in agreement.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub engine: EngineConfig,
    pub clock: ClockConfig,
}

impl ServiceConfig {
    pub fn with_turn_duration(mut self, duration: Duration) -> Self {
        self.engine.turn_duration = duration;
        self.clock.turn_duration = duration;
        self
    }
}

/// The deployable draft service for one process.
#[derive(Clone)]
pub struct DraftService<S, A> {
    engine: DraftEngine<S, A, RoomSink>,
    rooms: RoomManager,
    supervisors: Arc<Mutex<HashMap<LeagueId, SupervisorHandle>>>,
    clock: ClockConfig,
}

impl<S, A> DraftService<S, A>
where
    S: DraftStore + Clone,
    A: Authorizer + Clone,
{
    pub fn new(store: S, auth: A, config: ServiceConfig) -> Self {
        let rooms = RoomManager::new();
        let engine = DraftEngine::new(
            store,
            auth,
            RoomSink {
                rooms: rooms.clone(),
            },
            config.engine,
        );
        Self {
            engine,
            rooms,
            supervisors: Arc::new(Mutex::new(HashMap::new())),
            clock: config.clock,
        }
    }

    pub fn engine(&self) -> &DraftEngine<S, A, RoomSink> {
        &self.engine
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    /// Channel for in-process clients (tests, bots, the gateway).
    pub fn channel(&self) -> InProcessChannel {
        InProcessChannel::new(self.rooms.clone())
    }

    /// Joins a team's client to its league's draft room, returning the
    /// live event stream.
    pub async fn join_room(
        &self,
        league: LeagueId,
        team: TeamId,
    ) -> Result<EventConnection, WarroomError> {
        Ok(self.channel().connect(league, team).await?)
    }

    /// Snapshot source for client-side reconcilers.
    pub fn snapshots(&self) -> ServiceSnapshots<S, A> {
        ServiceSnapshots {
            service: self.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle entry points
    // -----------------------------------------------------------------------

    pub async fn randomize_draft_order(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<Vec<TeamId>, WarroomError> {
        Ok(self.engine.randomize_draft_order(league, acting).await?)
    }

    pub async fn start_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.start_draft(league, acting).await?;
        self.supervisor(league).await.arm(room.current_pick).await;
        Ok(room)
    }

    pub async fn pause_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.pause_draft(league, acting).await?;
        self.supervisor(league).await.pause().await;
        Ok(room)
    }

    pub async fn resume_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.resume_draft(league, acting).await?;
        self.supervisor(league).await.resume(room.current_pick).await;
        Ok(room)
    }

    pub async fn complete_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.complete_draft(league, acting).await?;
        self.retire_supervisor(league).await;
        Ok(room)
    }

    pub async fn reset_draft(
        &self,
        league: LeagueId,
        acting: UserId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.reset_draft(league, acting).await?;
        self.retire_supervisor(league).await;
        Ok(room)
    }

    // -----------------------------------------------------------------------
    // Picks and reads
    // -----------------------------------------------------------------------

    pub async fn make_pick(
        &self,
        league: LeagueId,
        team: TeamId,
        player: PlayerId,
    ) -> Result<DraftRoom, WarroomError> {
        let room = self.engine.make_pick(league, team, player).await?;
        if room.status.is_active() {
            self.supervisor(league).await.arm(room.current_pick).await;
        } else {
            self.retire_supervisor(league).await;
        }
        Ok(room)
    }

    /// The authoritative room snapshot; the team on the clock and the
    /// remaining turn millis come from its accessors.
    pub async fn snapshot(&self, league: LeagueId) -> Result<DraftRoom, WarroomError> {
        Ok(self.engine.room(league).await?)
    }

    pub async fn roster(
        &self,
        league: LeagueId,
        team: TeamId,
    ) -> Result<Vec<RosterAssignment>, WarroomError> {
        Ok(self.engine.roster(league, team).await?)
    }

    pub async fn available_players(
        &self,
        league: LeagueId,
    ) -> Result<Vec<PlayerInfo>, WarroomError> {
        Ok(self.engine.available_players(league).await?)
    }

    // -----------------------------------------------------------------------
    // Supervisors
    // -----------------------------------------------------------------------

    async fn supervisor(&self, league: LeagueId) -> SupervisorHandle {
        let mut supervisors = self.supervisors.lock().await;
        supervisors
            .entry(league)
            .or_insert_with(|| spawn_supervisor(self.engine.clone(), league, self.clock.clone()))
            .clone()
    }

    async fn retire_supervisor(&self, league: LeagueId) {
        if let Some(handle) = self.supervisors.lock().await.remove(&league) {
            handle.shutdown().await;
        }
    }
}

/// [`SnapshotSource`] over a service's read path.
#[derive(Clone)]
pub struct ServiceSnapshots<S, A> {
    service: DraftService<S, A>,
}

impl<S, A> SnapshotSource for ServiceSnapshots<S, A>
where
    S: DraftStore + Clone,
    A: Authorizer + Clone,
{
    async fn fetch(&self, league: LeagueId) -> Result<DraftRoom, RoomError> {
        self.service
            .engine
            .room(league)
            .await
            .map_err(|err| RoomError::Snapshot(err.to_string()))
    }
}
