//! End-to-end engine tests over the in-memory store: lifecycle control,
//! the pick transaction and its race behavior, auto-pick, and the
//! supervisor loop under a controlled clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time;
use warroom_clock::ClockConfig;
use warroom_core::{DraftError, DraftRoom, DraftStatus, PlayerInfo, Position, RosterRules};
use warroom_engine::{
    DraftEngine, EngineConfig, EngineError, EventSink, OwnerTable, spawn_supervisor,
};
use warroom_protocol::{DraftEvent, LeagueId, PlayerId, TeamId, UserId};
use warroom_store::{DraftStore, MemoryStore, RosterAssignment, StoreError, TurnAdvance};

const LEAGUE: LeagueId = LeagueId(1);
const OWNER: UserId = UserId(100);
const TEAM_A: TeamId = TeamId(1);
const TEAM_B: TeamId = TeamId(2);
const TEAM_C: TeamId = TeamId(3);

/// Captures everything the engine publishes.
#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<DraftEvent>>>,
}

impl RecordingSink {
    async fn events(&self) -> Vec<DraftEvent> {
        self.events.lock().await.clone()
    }
}

impl EventSink for RecordingSink {
    async fn publish(&self, _league: LeagueId, event: DraftEvent) {
        self.events.lock().await.push(event);
    }
}

fn player(id: u64, position: Position, rank: u32) -> PlayerInfo {
    PlayerInfo {
        id: PlayerId(id),
        name: format!("Player {id}"),
        position,
        rank,
    }
}

/// Two-slot rosters (QB + RB) keep full drafts short: two rounds.
fn short_rules() -> RosterRules {
    RosterRules {
        qb: 1,
        rb: 1,
        wr: 0,
        te: 0,
        flex: 0,
        k: 0,
        def: 0,
        dp: 0,
        bench: 0,
    }
}

fn mixed_catalog() -> Vec<PlayerInfo> {
    vec![
        player(1, Position::Rb, 1),
        player(2, Position::Qb, 2),
        player(3, Position::Rb, 3),
        player(4, Position::Qb, 4),
        player(5, Position::Rb, 5),
        player(6, Position::Qb, 6),
        player(7, Position::Rb, 7),
        player(8, Position::Qb, 8),
    ]
}

type TestEngine<S> = DraftEngine<S, OwnerTable, RecordingSink>;

async fn engine_with(
    teams: Vec<TeamId>,
    catalog: Vec<PlayerInfo>,
) -> (TestEngine<MemoryStore>, RecordingSink) {
    let store = MemoryStore::new();
    store.insert_league(LEAGUE, teams, catalog).await;

    let sink = RecordingSink::default();
    let engine = DraftEngine::new(
        store,
        OwnerTable::new().with_owner(LEAGUE, OWNER),
        sink.clone(),
        EngineConfig {
            turn_duration: Duration::from_secs(90),
            rules: short_rules(),
            week: 1,
        },
    );
    (engine, sink)
}

/// Pins the base order so turn math is deterministic in tests.
async fn set_order<S: DraftStore>(store: &S, order: Vec<TeamId>) {
    let mut room = store.load_room(LEAGUE).await.unwrap();
    room.draft_order = order;
    store.update_room(&room, DraftStatus::Pending).await.unwrap();
}

fn draft_err(result: Result<DraftRoom, EngineError>) -> DraftError {
    match result.unwrap_err() {
        EngineError::Draft(err) => err,
        other => panic!("expected domain error, got {other:?}"),
    }
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test]
async fn test_start_without_order_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    let err = draft_err(engine.start_draft(LEAGUE, OWNER).await);
    assert_eq!(err, DraftError::DraftOrderEmpty(LEAGUE));
}

#[tokio::test]
async fn test_randomize_and_start() {
    let (engine, sink) = engine_with(vec![TEAM_A, TEAM_B, TEAM_C], mixed_catalog()).await;

    let order = engine.randomize_draft_order(LEAGUE, OWNER).await.unwrap();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(sorted, vec![TEAM_A, TEAM_B, TEAM_C]);

    let room = engine.start_draft(LEAGUE, OWNER).await.unwrap();
    assert_eq!(room.status, DraftStatus::InProgress);
    assert_eq!(room.current_pick, 0);
    assert!(room.turn_deadline_ms.is_some());
    assert_eq!(room.team_on_clock(), Some(order[0]));

    let events = sink.events().await;
    assert!(matches!(
        events.last(),
        Some(DraftEvent::DraftStarted { team_id, .. }) if *team_id == order[0]
    ));
}

#[tokio::test]
async fn test_randomize_rejected_once_started() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    engine.randomize_draft_order(LEAGUE, OWNER).await.unwrap();
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let result = engine.randomize_draft_order(LEAGUE, OWNER).await;
    assert!(matches!(
        result.unwrap_err(),
        EngineError::Draft(DraftError::InvalidTransition {
            from: DraftStatus::InProgress,
            ..
        })
    ));
}

#[tokio::test]
async fn test_lifecycle_requires_league_owner() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    let intruder = UserId(999);

    let result = engine.randomize_draft_order(LEAGUE, intruder).await;
    assert!(matches!(
        result.unwrap_err(),
        EngineError::Draft(DraftError::Unauthorized(u)) if u == intruder
    ));
    assert!(matches!(
        engine.start_draft(LEAGUE, intruder).await.unwrap_err(),
        EngineError::Draft(DraftError::Unauthorized(_))
    ));
    assert!(matches!(
        engine.pause_draft(LEAGUE, intruder).await.unwrap_err(),
        EngineError::Draft(DraftError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_pause_and_resume_grant_fresh_turn() {
    let (engine, sink) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();
    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();

    let paused = engine.pause_draft(LEAGUE, OWNER).await.unwrap();
    assert_eq!(paused.status, DraftStatus::Pending);
    assert_eq!(paused.current_pick, 1);
    assert_eq!(paused.turn_deadline_ms, None);
    assert!(sink.events().await.contains(&DraftEvent::DraftPaused));

    let resumed = engine.resume_draft(LEAGUE, OWNER).await.unwrap();
    assert_eq!(resumed.status, DraftStatus::InProgress);
    assert_eq!(resumed.current_pick, 1);
    assert!(resumed.turn_deadline_ms.is_some());
    // Mid-draft resume announces the turn, not a new draft.
    assert!(matches!(
        sink.events().await.last(),
        Some(DraftEvent::TurnChanged { team_id, pick_number: 1, .. }) if *team_id == TEAM_B
    ));
}

#[tokio::test]
async fn test_admin_complete_and_reset() {
    let (engine, sink) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();
    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();

    let room = engine.complete_draft(LEAGUE, OWNER).await.unwrap();
    assert_eq!(room.status, DraftStatus::Completed);
    assert!(sink.events().await.contains(&DraftEvent::DraftCompleted));

    // Completed is terminal for everything but reset.
    assert!(matches!(
        draft_err(engine.start_draft(LEAGUE, OWNER).await),
        DraftError::InvalidTransition { .. }
    ));

    let room = engine.reset_draft(LEAGUE, OWNER).await.unwrap();
    assert_eq!(room.status, DraftStatus::Pending);
    assert_eq!(room.current_pick, 0);
    assert!(room.draft_order.is_empty());
    assert!(engine.roster(LEAGUE, TEAM_A).await.unwrap().is_empty());
    // Released players are draftable again.
    assert_eq!(
        engine.available_players(LEAGUE).await.unwrap().len(),
        mixed_catalog().len()
    );
}

// =========================================================================
// The pick transaction
// =========================================================================

#[tokio::test]
async fn test_snake_draft_runs_to_completion() {
    let (engine, sink) = engine_with(vec![TEAM_A, TEAM_B, TEAM_C], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B, TEAM_C]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    // Two rounds over three teams: forward, then reversed.
    let expected_turns = [TEAM_A, TEAM_B, TEAM_C, TEAM_C, TEAM_B, TEAM_A];
    let picks = [1u64, 2, 3, 4, 5, 6];

    for (i, (&team, &pid)) in expected_turns.iter().zip(&picks).enumerate() {
        let room = engine.room(LEAGUE).await.unwrap();
        assert_eq!(room.team_on_clock(), Some(team), "turn {i}");
        engine.make_pick(LEAGUE, team, PlayerId(pid)).await.unwrap();
    }

    let room = engine.room(LEAGUE).await.unwrap();
    assert_eq!(room.status, DraftStatus::Completed);
    assert_eq!(room.current_pick, 6);
    assert_eq!(room.turn_deadline_ms, None);
    assert_eq!(sink.events().await.last(), Some(&DraftEvent::DraftCompleted));

    for team in [TEAM_A, TEAM_B, TEAM_C] {
        assert_eq!(engine.roster(LEAGUE, team).await.unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_pick_out_of_turn_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let err = draft_err(engine.make_pick(LEAGUE, TEAM_B, PlayerId(1)).await);
    assert_eq!(
        err,
        DraftError::NotYourTurn {
            team: TEAM_B,
            on_clock: TEAM_A,
        }
    );
    // Nothing changed.
    assert_eq!(engine.room(LEAGUE).await.unwrap().current_pick, 0);
}

#[tokio::test]
async fn test_pick_before_start_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;

    let err = draft_err(engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await);
    assert!(matches!(err, DraftError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_pick_of_drafted_player_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();
    let err = draft_err(engine.make_pick(LEAGUE, TEAM_B, PlayerId(1)).await);
    assert_eq!(err, DraftError::PlayerAlreadyDrafted(PlayerId(1)));
}

#[tokio::test]
async fn test_pick_with_no_slot_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    // Round 1: A and B take RBs. Round 2 (snake): B picks again.
    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();
    engine.make_pick(LEAGUE, TEAM_B, PlayerId(3)).await.unwrap();

    // B's RB slot is full and these rules have no FLEX.
    let err = draft_err(engine.make_pick(LEAGUE, TEAM_B, PlayerId(5)).await);
    assert_eq!(
        err,
        DraftError::NoEligibleSlot {
            player: PlayerId(5),
            position: Position::Rb,
        }
    );

    // A QB still fits.
    engine.make_pick(LEAGUE, TEAM_B, PlayerId(2)).await.unwrap();
}

#[tokio::test]
async fn test_unknown_player_is_rejected() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let err = draft_err(engine.make_pick(LEAGUE, TEAM_A, PlayerId(999)).await);
    assert_eq!(err, DraftError::UnknownPlayer(PlayerId(999)));
}

#[tokio::test]
async fn test_concurrent_picks_exactly_one_wins() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    // Two clients race the same turn with different players.
    let e1 = engine.clone();
    let e2 = engine.clone();
    let first = tokio::spawn(async move { e1.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await });
    let second = tokio::spawn(async move { e2.make_pick(LEAGUE, TEAM_A, PlayerId(3)).await });

    let results = [first.await.unwrap(), second.await.unwrap()];
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one racing pick must commit");

    // The loser got a stale-view rejection, never a partial write.
    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loser.as_ref().unwrap_err(),
        EngineError::Draft(
            DraftError::PickNoLongerValid { .. } | DraftError::NotYourTurn { .. }
        )
    ));

    let room = engine.room(LEAGUE).await.unwrap();
    assert_eq!(room.current_pick, 1);
    assert_eq!(engine.roster(LEAGUE, TEAM_A).await.unwrap().len(), 1);
}

// =========================================================================
// Auto-pick
// =========================================================================

#[tokio::test]
async fn test_auto_pick_takes_best_available() {
    let (engine, sink) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let room = engine.auto_pick(LEAGUE, 0).await.unwrap();
    assert_eq!(room.current_pick, 1);

    let roster = engine.roster(LEAGUE, TEAM_A).await.unwrap();
    assert_eq!(roster.len(), 1);
    // Rank 1 is the RB with id 1.
    assert_eq!(roster[0].player_id, PlayerId(1));

    assert!(sink.events().await.iter().any(|e| matches!(
        e,
        DraftEvent::PickMade { team_id, player_id, pick_number: 0 }
            if *team_id == TEAM_A && *player_id == PlayerId(1)
    )));
}

#[tokio::test]
async fn test_auto_pick_with_stale_guard_is_benign() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();
    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();

    // The expiry for pick 0 fires after the manual pick resolved it.
    let err = engine.auto_pick(LEAGUE, 0).await.unwrap_err();
    assert!(err.is_stale_pick());
    assert_eq!(engine.room(LEAGUE).await.unwrap().current_pick, 1);
}

#[tokio::test]
async fn test_auto_pick_skips_turn_when_nothing_fits() {
    // Catalog of QBs only: once a team has its QB, nothing fits.
    let catalog = vec![
        player(1, Position::Qb, 1),
        player(2, Position::Qb, 2),
        player(3, Position::Qb, 3),
    ];
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], catalog).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    engine.make_pick(LEAGUE, TEAM_A, PlayerId(1)).await.unwrap();
    engine.make_pick(LEAGUE, TEAM_B, PlayerId(2)).await.unwrap();

    // Round 2, B on the clock: QB slot full, RB catalog empty. The turn
    // advances without drafting anyone.
    let room = engine.auto_pick(LEAGUE, 2).await.unwrap();
    assert_eq!(room.current_pick, 3);
    assert_eq!(engine.roster(LEAGUE, TEAM_B).await.unwrap().len(), 1);

    // Last turn skips too, which completes the draft.
    let room = engine.auto_pick(LEAGUE, 3).await.unwrap();
    assert_eq!(room.status, DraftStatus::Completed);
}

// =========================================================================
// Supervisor
// =========================================================================

async fn wait_until<F>(mut check: F)
where
    F: AsyncFnMut() -> bool,
{
    for _ in 0..1_000 {
        if check().await {
            return;
        }
        time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition never reached");
}

#[tokio::test(start_paused = true)]
async fn test_supervisor_auto_picks_on_expiry() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let config = ClockConfig {
        turn_duration: Duration::from_secs(10),
        ..Default::default()
    };
    let supervisor = spawn_supervisor(engine.clone(), LEAGUE, config);
    supervisor.arm(0).await;

    time::advance(Duration::from_secs(10)).await;
    let e = engine.clone();
    wait_until(async move || e.room(LEAGUE).await.unwrap().current_pick == 1).await;
    assert_eq!(engine.roster(LEAGUE, TEAM_A).await.unwrap().len(), 1);

    // The supervisor re-armed itself for the next turn.
    time::advance(Duration::from_secs(10)).await;
    let e = engine.clone();
    wait_until(async move || e.room(LEAGUE).await.unwrap().current_pick == 2).await;
    assert_eq!(engine.roster(LEAGUE, TEAM_B).await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_arm_returns_only_after_clock_is_armed() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let config = ClockConfig {
        turn_duration: Duration::from_secs(10),
        ..Default::default()
    };
    let supervisor = spawn_supervisor(engine.clone(), LEAGUE, config);

    // Advancing the instant `arm` returns must still trip the deadline:
    // the acknowledgement means the clock was armed, not merely queued.
    supervisor.arm(0).await;
    time::advance(Duration::from_secs(10)).await;

    let e = engine.clone();
    wait_until(async move || e.room(LEAGUE).await.unwrap().current_pick == 1).await;
    assert_eq!(engine.roster(LEAGUE, TEAM_A).await.unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expiry_loses_to_manual_pick() {
    let (engine, _) = engine_with(vec![TEAM_A, TEAM_B], mixed_catalog()).await;
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let config = ClockConfig {
        turn_duration: Duration::from_secs(10),
        ..Default::default()
    };
    let supervisor = spawn_supervisor(engine.clone(), LEAGUE, config);
    supervisor.arm(0).await;

    // Manual pick resolves the turn; nobody re-arms the supervisor.
    engine.make_pick(LEAGUE, TEAM_A, PlayerId(2)).await.unwrap();

    time::advance(Duration::from_secs(20)).await;
    time::sleep(Duration::from_millis(50)).await;

    // The stale expiry changed nothing: one pick, the one A chose.
    let room = engine.room(LEAGUE).await.unwrap();
    assert_eq!(room.current_pick, 1);
    let roster = engine.roster(LEAGUE, TEAM_A).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].player_id, PlayerId(2));
}

/// Store whose pick commits fail a set number of times.
#[derive(Clone)]
struct FailingStore {
    inner: MemoryStore,
    commit_failures: Arc<AtomicU32>,
}

impl DraftStore for FailingStore {
    async fn load_room(&self, league: LeagueId) -> Result<DraftRoom, StoreError> {
        self.inner.load_room(league).await
    }

    async fn update_room(
        &self,
        room: &DraftRoom,
        expected: DraftStatus,
    ) -> Result<(), StoreError> {
        self.inner.update_room(room, expected).await
    }

    async fn commit_pick(
        &self,
        league: LeagueId,
        expected_pick: u32,
        assignment: Option<RosterAssignment>,
        advance: TurnAdvance,
    ) -> Result<DraftRoom, StoreError> {
        if self
            .commit_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StoreError::Backend("injected commit failure".into()));
        }
        self.inner
            .commit_pick(league, expected_pick, assignment, advance)
            .await
    }

    async fn reset_draft(&self, league: LeagueId, week: u32) -> Result<DraftRoom, StoreError> {
        self.inner.reset_draft(league, week).await
    }

    async fn team_roster(
        &self,
        league: LeagueId,
        team: TeamId,
        week: u32,
    ) -> Result<Vec<RosterAssignment>, StoreError> {
        self.inner.team_roster(league, team, week).await
    }

    async fn league_assignments(
        &self,
        league: LeagueId,
        week: u32,
    ) -> Result<Vec<RosterAssignment>, StoreError> {
        self.inner.league_assignments(league, week).await
    }

    async fn catalog(&self, league: LeagueId) -> Result<Vec<PlayerInfo>, StoreError> {
        self.inner.catalog(league).await
    }

    async fn teams(&self, league: LeagueId) -> Result<Vec<TeamId>, StoreError> {
        self.inner.teams(league).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_supervisor_pauses_draft_after_repeated_failures() {
    let inner = MemoryStore::new();
    inner
        .insert_league(LEAGUE, vec![TEAM_A, TEAM_B], mixed_catalog())
        .await;
    let store = FailingStore {
        inner,
        // More failures than the supervisor will tolerate.
        commit_failures: Arc::new(AtomicU32::new(10)),
    };

    let sink = RecordingSink::default();
    let engine = DraftEngine::new(
        store,
        OwnerTable::new().with_owner(LEAGUE, OWNER),
        sink.clone(),
        EngineConfig {
            rules: short_rules(),
            ..Default::default()
        },
    );
    set_order(engine.store(), vec![TEAM_A, TEAM_B]).await;
    engine.start_draft(LEAGUE, OWNER).await.unwrap();

    let config = ClockConfig {
        turn_duration: Duration::from_secs(10),
        retry_delay: Duration::from_secs(2),
        max_consecutive_failures: 3,
    };
    let supervisor = spawn_supervisor(engine.clone(), LEAGUE, config);
    supervisor.arm(0).await;

    // First expiry plus two retries exhausts the failure budget; the
    // supervisor pauses the draft instead of burning the turn.
    time::advance(Duration::from_secs(30)).await;
    let e = engine.clone();
    wait_until(async move || e.room(LEAGUE).await.unwrap().status == DraftStatus::Pending).await;

    let room = engine.room(LEAGUE).await.unwrap();
    assert_eq!(room.current_pick, 0, "no turn was consumed");
    assert!(sink.events().await.contains(&DraftEvent::DraftPaused));
}
