//! A runnable mock draft.
//!
//! Seeds one league with four teams and a ranked player pool, starts the
//! draft with a short turn clock, and serves it on a WebSocket. Connect
//! with any WebSocket client, send a `hello` naming the league and your
//! team, and pick with `make_pick` — or just watch the turn clock
//! auto-pick every idle turn until the board is full.
//!
//! ```text
//! RUST_LOG=debug cargo run -p mock-draft
//! websocat ws://127.0.0.1:8080
//! {"type": "hello", "league_id": 1, "team_id": 2}
//! {"type": "make_pick", "player_id": 9}
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use warroom::prelude::*;

const LEAGUE: LeagueId = LeagueId(1);
const COMMISSIONER: UserId = UserId(1);
const TURN: Duration = Duration::from_secs(15);
const ADDR: &str = "127.0.0.1:8080";

/// Ranked pool deep enough for four ten-slot rosters.
fn catalog() -> Vec<PlayerInfo> {
    let pool = [
        (Position::Qb, 8),
        (Position::Rb, 12),
        (Position::Wr, 12),
        (Position::Te, 6),
        (Position::K, 4),
        (Position::Def, 4),
        (Position::Dp, 4),
    ];

    let mut players = Vec::new();
    let mut id: u64 = 0;
    for (position, count) in pool {
        for _ in 0..count {
            id += 1;
            players.push(PlayerInfo {
                id: PlayerId(id),
                name: format!("{position:?} {id}"),
                position,
                rank: id as u32,
            });
        }
    }
    players
}

#[tokio::main]
async fn main() -> Result<(), WarroomError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = MemoryStore::new();
    let teams = vec![TeamId(1), TeamId(2), TeamId(3), TeamId(4)];
    store.insert_league(LEAGUE, teams, catalog()).await;

    let config = ServiceConfig::default().with_turn_duration(TURN);
    let service = DraftService::new(store, OpenAuthorizer, config);

    let order = service.randomize_draft_order(LEAGUE, COMMISSIONER).await?;
    tracing::info!(?order, "draft order randomized");

    let room = service.start_draft(LEAGUE, COMMISSIONER).await?;
    tracing::info!(
        on_clock = ?room.team_on_clock(),
        turn_secs = TURN.as_secs(),
        "draft started"
    );

    let gateway = DraftGateway::bind(ADDR, service).await?;
    tracing::info!("mock draft running on ws://{ADDR}");
    gateway.run().await
}
