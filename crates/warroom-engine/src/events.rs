//! Where committed transitions announce themselves.
//!
//! The engine publishes an event after, and only after, the store commit
//! succeeds. Publication is fire-and-forget: a sink that drops events
//! degrades clients to their reconciliation interval, nothing more.

use std::future::Future;

use warroom_protocol::{DraftEvent, LeagueId};

/// Receives events the engine emits on successful state transitions.
///
/// Declared in desugared `impl Future + Send` form: the supervisor task
/// awaits `publish` from inside `tokio::spawn`.
pub trait EventSink: Send + Sync + 'static {
    fn publish(&self, league: LeagueId, event: DraftEvent) -> impl Future<Output = ()> + Send;
}

/// Discards everything. For tests and headless tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    async fn publish(&self, _league: LeagueId, _event: DraftEvent) {}
}
