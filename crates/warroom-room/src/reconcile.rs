//! Snapshot reconciliation loop.
//!
//! Events are delivery hints, not state. The reconciler owns the
//! client's authoritative view: it re-fetches the draft snapshot on a
//! fixed interval no matter what, and sooner when hinted. A client whose
//! event stream silently dies therefore converges within one poll
//! interval of the next change.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::time;
use warroom_core::DraftRoom;
use warroom_protocol::LeagueId;

use crate::RoomError;

/// Fetches the authoritative draft snapshot for a league.
///
/// Implemented over whatever read path the client has: an in-process
/// store for tests, an HTTP endpoint in deployment.
///
/// Declared in desugared `impl Future + Send` form so `Reconciler::run`
/// can be spawned; implementations write plain `async fn`.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch(&self, league: LeagueId) -> impl Future<Output = Result<DraftRoom, RoomError>> + Send;
}

/// Default interval between unconditional polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Periodic + hint-driven snapshot poller for one league.
pub struct Reconciler<S: SnapshotSource> {
    source: S,
    league: LeagueId,
    poll_interval: Duration,
    snapshot: watch::Sender<Option<DraftRoom>>,
    hint: Arc<Notify>,
}

impl<S: SnapshotSource> Reconciler<S> {
    /// Returns the reconciler plus the two ends the application keeps:
    /// the snapshot watch (the client's view) and the hint handle
    /// (`notify_one` to poll ahead of schedule).
    pub fn new(
        source: S,
        league: LeagueId,
        poll_interval: Duration,
    ) -> (Self, watch::Receiver<Option<DraftRoom>>, Arc<Notify>) {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let hint = Arc::new(Notify::new());
        let reconciler = Self {
            source,
            league,
            poll_interval,
            snapshot: snapshot_tx,
            hint: Arc::clone(&hint),
        };
        (reconciler, snapshot_rx, hint)
    }

    /// One fetch-and-compare. Returns whether the view changed.
    pub async fn poll_once(&self) -> Result<bool, RoomError> {
        let fresh = self.source.fetch(self.league).await?;
        let changed = self.snapshot.send_if_modified(|current| {
            if current.as_ref() == Some(&fresh) {
                false
            } else {
                *current = Some(fresh.clone());
                true
            }
        });
        if changed {
            tracing::debug!(league = %self.league, "snapshot updated");
        }
        Ok(changed)
    }

    /// Runs until the snapshot watch has no receivers left.
    ///
    /// Fetch failures are logged and absorbed; the next tick retries.
    /// Missing a hint while a poll is already running is harmless — that
    /// poll observes at least the state the hint was about.
    pub async fn run(self) {
        loop {
            if self.snapshot.is_closed() {
                tracing::debug!(league = %self.league, "reconciler stopped, no receivers");
                return;
            }

            if let Err(err) = self.poll_once().await {
                tracing::warn!(league = %self.league, %err, "snapshot poll failed");
            }

            tokio::select! {
                _ = time::sleep(self.poll_interval) => {}
                _ = self.hint.notified() => {
                    tracing::trace!(league = %self.league, "poll hint received");
                }
            }
        }
    }
}
