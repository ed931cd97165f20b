//! The client-side channel seam.
//!
//! [`EventChannel`] abstracts how a client reaches its draft room. The
//! in-process implementation wires straight into a [`RoomManager`]; a
//! deployment gateway substitutes a WebSocket-backed one. The subscriber
//! is written against the trait, so its reconnect behavior is testable
//! with a channel that fails on purpose.

use std::future::Future;

use tokio::sync::mpsc;
use warroom_protocol::{DraftEvent, EventFrame, LeagueId, TeamId};

use crate::{RoomError, RoomManager};

/// One established connection to a draft room.
///
/// `frames` yields stamped broadcasts until the connection drops.
/// `outbound` carries the client's own events (presence chatter) back to
/// the room; dropping it ends the connection.
pub struct EventConnection {
    pub frames: mpsc::UnboundedReceiver<EventFrame>,
    pub outbound: mpsc::UnboundedSender<DraftEvent>,
}

/// Connects a team's client to a league's event stream.
///
/// Declared in desugared `impl Future + Send` form: the subscriber task
/// awaits `connect` from inside `tokio::spawn`.
pub trait EventChannel: Send + Sync + 'static {
    fn connect(
        &self,
        league: LeagueId,
        team: TeamId,
    ) -> impl Future<Output = Result<EventConnection, RoomError>> + Send;
}

/// Channel implementation for clients living in the server process
/// (tests, bots, the demo binary).
#[derive(Clone)]
pub struct InProcessChannel {
    manager: RoomManager,
}

impl InProcessChannel {
    pub fn new(manager: RoomManager) -> Self {
        Self { manager }
    }
}

impl EventChannel for InProcessChannel {
    async fn connect(&self, league: LeagueId, team: TeamId) -> Result<EventConnection, RoomError> {
        let handle = self.manager.open(league).await;

        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        handle.join(team, frame_tx).await?;

        // Forward the client's outbound events into the room. When the
        // client drops its sender the forwarder leaves on its behalf.
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<DraftEvent>();
        tokio::spawn(async move {
            while let Some(event) = out_rx.recv().await {
                if handle.publish(event).await.is_err() {
                    break;
                }
            }
            let _ = handle.leave(team).await;
        });

        Ok(EventConnection {
            frames: frame_rx,
            outbound: out_tx,
        })
    }
}
