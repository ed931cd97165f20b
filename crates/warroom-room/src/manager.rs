//! Room manager: opens, tracks, and routes events to per-league rooms.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use warroom_protocol::{DraftEvent, LeagueId};

use crate::room::spawn_room;
use crate::{RoomError, RoomHandle};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active draft rooms, one per league.
///
/// Cheap to clone; clones share the room table. This is the entry point
/// for fan-out from higher layers (the engine's event sink, the
/// gateway's accept loop).
#[derive(Clone, Default)]
pub struct RoomManager {
    rooms: Arc<Mutex<HashMap<LeagueId, RoomHandle>>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the room for `league`, spawning its actor on first use.
    pub async fn open(&self, league: LeagueId) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(league)
            .or_insert_with(|| {
                tracing::info!(%league, "spawning draft room");
                spawn_room(league, DEFAULT_CHANNEL_SIZE)
            })
            .clone()
    }

    /// Broadcasts to a league's room if one is open.
    ///
    /// No room means no connected clients: the event has no audience and
    /// is dropped, which is the correct fire-and-forget behavior.
    pub async fn publish(&self, league: LeagueId, event: DraftEvent) {
        let handle = {
            let rooms = self.rooms.lock().await;
            rooms.get(&league).cloned()
        };
        match handle {
            Some(handle) => {
                if handle.publish(event).await.is_err() {
                    tracing::warn!(%league, "publish to dead room, dropping");
                    self.rooms.lock().await.remove(&league);
                }
            }
            None => {
                tracing::trace!(%league, "no open room, event dropped");
            }
        }
    }

    /// Shuts down and forgets a league's room.
    pub async fn close(&self, league: LeagueId) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .lock()
            .await
            .remove(&league)
            .ok_or(RoomError::Unavailable(league))?;
        handle.shutdown().await
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
