//! Room actor: an isolated Tokio task that fans events out to every
//! client connected to one league's draft.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. The actor owns the per-room sequence counter:
//! every broadcast is stamped exactly once, in order, at the moment it
//! leaves the room.

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use warroom_core::now_ms;
use warroom_protocol::{DraftEvent, EventFrame, LeagueId, TeamId, room_channel};

use crate::RoomError;

/// Channel sender for delivering stamped frames to one client connection.
pub type FrameSender = mpsc::UnboundedSender<EventFrame>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Attach a team's connection. A second join for the same team
    /// replaces the old sender — reconnects supersede stale connections.
    Join {
        team_id: TeamId,
        sender: FrameSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Detach a team's connection.
    Leave {
        team_id: TeamId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Broadcast an event to every member. Fire-and-forget: the room
    /// never blocks on slow clients and never reports delivery.
    Publish { event: DraftEvent },

    /// Who is currently connected. Advisory only.
    Presence { reply: oneshot::Sender<Vec<TeamId>> },

    /// Shut down the room.
    Shutdown,
}

/// Handle to a running room actor. Cheap to clone — just an
/// `mpsc::Sender` wrapper. The `RoomManager` holds one per league.
#[derive(Clone)]
pub struct RoomHandle {
    league_id: LeagueId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn league_id(&self) -> LeagueId {
        self.league_id
    }

    /// Attaches a connection for `team_id`.
    pub async fn join(&self, team_id: TeamId, sender: FrameSender) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                team_id,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))?
    }

    /// Detaches `team_id`'s connection.
    pub async fn leave(&self, team_id: TeamId) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                team_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))?
    }

    /// Broadcasts an event to the room (fire-and-forget).
    pub async fn publish(&self, event: DraftEvent) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Publish { event })
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))
    }

    /// Teams with a live connection right now.
    pub async fn presence(&self) -> Result<Vec<TeamId>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Presence { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))
    }

    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.league_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    league_id: LeagueId,
    /// Per-connection outbound channels, keyed by team.
    senders: HashMap<TeamId, FrameSender>,
    /// Next sequence number to stamp. Starts at 1; never reused.
    next_seq: u64,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(channel = %room_channel(self.league_id), "draft room opened");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    team_id,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(team_id, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { team_id, reply } => {
                    let result = self.handle_leave(team_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Publish { event } => {
                    self.broadcast(event);
                }
                RoomCommand::Presence { reply } => {
                    let mut teams: Vec<TeamId> = self.senders.keys().copied().collect();
                    teams.sort();
                    let _ = reply.send(teams);
                }
                RoomCommand::Shutdown => {
                    tracing::info!(league = %self.league_id, "draft room shutting down");
                    break;
                }
            }
        }

        tracing::info!(league = %self.league_id, "draft room closed");
    }

    fn handle_join(&mut self, team_id: TeamId, sender: FrameSender) -> Result<(), RoomError> {
        let replaced = self.senders.insert(team_id, sender).is_some();
        tracing::info!(
            league = %self.league_id,
            %team_id,
            members = self.senders.len(),
            replaced,
            "client joined room"
        );

        // The joiner sees its own presence_joined; that doubles as the
        // connection-established acknowledgement.
        self.broadcast(DraftEvent::PresenceJoined { team_id });
        Ok(())
    }

    fn handle_leave(&mut self, team_id: TeamId) -> Result<(), RoomError> {
        if self.senders.remove(&team_id).is_none() {
            return Err(RoomError::NotJoined {
                league: self.league_id,
                team: team_id,
            });
        }
        tracing::info!(
            league = %self.league_id,
            %team_id,
            members = self.senders.len(),
            "client left room"
        );
        self.broadcast(DraftEvent::PresenceLeft { team_id });
        Ok(())
    }

    /// Stamps and fans out one event. Dead receivers are dropped from
    /// the member map instead of failing the broadcast.
    fn broadcast(&mut self, event: DraftEvent) {
        let frame = EventFrame {
            seq: self.next_seq,
            sent_at_ms: now_ms(),
            event,
        };
        self.next_seq += 1;

        self.senders
            .retain(|_, sender| sender.send(frame.clone()).is_ok());

        tracing::trace!(
            league = %self.league_id,
            seq = frame.seq,
            members = self.senders.len(),
            "event broadcast"
        );
    }
}

/// Spawns a new room actor task and returns a handle to it.
pub(crate) fn spawn_room(league_id: LeagueId, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        league_id,
        senders: HashMap::new(),
        next_seq: 1,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        league_id,
        sender: tx,
    }
}
