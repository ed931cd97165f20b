//! Client-side subscription state machine.
//!
//! One [`DraftSubscriber`] task owns a team's connection to its draft
//! room for the life of the draft page. Because reconnection lives
//! inside a single loop, there is never more than one connection attempt
//! in flight — the failure mode where a flapping network stacks up
//! parallel reconnects cannot occur by construction.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time;
use warroom_protocol::{DraftEvent, LeagueId, TeamId};

use crate::{EventChannel, EventConnection};

/// Where the subscriber currently stands with its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection and not trying. Terminal once the handle drops.
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// Live stream established.
    Connected,
    /// Last attempt or stream failed; waiting out the backoff delay.
    Backoff,
}

/// What the subscriber surfaces to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSignal {
    /// A room broadcast. Events flagged `is_state_hint` should prompt
    /// the application to nudge its reconciler.
    Event(DraftEvent),

    /// The subscriber knows its view may be stale: emitted on every
    /// (re)connect and on any gap in the frame sequence. Re-read
    /// authoritative state now rather than waiting for the next poll.
    RefreshNeeded,

    /// Connection state moved, for status UI.
    StateChanged(ConnectionState),
}

#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Fixed delay between reconnect attempts.
    pub backoff: Duration,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            backoff: Duration::from_secs(3),
        }
    }
}

/// Handle held by the application while the subscriber task runs.
/// Dropping it stops the subscriber.
pub struct SubscriberHandle {
    outbound: mpsc::UnboundedSender<DraftEvent>,
    state: watch::Receiver<ConnectionState>,
}

impl SubscriberHandle {
    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Waits until the subscriber reaches `target`.
    pub async fn wait_for(&mut self, target: ConnectionState) {
        while *self.state.borrow_and_update() != target {
            if self.state.changed().await.is_err() {
                return;
            }
        }
    }

    /// Asks the room who is present. Peers answer with
    /// `presence_response` events, which arrive as [`ClientSignal::Event`]s;
    /// collect them for a short window and treat the result as advisory.
    pub fn request_presence(&self, team: TeamId) {
        let _ = self
            .outbound
            .send(DraftEvent::PresenceRequest { team_id: team });
    }

    /// Sends an arbitrary client event into the room.
    pub fn send(&self, event: DraftEvent) {
        let _ = self.outbound.send(event);
    }
}

/// Spawns the subscriber task for one team's view of one draft.
///
/// Returns the handle and the signal stream the application consumes.
pub fn spawn_subscriber<C: EventChannel>(
    channel: C,
    league: LeagueId,
    team: TeamId,
    config: SubscriberConfig,
) -> (SubscriberHandle, mpsc::UnboundedReceiver<ClientSignal>) {
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(ConnectionState::Disconnected);

    let subscriber = Subscriber {
        channel,
        league,
        team,
        config,
        signals: signal_tx,
        commands: out_rx,
        state: state_tx,
    };
    tokio::spawn(subscriber.run());

    (
        SubscriberHandle {
            outbound: out_tx,
            state: state_rx,
        },
        signal_rx,
    )
}

struct Subscriber<C: EventChannel> {
    channel: C,
    league: LeagueId,
    team: TeamId,
    config: SubscriberConfig,
    signals: mpsc::UnboundedSender<ClientSignal>,
    commands: mpsc::UnboundedReceiver<DraftEvent>,
    state: watch::Sender<ConnectionState>,
}

enum StreamEnd {
    /// The connection dropped; reconnect after backoff.
    Lost,
    /// The handle was dropped; stop for good.
    Shutdown,
}

impl<C: EventChannel> Subscriber<C> {
    async fn run(mut self) {
        loop {
            self.set_state(ConnectionState::Connecting);

            match self.channel.connect(self.league, self.team).await {
                Ok(conn) => {
                    self.set_state(ConnectionState::Connected);
                    // The view went dark for some period; whatever was
                    // missed, a fresh snapshot covers it.
                    self.signal(ClientSignal::RefreshNeeded);

                    if let StreamEnd::Shutdown = self.pump(conn).await {
                        break;
                    }
                    tracing::warn!(league = %self.league, team = %self.team, "event stream lost");
                }
                Err(err) => {
                    tracing::warn!(
                        league = %self.league,
                        team = %self.team,
                        %err,
                        "connect failed"
                    );
                }
            }

            self.set_state(ConnectionState::Backoff);
            time::sleep(self.config.backoff).await;
        }

        self.set_state(ConnectionState::Disconnected);
        tracing::debug!(league = %self.league, team = %self.team, "subscriber stopped");
    }

    /// Services one live connection until it drops or the handle goes away.
    async fn pump(&mut self, mut conn: EventConnection) -> StreamEnd {
        let mut last_seq: Option<u64> = None;

        loop {
            tokio::select! {
                frame = conn.frames.recv() => {
                    let Some(frame) = frame else {
                        return StreamEnd::Lost;
                    };

                    // At-most-once delivery: a sequence gap means a
                    // missed broadcast, and the snapshot is the recovery
                    // path, never event replay.
                    if let Some(last) = last_seq {
                        if frame.seq != last + 1 {
                            tracing::debug!(
                                league = %self.league,
                                expected = last + 1,
                                got = frame.seq,
                                "sequence gap"
                            );
                            self.signal(ClientSignal::RefreshNeeded);
                        }
                    }
                    last_seq = Some(frame.seq);

                    // Answer peers' presence probes; ignore our own echo.
                    if let DraftEvent::PresenceRequest { team_id } = frame.event {
                        if team_id != self.team {
                            let _ = conn.outbound.send(DraftEvent::PresenceResponse {
                                team_id: self.team,
                            });
                        }
                    }

                    self.signal(ClientSignal::Event(frame.event));
                }
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(event) => {
                            let _ = conn.outbound.send(event);
                        }
                        None => return StreamEnd::Shutdown,
                    }
                }
            }
        }
    }

    fn set_state(&self, state: ConnectionState) {
        let changed = self.state.send_replace(state) != state;
        if changed {
            self.signal(ClientSignal::StateChanged(state));
        }
    }

    fn signal(&self, signal: ClientSignal) {
        let _ = self.signals.send(signal);
    }
}
