//! The auto-pick supervisor: one task per running draft that turns
//! deadline expiries into pick transactions.
//!
//! The supervisor never mutates draft state itself — on expiry it calls
//! the same engine transaction manual picks use, guarded by the pick
//! index it armed for. A manual pick that lands at the same moment wins
//! at the store and the expiry resolves as a stale pick.

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant as TokioInstant;
use warroom_clock::{ClockConfig, TurnClock};
use warroom_protocol::LeagueId;

use crate::{Authorizer, DraftEngine, EventSink};
use warroom_store::DraftStore;

/// Commands from the service layer to a draft's supervisor.
///
/// `Arm` and `Resume` carry an acknowledgement reply: the caller needs
/// to know the deadline is actually armed, not merely queued, before it
/// reports the turn as open.
#[derive(Debug)]
pub enum SupervisorCommand {
    /// A new turn began; watch `pick_number`'s deadline.
    Arm {
        pick_number: u32,
        reply: oneshot::Sender<()>,
    },
    /// The current turn resolved without us; drop the deadline.
    Disarm,
    /// Draft paused: freeze until resumed.
    Pause,
    /// Draft resumed at `pick_number` with a fresh turn.
    Resume {
        pick_number: u32,
        reply: oneshot::Sender<()>,
    },
    /// Draft over; stop the task.
    Shutdown,
}

/// Handle to a running supervisor task.
#[derive(Clone)]
pub struct SupervisorHandle {
    league: LeagueId,
    sender: mpsc::Sender<SupervisorCommand>,
}

impl SupervisorHandle {
    pub fn league(&self) -> LeagueId {
        self.league
    }

    /// Arms the deadline for `pick_number`. Returns once the clock is
    /// armed, not merely once the command is queued.
    pub async fn arm(&self, pick_number: u32) {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SupervisorCommand::Arm {
            pick_number,
            reply: reply_tx,
        })
        .await;
        let _ = reply_rx.await;
    }

    pub async fn disarm(&self) {
        self.send(SupervisorCommand::Disarm).await;
    }

    pub async fn pause(&self) {
        self.send(SupervisorCommand::Pause).await;
    }

    /// Re-arms after a pause with a fresh full turn. Acknowledged like
    /// [`arm`](Self::arm).
    pub async fn resume(&self, pick_number: u32) {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SupervisorCommand::Resume {
            pick_number,
            reply: reply_tx,
        })
        .await;
        let _ = reply_rx.await;
    }

    pub async fn shutdown(&self) {
        self.send(SupervisorCommand::Shutdown).await;
    }

    async fn send(&self, cmd: SupervisorCommand) {
        if let Err(err) = self.sender.send(cmd).await {
            tracing::warn!(league = %self.league, cmd = ?err.0, "supervisor gone, command dropped");
        }
    }
}

/// Spawns the supervisor task for one league's draft.
pub fn spawn_supervisor<S, A, E>(
    engine: DraftEngine<S, A, E>,
    league: LeagueId,
    config: ClockConfig,
) -> SupervisorHandle
where
    S: DraftStore,
    A: Authorizer,
    E: EventSink,
{
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(run(engine, league, config, rx));
    SupervisorHandle { league, sender: tx }
}

async fn run<S, A, E>(
    engine: DraftEngine<S, A, E>,
    league: LeagueId,
    config: ClockConfig,
    mut commands: mpsc::Receiver<SupervisorCommand>,
) where
    S: DraftStore,
    A: Authorizer,
    E: EventSink,
{
    let config = config.validated();
    let mut clock = TurnClock::new(config.clone());
    let mut consecutive_failures = 0u32;

    tracing::info!(%league, "auto-pick supervisor started");

    loop {
        tokio::select! {
            cmd = commands.recv() => {
                match cmd {
                    Some(SupervisorCommand::Arm { pick_number, reply }) => {
                        clock.arm(pick_number);
                        consecutive_failures = 0;
                        let _ = reply.send(());
                    }
                    Some(SupervisorCommand::Disarm) => clock.disarm(),
                    Some(SupervisorCommand::Pause) => clock.pause(),
                    Some(SupervisorCommand::Resume { pick_number, reply }) => {
                        clock.resume(pick_number);
                        consecutive_failures = 0;
                        let _ = reply.send(());
                    }
                    Some(SupervisorCommand::Shutdown) | None => break,
                }
            }
            expiry = clock.wait_for_expiry() => {
                match engine.auto_pick(league, expiry.pick_number).await {
                    Ok(room) => {
                        consecutive_failures = 0;
                        if room.status.is_active() {
                            clock.arm(room.current_pick);
                        }
                    }
                    Err(err) if err.is_stale_pick() => {
                        // A manual pick beat the deadline to the store.
                        // Whoever advanced the turn re-arms us.
                        tracing::debug!(%league, pick = expiry.pick_number, "expiry lost to a pick");
                        consecutive_failures = 0;
                    }
                    Err(err) => {
                        consecutive_failures += 1;
                        tracing::error!(
                            %league,
                            pick = expiry.pick_number,
                            failures = consecutive_failures,
                            %err,
                            "auto-pick failed"
                        );
                        if consecutive_failures >= config.max_consecutive_failures {
                            // Stop burning turns on a broken backend; a
                            // human resumes once the cause is fixed.
                            if let Err(err) = engine.suspend(league).await {
                                tracing::error!(%league, %err, "failed to pause after repeated auto-pick errors");
                            }
                            clock.pause();
                            consecutive_failures = 0;
                        } else {
                            // Same turn, short delay before the retry.
                            clock.arm_at(
                                expiry.pick_number,
                                TokioInstant::now() + config.retry_delay,
                            );
                        }
                    }
                }
            }
        }
    }

    tracing::info!(%league, "auto-pick supervisor stopped");
}
