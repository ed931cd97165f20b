//! One-shot turn deadline clock for Warroom drafts.
//!
//! Each in-progress draft has exactly one turn on the clock at a time.
//! [`TurnClock`] tracks that single deadline: armed when a turn begins,
//! fired once when the deadline elapses, disarmed when a pick lands
//! first. While unarmed or paused, [`TurnClock::wait_for_expiry`] pends
//! forever, which makes it safe to park in a `tokio::select!` branch.
//!
//! # Integration
//!
//! The clock sits inside the auto-pick supervisor's select loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* arm / disarm / pause */ }
//!         expiry = clock.wait_for_expiry() => {
//!             engine.auto_pick(league, expiry.pick_number).await?;
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing knobs for a draft's turn clock and its supervisor.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    /// How long each team has to pick. Default: 90 seconds.
    pub turn_duration: Duration,
    /// Delay before retrying a failed auto-pick commit.
    pub retry_delay: Duration,
    /// Consecutive auto-pick failures tolerated before the supervisor
    /// pauses the draft instead of burning turns.
    pub max_consecutive_failures: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            turn_duration: Duration::from_secs(90),
            retry_delay: Duration::from_secs(2),
            max_consecutive_failures: 3,
        }
    }
}

impl ClockConfig {
    /// Minimum turn length the clock will accept.
    pub const MIN_TURN_DURATION: Duration = Duration::from_secs(5);

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TurnClock::new`]. A sub-minimum turn
    /// duration is clamped up; a zero failure cap is raised to 1 so the
    /// supervisor always gets at least one attempt.
    pub fn validated(mut self) -> Self {
        if self.turn_duration < Self::MIN_TURN_DURATION {
            warn!(
                requested_ms = self.turn_duration.as_millis() as u64,
                min_ms = Self::MIN_TURN_DURATION.as_millis() as u64,
                "turn_duration below minimum — clamping"
            );
            self.turn_duration = Self::MIN_TURN_DURATION;
        }
        if self.max_consecutive_failures == 0 {
            self.max_consecutive_failures = 1;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

/// A fired deadline, returned by [`TurnClock::wait_for_expiry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    /// The pick index the deadline was armed for. The supervisor passes
    /// this through as the commit guard, so an expiry that raced with a
    /// manual pick loses cleanly at the store.
    pub pick_number: u32,
    /// How far past the deadline the task actually woke.
    pub late_by: Duration,
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Counters for one clock's lifetime.
#[derive(Debug, Clone, Default)]
pub struct ClockMetrics {
    /// Deadlines that fired.
    pub total_expiries: u64,
    /// Deadlines cancelled by a pick landing first.
    pub total_disarms: u64,
    /// Worst observed wakeup lateness.
    pub max_late: Duration,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

struct Armed {
    pick_number: u32,
    deadline: TokioInstant,
}

/// The single-deadline turn clock. One per running draft.
pub struct TurnClock {
    config: ClockConfig,
    armed: Option<Armed>,
    paused: bool,
    metrics: ClockMetrics,
}

impl TurnClock {
    pub fn new(config: ClockConfig) -> Self {
        let config = config.validated();
        debug!(
            turn_ms = config.turn_duration.as_millis() as u64,
            "turn clock created"
        );
        Self {
            config,
            armed: None,
            paused: false,
            metrics: ClockMetrics::default(),
        }
    }

    /// Arms a full-length turn for `pick_number`, replacing any previous
    /// deadline. Returns the instant the deadline will fire.
    pub fn arm(&mut self, pick_number: u32) -> TokioInstant {
        let deadline = TokioInstant::now() + self.config.turn_duration;
        self.arm_at(pick_number, deadline);
        deadline
    }

    /// Arms a deadline at an explicit instant. Used when the deadline was
    /// computed elsewhere (e.g. reconstructed from a persisted snapshot
    /// after a restart).
    pub fn arm_at(&mut self, pick_number: u32, deadline: TokioInstant) {
        trace!(pick = pick_number, "turn clock armed");
        self.armed = Some(Armed {
            pick_number,
            deadline,
        });
    }

    /// Cancels the pending deadline. Idempotent; called when a manual
    /// pick resolves the turn before time runs out.
    pub fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            trace!(pick = armed.pick_number, "turn clock disarmed");
            self.metrics.total_disarms += 1;
        }
    }

    /// Freezes the clock. `wait_for_expiry` pends until [`resume`](Self::resume).
    /// The armed deadline is dropped; resuming grants a fresh turn.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.armed = None;
            debug!("turn clock paused");
        }
    }

    /// Unfreezes the clock and arms a fresh full-length turn for
    /// `pick_number`. Time spent paused never counts against a team.
    pub fn resume(&mut self, pick_number: u32) -> TokioInstant {
        self.paused = false;
        debug!(pick = pick_number, "turn clock resumed");
        self.arm(pick_number)
    }

    /// Waits for the armed deadline to elapse.
    ///
    /// Pends forever while unarmed or paused — `tokio::select!` still
    /// services its other branches. Fires at most once per arm: the
    /// deadline is consumed before this returns, so the caller must
    /// re-arm for the next turn.
    pub async fn wait_for_expiry(&mut self) -> Expiry {
        let deadline = match &self.armed {
            Some(armed) if !self.paused => armed.deadline,
            _ => {
                // This future never completes — select! handles other branches.
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(deadline).await;

        // Consume the deadline so a second await pends instead of
        // re-firing for a turn that is already being resolved.
        let armed = self.armed.take().unwrap_or_else(|| unreachable!());
        let late_by = TokioInstant::now().saturating_duration_since(deadline);

        self.metrics.total_expiries += 1;
        if late_by > self.metrics.max_late {
            self.metrics.max_late = late_by;
        }
        if late_by > Duration::from_secs(1) {
            warn!(
                pick = armed.pick_number,
                late_ms = late_by.as_millis() as u64,
                "turn expiry fired late"
            );
        }

        debug!(pick = armed.pick_number, "turn expired");
        Expiry {
            pick_number: armed.pick_number,
            late_by,
        }
    }

    /// Whether a deadline is currently pending.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The pick index of the pending deadline, if any.
    pub fn armed_pick(&self) -> Option<u32> {
        self.armed.as_ref().map(|a| a.pick_number)
    }

    pub fn turn_duration(&self) -> Duration {
        self.config.turn_duration
    }

    pub fn metrics(&self) -> &ClockMetrics {
        &self.metrics
    }
}
