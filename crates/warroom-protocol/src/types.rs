//! Wire types for the draft room: identity newtypes, the closed
//! [`DraftEvent`] enumeration, and the [`EventFrame`] wrapper.
//!
//! Everything here is transport-only. Events are created at the moment a
//! state transition succeeds, broadcast once (best-effort), and discarded.
//! They are never a system of record — any client must be able to rebuild
//! correct behavior from the persisted draft state alone.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A league. One draft room exists per league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u64);

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L-{}", self.0)
    }
}

/// A fantasy team within a league. The unit that owns roster slots and
/// takes turns on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// A draftable real-world player from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// An authenticated human user. Identity itself is an external concern;
/// Warroom only ever sees the opaque claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// The logical channel name for a league's draft room.
///
/// Derived, never stored. Every participant (server fan-out, gateway,
/// clients) computes the same name from the league id.
pub fn room_channel(league_id: LeagueId) -> String {
    format!("draft:{league_id}")
}

// ---------------------------------------------------------------------------
// DraftEvent
// ---------------------------------------------------------------------------

/// A draft-room event, broadcast best-effort to every connected client.
///
/// The enumeration is closed and each variant carries exactly the fields
/// its type requires. Receivers treat `pick_made`/`turn_changed` as hints
/// to refetch authoritative state — the payload is never trusted to mutate
/// local turn order or eligibility directly, so a forged or stale broadcast
/// cannot corrupt a client's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEvent {
    /// A pick was committed: `team_id` drafted `player_id` at `pick_number`.
    PickMade {
        team_id: TeamId,
        player_id: PlayerId,
        pick_number: u32,
    },

    /// The clock moved to a new turn. `deadline_ms` is wall-clock
    /// milliseconds since the Unix epoch.
    TurnChanged {
        team_id: TeamId,
        pick_number: u32,
        deadline_ms: u64,
    },

    /// The draft left `pending`. `team_id` is the first team on the clock.
    DraftStarted { team_id: TeamId, deadline_ms: u64 },

    /// The draft was paused; the turn clock is disarmed.
    DraftPaused,

    /// The draft reached its final pick or was completed by an admin.
    DraftCompleted,

    /// A team's client joined the draft room.
    PresenceJoined { team_id: TeamId },

    /// A team's client left the draft room (or its connection dropped).
    PresenceLeft { team_id: TeamId },

    /// A client asks who else is here. Peers answer with
    /// `presence_response`; the requester collects answers for a short
    /// window. Purely advisory.
    PresenceRequest { team_id: TeamId },

    /// Answer to a `presence_request`, carrying the responder's team.
    PresenceResponse { team_id: TeamId },
}

impl DraftEvent {
    /// Whether this event should prompt a receiver to re-read
    /// authoritative draft state.
    pub fn is_state_hint(&self) -> bool {
        matches!(
            self,
            Self::PickMade { .. }
                | Self::TurnChanged { .. }
                | Self::DraftStarted { .. }
                | Self::DraftPaused
                | Self::DraftCompleted
        )
    }

    /// Whether this is presence chatter (advisory, never a state hint).
    pub fn is_presence(&self) -> bool {
        matches!(
            self,
            Self::PresenceJoined { .. }
                | Self::PresenceLeft { .. }
                | Self::PresenceRequest { .. }
                | Self::PresenceResponse { .. }
        )
    }
}

/// Human-readable form for the activity log.
impl fmt::Display for DraftEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PickMade {
                team_id,
                player_id,
                pick_number,
            } => write!(f, "{team_id} drafted {player_id} (pick {pick_number})"),
            Self::TurnChanged {
                team_id,
                pick_number,
                ..
            } => write!(f, "{team_id} is on the clock (pick {pick_number})"),
            Self::DraftStarted { team_id, .. } => {
                write!(f, "draft started, {team_id} is on the clock")
            }
            Self::DraftPaused => write!(f, "draft paused"),
            Self::DraftCompleted => write!(f, "draft completed"),
            Self::PresenceJoined { team_id } => write!(f, "{team_id} joined the room"),
            Self::PresenceLeft { team_id } => write!(f, "{team_id} left the room"),
            Self::PresenceRequest { team_id } => write!(f, "{team_id} asked who is here"),
            Self::PresenceResponse { team_id } => write!(f, "{team_id} is here"),
        }
    }
}

// ---------------------------------------------------------------------------
// EventFrame
// ---------------------------------------------------------------------------

/// The wire wrapper around a [`DraftEvent`].
///
/// `seq` is per-room and monotonically increasing, stamped by the room
/// actor at broadcast time. Delivery is at-most-once, so a client that
/// observes a gap in `seq` knows it missed something — the gap is a
/// refetch hint, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFrame {
    /// Per-room monotonic sequence number, starting at 1.
    pub seq: u64,

    /// Wall-clock milliseconds since the Unix epoch at broadcast time.
    pub sent_at_ms: u64,

    /// The event itself.
    pub event: DraftEvent,
}

// =========================================================================
// Tests
// =========================================================================
