//! The draft lifecycle state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a draft room.
///
/// ```text
/// pending ⇄ in_progress → completed
///     \___________________↗
/// ```
///
/// - **Pending**: not started, or paused. The turn clock is disarmed.
/// - **InProgress**: picks are being made; the turn clock is armed.
/// - **Completed**: terminal. No further pick transactions are accepted.
///
/// The `in_progress → pending` back-transition is how pausing works; an
/// admin may complete a draft from either non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Pending,
    InProgress,
    Completed,
}

impl DraftStatus {
    /// Whether picks may currently be made.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether the draft has finished for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Pending, Self::InProgress) => true,
            (Self::InProgress, Self::Pending) => true,
            (Self::Pending | Self::InProgress, Self::Completed) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
