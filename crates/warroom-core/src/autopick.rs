//! The deterministic auto-pick selection policy.
//!
//! When a turn's deadline elapses, the supervisor picks on behalf of the
//! team on the clock: the highest-ranked available player that fits some
//! roster slot. No randomness anywhere — given the same catalog, taken
//! set, and roster, the policy selects the same player every time, which
//! is what makes timeout behavior predictable and testable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use warroom_protocol::PlayerId;

use crate::slots::{Position, RosterRules, Slot, SlotCounts, eligible_slot};

/// A catalog row: a draftable player with a precomputed draft value.
/// `rank` ascends — 1 is the consensus best player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub rank: u32,
}

/// Selects the auto-pick for a roster, or `None` when no available player
/// fits any remaining slot (the skip-turn degenerate case).
///
/// `catalog` must be sorted by ascending `rank`; the scan stops at the
/// first player that is not yet taken and has an eligible slot.
pub fn select_auto_pick(
    catalog: &[PlayerInfo],
    taken: &HashSet<PlayerId>,
    counts: &SlotCounts,
    rules: &RosterRules,
) -> Option<(PlayerId, Slot)> {
    debug_assert!(
        catalog.windows(2).all(|w| w[0].rank <= w[1].rank),
        "catalog must be rank-sorted"
    );

    catalog
        .iter()
        .filter(|p| !taken.contains(&p.id))
        .find_map(|p| eligible_slot(p.position, counts, rules).map(|slot| (p.id, slot)))
}
