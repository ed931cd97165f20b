//! Snake-order math.
//!
//! The pick sequence is never stored or transmitted — every participant
//! recomputes it from the base order and the current pick index, so these
//! functions must stay pure and must be the only implementation of the
//! parity convention: 0-indexed even rounds run forward, odd rounds run
//! the base order in reverse.

use warroom_protocol::TeamId;

/// The 0-indexed round a pick belongs to.
pub fn round_of(pick: u32, team_count: u32) -> u32 {
    debug_assert!(team_count > 0);
    pick / team_count
}

/// The total number of picks in a draft.
pub fn total_picks(team_count: u32, rounds: u32) -> u32 {
    team_count * rounds
}

/// The team on the clock for `pick`, given the base order.
///
/// Returns `None` when the base order is empty (draft order not yet set).
pub fn team_on_clock(base_order: &[TeamId], pick: u32) -> Option<TeamId> {
    if base_order.is_empty() {
        return None;
    }
    let team_count = base_order.len() as u32;
    let round = pick / team_count;
    let position = (pick % team_count) as usize;

    let index = if round % 2 == 0 {
        position
    } else {
        base_order.len() - 1 - position
    };
    Some(base_order[index])
}
