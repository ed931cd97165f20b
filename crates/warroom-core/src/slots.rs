//! Roster slots and the eligibility resolver.
//!
//! A roster is a set of named slot categories with fixed capacities. The
//! resolver maps a candidate player's position plus the team's current
//! occupancy to the single slot that would receive the player, or `None`
//! when the position family is full.
//!
//! Everything here is pure and deterministic — the interactive pick path
//! and the auto-pick policy both call [`eligible_slot`], which is what
//! guarantees they always agree on which picks are legal.

use serde::{Deserialize, Serialize};

/// A player's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    K,
    Def,
    Dp,
}

impl Position {
    /// All positions, in slot-table order.
    pub const ALL: [Position; 7] = [
        Self::Qb,
        Self::Rb,
        Self::Wr,
        Self::Te,
        Self::K,
        Self::Def,
        Self::Dp,
    ];

    /// The dedicated slot for this position.
    pub fn dedicated_slot(self) -> Slot {
        match self {
            Self::Qb => Slot::Qb,
            Self::Rb => Slot::Rb,
            Self::Wr => Slot::Wr,
            Self::Te => Slot::Te,
            Self::K => Slot::K,
            Self::Def => Slot::Def,
            Self::Dp => Slot::Dp,
        }
    }

    /// Whether this position may fill the shared FLEX slot once its
    /// dedicated slots are full. Only the two skill positions qualify.
    pub fn is_flex_eligible(self) -> bool {
        matches!(self, Self::Rb | Self::Wr)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Qb => "QB",
            Self::Rb => "RB",
            Self::Wr => "WR",
            Self::Te => "TE",
            Self::K => "K",
            Self::Def => "DEF",
            Self::Dp => "DP",
        };
        write!(f, "{s}")
    }
}

/// A roster slot category.
///
/// Dedicated slots mirror [`Position`]; `Flex` is shared by RB/WR; `Bench`
/// takes any enabled position once everything else is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Slot {
    Qb,
    Rb,
    Wr,
    Te,
    Flex,
    K,
    Def,
    Dp,
    Bench,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Qb => "QB",
            Self::Rb => "RB",
            Self::Wr => "WR",
            Self::Te => "TE",
            Self::Flex => "FLEX",
            Self::K => "K",
            Self::Def => "DEF",
            Self::Dp => "DP",
            Self::Bench => "BENCH",
        };
        write!(f, "{s}")
    }
}

/// Per-slot capacities for a league's rosters.
///
/// A dedicated capacity of 0 disables the position outright — a disabled
/// position is never eligible, even when FLEX or BENCH have room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRules {
    pub qb: u8,
    pub rb: u8,
    pub wr: u8,
    pub te: u8,
    pub flex: u8,
    pub k: u8,
    pub def: u8,
    pub dp: u8,
    pub bench: u8,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            qb: 1,
            rb: 2,
            wr: 2,
            te: 1,
            flex: 1,
            k: 1,
            def: 1,
            dp: 1,
            bench: 0,
        }
    }
}

impl RosterRules {
    /// Capacity of a single slot category.
    pub fn capacity(&self, slot: Slot) -> u8 {
        match slot {
            Slot::Qb => self.qb,
            Slot::Rb => self.rb,
            Slot::Wr => self.wr,
            Slot::Te => self.te,
            Slot::Flex => self.flex,
            Slot::K => self.k,
            Slot::Def => self.def,
            Slot::Dp => self.dp,
            Slot::Bench => self.bench,
        }
    }

    /// Total roster size. This is also the number of draft rounds.
    pub fn roster_size(&self) -> u32 {
        [
            self.qb, self.rb, self.wr, self.te, self.flex, self.k, self.def,
            self.dp, self.bench,
        ]
        .iter()
        .map(|&c| u32::from(c))
        .sum()
    }
}

/// Current slot occupancy for one team's roster week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCounts {
    counts: [u8; 9],
}

impl SlotCounts {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(slot: Slot) -> usize {
        match slot {
            Slot::Qb => 0,
            Slot::Rb => 1,
            Slot::Wr => 2,
            Slot::Te => 3,
            Slot::Flex => 4,
            Slot::K => 5,
            Slot::Def => 6,
            Slot::Dp => 7,
            Slot::Bench => 8,
        }
    }

    /// How many assignments currently occupy `slot`.
    pub fn occupied(&self, slot: Slot) -> u8 {
        self.counts[Self::index(slot)]
    }

    /// Records one assignment in `slot`.
    pub fn fill(&mut self, slot: Slot) {
        self.counts[Self::index(slot)] =
            self.counts[Self::index(slot)].saturating_add(1);
    }

    /// Total assignments across all slots.
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }
}

impl FromIterator<Slot> for SlotCounts {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut counts = Self::new();
        for slot in iter {
            counts.fill(slot);
        }
        counts
    }
}

/// Resolves the slot a player at `position` would occupy, or `None` if the
/// roster cannot accept the player.
///
/// Preference order is fixed: the dedicated slot first, then FLEX for the
/// skill positions, then BENCH. Returning the *first* available slot keeps
/// the resolver deterministic, which the auto-pick path relies on.
pub fn eligible_slot(
    position: Position,
    counts: &SlotCounts,
    rules: &RosterRules,
) -> Option<Slot> {
    let dedicated = position.dedicated_slot();

    // A position with zero configured slots is disabled for this league.
    // It never spills into FLEX or BENCH.
    if rules.capacity(dedicated) == 0 {
        return None;
    }

    if counts.occupied(dedicated) < rules.capacity(dedicated) {
        return Some(dedicated);
    }

    if position.is_flex_eligible() && counts.occupied(Slot::Flex) < rules.capacity(Slot::Flex) {
        return Some(Slot::Flex);
    }

    if counts.occupied(Slot::Bench) < rules.capacity(Slot::Bench) {
        return Some(Slot::Bench);
    }

    None
}

// =========================================================================
// Tests
// =========================================================================
