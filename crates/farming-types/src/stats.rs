//! The accumulated farming-session record and its component types.
//!
//! [`FarmingStats`] is the single record the display layer reads. It is
//! serialized in camelCase so the generated `TypeScript` bindings match the
//! field names the overlay already expects.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::rank::Rank;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A snapshot (or a delta) of the three sortie currencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Resources {
    /// Parts (metal), including the free allotment.
    pub parts: f64,
    /// Nutrients, including the free allotment.
    pub nutrients: f64,
    /// Power, including the free allotment.
    pub power: f64,
}

impl Resources {
    /// Build a resource triple.
    pub const fn new(parts: f64, nutrients: f64, power: f64) -> Self {
        Self {
            parts,
            nutrients,
            power,
        }
    }

    /// Amount consumed between `self` (the earlier baseline) and `current`.
    ///
    /// Each dimension is `self - current`; a negative dimension means the
    /// stockpile grew rather than shrank.
    pub fn consumed_since(&self, current: &Self) -> Self {
        Self {
            parts: self.parts - current.parts,
            nutrients: self.nutrients - current.nutrients,
            power: self.power - current.power,
        }
    }

    /// Returns `true` if any dimension is below zero.
    pub fn has_negative(&self) -> bool {
        self.parts < 0.0 || self.nutrients < 0.0 || self.power < 0.0
    }
}

// ---------------------------------------------------------------------------
// Drops
// ---------------------------------------------------------------------------

/// Per-rank drop counters.
pub type RankCounts = BTreeMap<Rank, u32>;

/// Returns a counter map with every [`Rank`] present at zero.
pub fn seeded_rank_counts() -> RankCounts {
    Rank::ALL.iter().map(|rank| (*rank, 0)).collect()
}

/// Cumulative unit and equipment drops, bucketed by rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Drops {
    /// Unit drops by rank.
    pub units: RankCounts,
    /// Equipment drops by rank.
    pub equipments: RankCounts,
}

impl Default for Drops {
    fn default() -> Self {
        Self {
            units: seeded_rank_counts(),
            equipments: seeded_rank_counts(),
        }
    }
}

impl Drops {
    /// Total number of unit drops across all ranks.
    pub fn total_units(&self) -> u64 {
        self.units.values().map(|n| u64::from(*n)).sum()
    }

    /// Total number of equipment drops across all ranks.
    pub fn total_equipments(&self) -> u64 {
        self.equipments.values().map(|n| u64::from(*n)).sum()
    }
}

// ---------------------------------------------------------------------------
// FarmingStats
// ---------------------------------------------------------------------------

/// Cumulative statistics for the current farming session.
///
/// A session spans the time between two resets. All timers are wall-clock
/// timestamps; all totals are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FarmingStats {
    /// First stage entry of the session.
    pub first_enter_time: Option<DateTime<Utc>>,
    /// Most recent stage entry.
    pub latest_enter_time: Option<DateTime<Utc>>,
    /// Most recent stage exit.
    pub latest_leave_time: Option<DateTime<Utc>>,
    /// Stage key of the most recent entry.
    pub latest_enter_stage_key: Option<String>,
    /// Squad number of the most recent entry.
    pub latest_enter_squad: Option<u32>,
    /// Seconds spent between leaving a stage and entering the next one.
    pub total_waiting_time: f64,
    /// Last wave boundary.
    pub wave_time: Option<DateTime<Utc>>,
    /// Seconds spent in combat.
    pub total_round_time: f64,
    /// Completed stage exits.
    pub lap_count: u32,
    /// Resource totals observed at the last cost sample.
    pub latest_resources: Option<Resources>,
    /// Resources consumed between the last two cost samples.
    pub current_squad_costs: Option<Resources>,
    /// Drop counters.
    pub drops: Drops,
}
