//! Derived figures for the display layer.
//!
//! Nothing here is stored; a [`FarmingSummary`] is recomputed from a
//! snapshot whenever the overlay wants to render one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use farming_types::{FarmingStats, Resources};

use crate::clock::elapsed_seconds;

/// Per-session averages and totals computed from a [`FarmingStats`] snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingSummary {
    /// Completed laps.
    pub lap_count: u32,
    /// Seconds since the first entry of the session, or 0 before any entry.
    pub elapsed_seconds: f64,
    /// Mean combat seconds per lap.
    pub average_round_seconds: Option<f64>,
    /// Mean waiting seconds per lap.
    pub average_waiting_seconds: Option<f64>,
    /// Resources spent on the most recent sortie.
    pub latest_squad_costs: Option<Resources>,
    /// Unit drops across all ranks.
    pub total_unit_drops: u64,
    /// Equipment drops across all ranks.
    pub total_equipment_drops: u64,
}

impl FarmingSummary {
    /// Summarize `stats` as of `now`.
    pub fn from_stats(stats: &FarmingStats, now: DateTime<Utc>) -> Self {
        let per_lap = |total: f64| (stats.lap_count > 0).then(|| total / f64::from(stats.lap_count));

        Self {
            lap_count: stats.lap_count,
            elapsed_seconds: stats
                .first_enter_time
                .map_or(0.0, |first| elapsed_seconds(first, now)),
            average_round_seconds: per_lap(stats.total_round_time),
            average_waiting_seconds: per_lap(stats.total_waiting_time),
            latest_squad_costs: stats.current_squad_costs,
            total_unit_drops: stats.drops.total_units(),
            total_equipment_drops: stats.drops.total_equipments(),
        }
    }
}
