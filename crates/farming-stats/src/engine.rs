//! The farming stats engine.
//!
//! Each operation consumes one game event, reads the current record,
//! computes a single [`FarmingStatsPatch`], and applies it. Read, compute
//! and apply all happen under one write guard, so no reader ever observes a
//! half-updated record.
//!
//! # Self-correction
//!
//! The engine never returns errors. When an event contradicts the session
//! it has been accumulating (a different stage or squad, or a resource
//! stockpile that grew between samples) the session is discarded and the
//! event is recorded on top of a fresh record. The reset and the event's own
//! fields go out as one combined patch.

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use farming_types::{CurrencyInfo, Drops, FarmingStats, ItemReward, UnitReward};

use crate::classify::{grade_to_rank, item_key_to_rank, tally};
use crate::clock::{Clock, SystemClock, elapsed_seconds};
use crate::store::{self, FarmingStatsPatch, SharedStore};

/// Incremental stats accumulator over a shared [`StatsStore`].
///
/// The engine is the store's only writer. The host keeps its own clone of
/// the [`SharedStore`] to read snapshots.
///
/// [`StatsStore`]: crate::store::StatsStore
#[derive(Debug, Clone)]
pub struct StatsEngine<C = SystemClock> {
    store: SharedStore,
    clock: C,
}

impl StatsEngine<SystemClock> {
    /// Create an engine that timestamps events with the system clock.
    pub const fn with_system_clock(store: SharedStore) -> Self {
        Self::new(store, SystemClock::new())
    }
}

impl<C: Clock> StatsEngine<C> {
    /// Create an engine writing to `store` and reading time from `clock`.
    pub const fn new(store: SharedStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// The store this engine writes to.
    pub const fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Snapshot of the current record.
    pub fn snapshot(&self) -> FarmingStats {
        store::read(&self.store).get()
    }

    /// Discard the session and restore the default record.
    pub fn reset(&self) {
        self.commit("reset", |_, _| FarmingStatsPatch::reset());
        info!("Farming stats reset");
    }

    /// A stage was entered with `squad_id`.
    pub fn on_enter(&self, stage_key: &str, squad_id: u32) {
        self.commit("enter", |stats, now| {
            plan_enter(stats, now, stage_key, squad_id)
        });
    }

    /// The stage-entry response reported the post-sortie currency totals.
    pub fn on_squad_cost_sample(&self, currency: &CurrencyInfo) {
        self.commit("squad_cost_sample", |stats, _| {
            plan_squad_cost_sample(stats, currency)
        });
    }

    /// The stage was left.
    pub fn on_leave(&self) {
        self.commit("leave", plan_leave);
    }

    /// A cleared wave granted `unit_rewards` and `equipment_rewards`.
    pub fn on_drops_sample(&self, unit_rewards: &[UnitReward], equipment_rewards: &[ItemReward]) {
        self.commit("drops_sample", |stats, _| {
            plan_drops_sample(stats, unit_rewards, equipment_rewards)
        });
    }

    /// A wave boundary was crossed.
    pub fn on_tick(&self) {
        self.commit("tick", plan_tick);
    }

    fn commit<F>(&self, event: &'static str, plan: F)
    where
        F: FnOnce(&FarmingStats, DateTime<Utc>) -> FarmingStatsPatch,
    {
        let now = self.clock.now();
        let mut guard = store::write(&self.store);
        let patch = plan(guard.stats(), now);
        guard.apply(patch);
        let stats = guard.stats();
        debug!(
            event,
            version = guard.version(),
            lap_count = stats.lap_count,
            total_round_time = stats.total_round_time,
            total_waiting_time = stats.total_waiting_time,
            "Farming stats updated"
        );
    }
}

// ---------------------------------------------------------------------------
// Patch planning
// ---------------------------------------------------------------------------

fn plan_enter(
    stats: &FarmingStats,
    now: DateTime<Utc>,
    stage_key: &str,
    squad_id: u32,
) -> FarmingStatsPatch {
    let stage_changed = stats
        .latest_enter_stage_key
        .as_deref()
        .is_some_and(|latest| latest != stage_key);
    if stage_changed {
        info!(
            latest = ?stats.latest_enter_stage_key,
            current = stage_key,
            "Stage changed, resetting farming stats"
        );
    }

    let squad_changed = stats
        .latest_enter_squad
        .is_some_and(|latest| latest != squad_id);
    if squad_changed {
        info!(
            latest = ?stats.latest_enter_squad,
            current = squad_id,
            "Squad changed, resetting farming stats"
        );
    }

    let session_changed = stage_changed || squad_changed;
    let fresh;
    let base = if session_changed {
        fresh = FarmingStats::default();
        &fresh
    } else {
        stats
    };

    let mut patch = FarmingStatsPatch {
        latest_enter_time: Some(Some(now)),
        latest_enter_stage_key: Some(Some(stage_key.to_owned())),
        latest_enter_squad: Some(Some(squad_id)),
        ..FarmingStatsPatch::default()
    };

    if base.first_enter_time.is_none() {
        patch.first_enter_time = Some(Some(now));
    }

    if let Some(left_at) = base.latest_leave_time {
        let waited = elapsed_seconds(left_at, now);
        patch.total_waiting_time = Some(base.total_waiting_time + waited);
        debug!(waited, "Waiting time accumulated");
    }

    if session_changed {
        FarmingStatsPatch::reset().then(patch)
    } else {
        patch
    }
}

fn plan_squad_cost_sample(stats: &FarmingStats, currency: &CurrencyInfo) -> FarmingStatsPatch {
    let current = currency.totals();
    let costs = stats
        .latest_resources
        .map(|baseline| baseline.consumed_since(&current));

    let rebaseline = |costs| FarmingStatsPatch {
        latest_resources: Some(Some(current)),
        current_squad_costs: Some(costs),
        ..FarmingStatsPatch::default()
    };

    match costs {
        Some(negative) if negative.has_negative() => {
            warn!(
                parts = negative.parts,
                nutrients = negative.nutrients,
                power = negative.power,
                "Squad costs went negative, resetting farming stats"
            );
            FarmingStatsPatch::reset().then(rebaseline(None))
        }
        costs => rebaseline(costs),
    }
}

fn plan_leave(stats: &FarmingStats, now: DateTime<Utc>) -> FarmingStatsPatch {
    let mut patch = FarmingStatsPatch {
        latest_leave_time: Some(Some(now)),
        lap_count: Some(stats.lap_count.saturating_add(1)),
        ..FarmingStatsPatch::default()
    };

    if let Some(wave_at) = stats.wave_time {
        let round = elapsed_seconds(wave_at, now);
        patch.total_round_time = Some(stats.total_round_time + round);
    }

    patch
}

fn plan_drops_sample(
    stats: &FarmingStats,
    unit_rewards: &[UnitReward],
    equipment_rewards: &[ItemReward],
) -> FarmingStatsPatch {
    let unit_ranks = unit_rewards.iter().filter_map(|unit| {
        let rank = grade_to_rank(unit.grade);
        if rank.is_none() {
            trace!(grade = ?unit.grade, "Unit reward has no rank, skipped");
        }
        rank
    });

    let equipment_ranks = equipment_rewards.iter().filter_map(|item| {
        let rank = item_key_to_rank(item.item_key_string.as_deref());
        if rank.is_none() {
            trace!(item_key = ?item.item_key_string, "Item reward has no rank, skipped");
        }
        rank
    });

    FarmingStatsPatch {
        drops: Some(Drops {
            units: tally(&stats.drops.units, unit_ranks),
            equipments: tally(&stats.drops.equipments, equipment_ranks),
        }),
        ..FarmingStatsPatch::default()
    }
}

fn plan_tick(stats: &FarmingStats, now: DateTime<Utc>) -> FarmingStatsPatch {
    let mut patch = FarmingStatsPatch {
        wave_time: Some(Some(now)),
        ..FarmingStatsPatch::default()
    };

    // The first tick after an entry measures from the entry itself.
    if let Some(origin) = stats.wave_time.or(stats.latest_enter_time) {
        let round = elapsed_seconds(origin, now);
        patch.total_round_time = Some(stats.total_round_time + round);
    }

    patch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
