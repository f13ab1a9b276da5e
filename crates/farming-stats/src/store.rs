//! Versioned container for the [`FarmingStats`] record.
//!
//! The store has no behavior beyond holding the record and merging patches
//! into it. A [`FarmingStatsPatch`] is a shallow update: every field that is
//! `Some` replaces the stored field wholesale, nested values such as
//! [`Drops`] and [`Resources`] included. Fields left `None` are untouched.
//!
//! Nullable record fields use `Option<Option<T>>` in the patch:
//! `Some(None)` clears the field, `None` leaves it alone.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use farming_types::{Drops, FarmingStats, Resources};

/// A store shared between the host (reader) and the engine (sole writer).
pub type SharedStore = Arc<RwLock<StatsStore>>;

/// Acquire a read guard, recovering from a poisoned lock.
///
/// Every `apply` completes before its guard is dropped, so the record behind
/// a poisoned lock is still whole.
pub fn read(store: &SharedStore) -> RwLockReadGuard<'_, StatsStore> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering from a poisoned lock.
pub fn write(store: &SharedStore) -> RwLockWriteGuard<'_, StatsStore> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the current record and a counter bumped on every write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsStore {
    stats: FarmingStats,
    version: u64,
}

impl StatsStore {
    /// Create a store holding a default record at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default store wrapped for sharing.
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Return a snapshot of the current record.
    pub fn get(&self) -> FarmingStats {
        self.stats.clone()
    }

    /// Borrow the current record without cloning.
    pub const fn stats(&self) -> &FarmingStats {
        &self.stats
    }

    /// Number of patches applied since creation.
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Shallow-merge `patch` into the record and bump the version.
    pub fn apply(&mut self, patch: FarmingStatsPatch) {
        patch.merge_into(&mut self.stats);
        self.version = self.version.saturating_add(1);
    }
}

/// A partial update to [`FarmingStats`].
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(clippy::option_option)]
pub struct FarmingStatsPatch {
    /// Replacement for `first_enter_time`.
    pub first_enter_time: Option<Option<DateTime<Utc>>>,
    /// Replacement for `latest_enter_time`.
    pub latest_enter_time: Option<Option<DateTime<Utc>>>,
    /// Replacement for `latest_leave_time`.
    pub latest_leave_time: Option<Option<DateTime<Utc>>>,
    /// Replacement for `latest_enter_stage_key`.
    pub latest_enter_stage_key: Option<Option<String>>,
    /// Replacement for `latest_enter_squad`.
    pub latest_enter_squad: Option<Option<u32>>,
    /// Replacement for `total_waiting_time`.
    pub total_waiting_time: Option<f64>,
    /// Replacement for `wave_time`.
    pub wave_time: Option<Option<DateTime<Utc>>>,
    /// Replacement for `total_round_time`.
    pub total_round_time: Option<f64>,
    /// Replacement for `lap_count`.
    pub lap_count: Option<u32>,
    /// Replacement for `latest_resources`.
    pub latest_resources: Option<Option<Resources>>,
    /// Replacement for `current_squad_costs`.
    pub current_squad_costs: Option<Option<Resources>>,
    /// Replacement for `drops`.
    pub drops: Option<Drops>,
}

impl FarmingStatsPatch {
    /// A patch that names every field with its default value.
    ///
    /// Applying it restores a fresh session record.
    pub fn reset() -> Self {
        let FarmingStats {
            first_enter_time,
            latest_enter_time,
            latest_leave_time,
            latest_enter_stage_key,
            latest_enter_squad,
            total_waiting_time,
            wave_time,
            total_round_time,
            lap_count,
            latest_resources,
            current_squad_costs,
            drops,
        } = FarmingStats::default();

        Self {
            first_enter_time: Some(first_enter_time),
            latest_enter_time: Some(latest_enter_time),
            latest_leave_time: Some(latest_leave_time),
            latest_enter_stage_key: Some(latest_enter_stage_key),
            latest_enter_squad: Some(latest_enter_squad),
            total_waiting_time: Some(total_waiting_time),
            wave_time: Some(wave_time),
            total_round_time: Some(total_round_time),
            lap_count: Some(lap_count),
            latest_resources: Some(latest_resources),
            current_squad_costs: Some(current_squad_costs),
            drops: Some(drops),
        }
    }

    /// Layer `later` on top of `self`; fields named by `later` win.
    ///
    /// Applying the combined patch once is equivalent to applying `self`
    /// and then `later`.
    #[must_use]
    pub fn then(self, later: Self) -> Self {
        Self {
            first_enter_time: later.first_enter_time.or(self.first_enter_time),
            latest_enter_time: later.latest_enter_time.or(self.latest_enter_time),
            latest_leave_time: later.latest_leave_time.or(self.latest_leave_time),
            latest_enter_stage_key: later
                .latest_enter_stage_key
                .or(self.latest_enter_stage_key),
            latest_enter_squad: later.latest_enter_squad.or(self.latest_enter_squad),
            total_waiting_time: later.total_waiting_time.or(self.total_waiting_time),
            wave_time: later.wave_time.or(self.wave_time),
            total_round_time: later.total_round_time.or(self.total_round_time),
            lap_count: later.lap_count.or(self.lap_count),
            latest_resources: later.latest_resources.or(self.latest_resources),
            current_squad_costs: later.current_squad_costs.or(self.current_squad_costs),
            drops: later.drops.or(self.drops),
        }
    }

    fn merge_into(self, stats: &mut FarmingStats) {
        if let Some(v) = self.first_enter_time {
            stats.first_enter_time = v;
        }
        if let Some(v) = self.latest_enter_time {
            stats.latest_enter_time = v;
        }
        if let Some(v) = self.latest_leave_time {
            stats.latest_leave_time = v;
        }
        if let Some(v) = self.latest_enter_stage_key {
            stats.latest_enter_stage_key = v;
        }
        if let Some(v) = self.latest_enter_squad {
            stats.latest_enter_squad = v;
        }
        if let Some(v) = self.total_waiting_time {
            stats.total_waiting_time = v;
        }
        if let Some(v) = self.wave_time {
            stats.wave_time = v;
        }
        if let Some(v) = self.total_round_time {
            stats.total_round_time = v;
        }
        if let Some(v) = self.lap_count {
            stats.lap_count = v;
        }
        if let Some(v) = self.latest_resources {
            stats.latest_resources = v;
        }
        if let Some(v) = self.current_squad_costs {
            stats.current_squad_costs = v;
        }
        if let Some(v) = self.drops {
            stats.drops = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use farming_types::Rank;

    use super::*;

    #[test]
    fn apply_replaces_only_named_fields() {
        let mut store = StatsStore::new();
        store.apply(FarmingStatsPatch {
            latest_enter_stage_key: Some(Some("Stage_1_1".to_owned())),
            lap_count: Some(3),
            ..FarmingStatsPatch::default()
        });
        store.apply(FarmingStatsPatch {
            lap_count: Some(4),
            ..FarmingStatsPatch::default()
        });

        let stats = store.get();
        assert_eq!(stats.latest_enter_stage_key.as_deref(), Some("Stage_1_1"));
        assert_eq!(stats.lap_count, 4);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn apply_replaces_nested_values_wholesale() {
        let mut store = StatsStore::new();
        let mut drops = Drops::default();
        drops.units.insert(Rank::S, 2);
        store.apply(FarmingStatsPatch {
            drops: Some(drops),
            ..FarmingStatsPatch::default()
        });

        // A replacement missing a rank key drops that key; no deep merge.
        let mut partial = Drops::default();
        partial.units.clear();
        partial.units.insert(Rank::A, 1);
        store.apply(FarmingStatsPatch {
            drops: Some(partial),
            ..FarmingStatsPatch::default()
        });

        let units = store.get().drops.units;
        assert_eq!(units.get(&Rank::A), Some(&1));
        assert_eq!(units.get(&Rank::S), None);
    }

    #[test]
    fn some_none_clears_nullable_field() {
        let mut store = StatsStore::new();
        store.apply(FarmingStatsPatch {
            latest_resources: Some(Some(Resources::new(1.0, 2.0, 3.0))),
            ..FarmingStatsPatch::default()
        });
        store.apply(FarmingStatsPatch {
            latest_resources: Some(None),
            ..FarmingStatsPatch::default()
        });
        assert!(store.get().latest_resources.is_none());
    }

    #[test]
    fn reset_patch_restores_default_record() {
        let mut store = StatsStore::new();
        store.apply(FarmingStatsPatch {
            lap_count: Some(9),
            total_round_time: Some(120.0),
            latest_enter_squad: Some(Some(2)),
            ..FarmingStatsPatch::default()
        });
        store.apply(FarmingStatsPatch::reset());
        assert_eq!(store.get(), FarmingStats::default());
    }

    #[test]
    fn then_prefers_later_fields() {
        let combined = FarmingStatsPatch::reset().then(FarmingStatsPatch {
            lap_count: Some(1),
            ..FarmingStatsPatch::default()
        });
        assert_eq!(combined.lap_count, Some(1));
        assert_eq!(combined.latest_enter_squad, Some(None));
    }

    #[test]
    fn shared_store_round_trips_through_guards() {
        let store = StatsStore::shared();
        write(&store).apply(FarmingStatsPatch {
            lap_count: Some(1),
            ..FarmingStatsPatch::default()
        });
        assert_eq!(read(&store).stats().lap_count, 1);
        assert_eq!(read(&store).version(), 1);
    }
}
