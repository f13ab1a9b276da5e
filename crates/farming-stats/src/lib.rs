//! Farming session statistics engine.
//!
//! Consumes stage-entry, stage-exit and wave-clear events from a running
//! game session and keeps one cumulative [`FarmingStats`] record: time spent
//! waiting versus fighting, resource cost per sortie, and drops by rank.
//!
//! # Modules
//!
//! - [`engine`] -- [`StatsEngine`]: the five event operations and `reset`.
//! - [`store`] -- [`StatsStore`]: versioned record container with
//!   shallow-merge patches.
//! - [`classify`] -- Grade and item-key to [`Rank`] tables.
//! - [`clock`] -- [`Clock`] trait, [`SystemClock`], and [`ManualClock`].
//! - [`summary`] -- Derived per-lap averages for the display layer.
//! - [`config`] -- Configuration loading from `farming-config.yaml`.
//!
//! # Usage
//!
//! ```
//! use chrono::{DateTime, TimeDelta, Utc};
//! use farming_stats::{ManualClock, StatsEngine, StatsStore};
//!
//! let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
//! let store = StatsStore::shared();
//! let engine = StatsEngine::new(store.clone(), clock.clone());
//!
//! engine.on_enter("Stage_4_2", 1);
//! clock.advance(TimeDelta::seconds(5));
//! engine.on_tick();
//!
//! let stats = farming_stats::store::read(&store).get();
//! assert!((stats.total_round_time - 5.0).abs() < 1e-9);
//! ```
//!
//! [`FarmingStats`]: farming_types::FarmingStats
//! [`Rank`]: farming_types::Rank

pub mod classify;
pub mod clock;
pub mod config;
pub mod engine;
pub mod store;
pub mod summary;

// Re-export primary types at crate root.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, FarmingConfig};
pub use engine::StatsEngine;
pub use store::{FarmingStatsPatch, SharedStore, StatsStore};
pub use summary::FarmingSummary;
